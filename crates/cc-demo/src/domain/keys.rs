//! # Keys and Values
//!
//! Keys are `KEY_PREFIX` followed by a decimal integer; values are decimal
//! integers stored as UTF-8 text.

use crate::errors::DemoError;
use std::ops::RangeInclusive;

/// Prefix of every key this chaincode writes.
pub const KEY_PREFIX: &str = "key";

/// Ledger key for an index: `general_key(7) == "key7"`.
#[must_use]
pub fn general_key(index: i64) -> String {
    format!("{KEY_PREFIX}{index}")
}

/// Ledger key for a query argument, used as-is without parsing.
///
/// `query_key("007")` is `"key007"`, which is not the key `general_key(7)`
/// writes.
#[must_use]
pub fn query_key(name: &str) -> String {
    format!("{KEY_PREFIX}{name}")
}

/// Parse a decimal integer argument. A leading sign is allowed, whitespace is
/// not.
pub fn parse_int(arg: &str) -> Result<i64, DemoError> {
    arg.parse::<i64>()
        .map_err(|_| DemoError::NotAnInteger(arg.to_string()))
}

/// Add `delta` to a stored value.
///
/// A missing or empty value counts as zero.
pub fn add_to_value(key: &str, stored: Option<&[u8]>, delta: i64) -> Result<i64, DemoError> {
    let current = match stored {
        None | Some([]) => 0,
        Some(bytes) => std::str::from_utf8(bytes)
            .ok()
            .and_then(|text| text.parse::<i64>().ok())
            .ok_or_else(|| DemoError::CorruptValue {
                key: key.to_string(),
            })?,
    };

    current.checked_add(delta).ok_or_else(|| DemoError::Overflow {
        key: key.to_string(),
    })
}

/// Inclusive range of key indices. Empty when `from > to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyRange {
    /// First index.
    pub from: i64,
    /// Last index, inclusive.
    pub to: i64,
}

impl KeyRange {
    /// Create a range.
    #[must_use]
    pub fn new(from: i64, to: i64) -> Self {
        Self { from, to }
    }

    /// Parse both bounds from arguments.
    pub fn parse(from: &str, to: &str) -> Result<Self, DemoError> {
        Ok(Self::new(parse_int(from)?, parse_int(to)?))
    }

    /// Number of indices covered.
    #[must_use]
    pub fn span(&self) -> u128 {
        if self.from > self.to {
            0
        } else {
            (i128::from(self.to) - i128::from(self.from) + 1).unsigned_abs()
        }
    }

    /// Returns true if the range covers nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.from > self.to
    }

    /// Indices in ascending order.
    #[must_use]
    pub fn indices(&self) -> RangeInclusive<i64> {
        self.from..=self.to
    }

    /// Fail if the range covers more than `limit` indices.
    pub fn check_span(&self, limit: u64) -> Result<(), DemoError> {
        let span = self.span();
        if span > u128::from(limit) {
            return Err(DemoError::RangeTooLarge { span, limit });
        }
        Ok(())
    }
}
