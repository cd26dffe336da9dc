//! Invoke function names.

use crate::errors::DemoError;
use std::fmt;

/// Functions reachable through `invoke`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DemoFunction {
    /// Add a delta to every value in a key range.
    Increase,
    /// Remove one key.
    Delete,
    /// Read one key.
    Query,
}

impl DemoFunction {
    /// Resolve a function name. Names are case-sensitive.
    pub fn parse(name: &str) -> Result<Self, DemoError> {
        match name {
            "increase" => Ok(Self::Increase),
            "delete" => Ok(Self::Delete),
            "query" => Ok(Self::Query),
            other => Err(DemoError::UnknownFunction(other.to_string())),
        }
    }

    /// Wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Increase => "increase",
            Self::Delete => "delete",
            Self::Query => "query",
        }
    }
}

impl fmt::Display for DemoFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
