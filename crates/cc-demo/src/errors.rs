//! # Error Types
//!
//! Every failure ends the transaction with a status-500 response whose
//! message is the `Display` text below. Query failures are reported as a
//! small JSON object instead of plain text.

use cc_shim::domain::Response;
use cc_shim::errors::StubError;
use serde::Serialize;
use thiserror::Error;

// =============================================================================
// CHAINCODE ERRORS
// =============================================================================

/// Errors raised while handling a transaction.
#[derive(Debug, Error)]
pub enum DemoError {
    /// Wrong number of parameters; the payload says what was expected.
    #[error("Incorrect number of arguments. Expecting {0}")]
    IncorrectArguments(&'static str),

    /// A numeric parameter did not parse.
    #[error("Expecting integer value for asset holding")]
    NotAnInteger(String),

    /// Unknown invoke function.
    #[error("Invalid invoke function name. Expecting \"increase\" \"delete\" \"query\"")]
    UnknownFunction(String),

    /// Key range exceeds the configured limit.
    #[error("Key range too large: {span} keys, limit {limit}")]
    RangeTooLarge { span: u128, limit: u64 },

    /// Writing during init failed; reported verbatim.
    #[error(transparent)]
    Ledger(#[from] StubError),

    /// Reading during increase failed.
    #[error("Failed to get state")]
    GetStateFailed(#[source] StubError),

    /// Writing during increase failed.
    #[error("Failed to put state")]
    PutStateFailed(#[source] StubError),

    /// Delete failed.
    #[error("Failed to delete state")]
    DeleteStateFailed(#[source] StubError),

    /// A stored value is not an integer.
    #[error("Stored value for {key} is not an integer")]
    CorruptValue { key: String },

    /// Adding the delta overflowed.
    #[error("Integer overflow updating {key}")]
    Overflow { key: String },

    /// Reading the queried key failed.
    #[error("Failed to get state for {name}")]
    QueryStateFailed {
        name: String,
        #[source]
        source: StubError,
    },

    /// The queried key does not exist.
    #[error("Nil amount for {name}")]
    NilAmount { name: String },
}

/// Error body of a failed query.
#[derive(Debug, Serialize)]
pub struct QueryError<'a> {
    /// Error text.
    #[serde(rename = "Error")]
    pub error: &'a str,
}

impl DemoError {
    /// Message placed in the failure response.
    #[must_use]
    pub fn response_message(&self) -> String {
        let text = self.to_string();
        match self {
            Self::QueryStateFailed { .. } | Self::NilAmount { .. } => {
                serde_json::to_string(&QueryError { error: &text }).unwrap_or(text)
            }
            _ => text,
        }
    }

    /// Convert into a failure response.
    #[must_use]
    pub fn into_response(self) -> Response {
        Response::error(self.response_message())
    }
}

// =============================================================================
// CONFIG ERRORS
// =============================================================================

/// Invalid configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_range_span` must allow at least one key.
    #[error("max_range_span must be greater than zero")]
    ZeroRangeSpan,

    /// `max_line_bytes` must allow at least one byte.
    #[error("max_line_bytes must be greater than zero")]
    ZeroLineLimit,
}

// =============================================================================
// TESTS
// =============================================================================
