//! # Chaincode Response
//!
//! The result of an `init` or `invoke` call: a status code, an optional
//! message and an optional payload.

use serde::{Deserialize, Serialize};

/// Status codes understood by the host.
pub mod status {
    /// Transaction succeeded.
    pub const OK: i32 = 200;
    /// Codes at or above this value are errors.
    pub const ERROR_THRESHOLD: i32 = 400;
    /// Transaction failed.
    pub const ERROR: i32 = 500;
}

/// Response returned by chaincode to the host.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Status code (see [`status`]).
    pub status: i32,
    /// Human-readable message, empty on success.
    pub message: String,
    /// Result bytes, if any.
    pub payload: Option<Vec<u8>>,
}

impl Response {
    /// Successful response carrying an optional payload.
    #[must_use]
    pub fn success(payload: Option<Vec<u8>>) -> Self {
        Self {
            status: status::OK,
            message: String::new(),
            payload,
        }
    }

    /// Failed response with a message.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: status::ERROR,
            message: message.into(),
            payload: None,
        }
    }

    /// Returns true if the status is below the error threshold.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status < status::ERROR_THRESHOLD
    }

    /// Payload rendered as text, replacing invalid UTF-8.
    #[must_use]
    pub fn payload_text(&self) -> Option<String> {
        self.payload
            .as_deref()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}
