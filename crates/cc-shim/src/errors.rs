//! # Error Types
//!
//! Errors raised by the ledger ports, the stub and the host loop.

use thiserror::Error;

// =============================================================================
// KV STORE ERRORS
// =============================================================================

/// Errors from a `KeyValueStore` backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    Io { message: String },

    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    Corruption { message: String },
}

// =============================================================================
// STUB ERRORS
// =============================================================================

/// Errors surfaced to chaincode through the `ChaincodeStub`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StubError {
    /// Keys must be non-empty.
    #[error("key must not be an empty string")]
    EmptyKey,

    /// The backing ledger failed.
    #[error(transparent)]
    Store(#[from] KVStoreError),
}

// =============================================================================
// HOST ERRORS
// =============================================================================

/// Errors that end the host loop.
#[derive(Debug, Error)]
pub enum HostError {
    /// Reading requests or writing responses failed.
    #[error("host I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A response could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// =============================================================================
// TESTS
// =============================================================================
