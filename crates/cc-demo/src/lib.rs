//! # cc-demo - Key-Range Demo Chaincode
//!
//! A minimal contract that keeps integer values under `key<N>` ledger
//! entries. It exists to show ledger reads, writes and deletes through the
//! chaincode stub.
//!
//! ## Operations
//!
//! | Entry | Parameters | Location |
//! |-------|------------|----------|
//! | `init` | `prefix from to` | `service.rs` - `handle_init()` |
//! | `increase` | `from to delta` | `service.rs` - `increase()` |
//! | `delete` | `n` | `service.rs` - `delete()` |
//! | `query` | `name` | `service.rs` - `query()` |
//!
//! ## Rules
//!
//! | Rule | Enforcement Location |
//! |------|---------------------|
//! | Stored values are decimal integers | `domain/keys.rs` - `add_to_value()` |
//! | Ranges are inclusive, empty when reversed | `domain/keys.rs` - `KeyRange` |
//! | Range size is bounded | `domain/keys.rs` - `KeyRange::check_span()` |
//! | First error fails the transaction | `service.rs` - `into_response()` |
//!
//! ## Usage Example
//!
//! ```ignore
//! use cc_demo::prelude::*;
//!
//! let mut mock = MockStub::new("demo", DemoChaincode::default());
//! mock.mock_init("t1", ["init", "key", "1", "10"]).await;
//! let resp = mock.mock_invoke("t2", ["query", "3"]).await;
//! assert_eq!(resp.payload_text().as_deref(), Some("3"));
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod config;
pub mod domain;
pub mod errors;
pub mod runtime;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::config::DemoConfig;
    pub use crate::domain::{
        add_to_value, general_key, parse_int, query_key, DemoFunction, KeyRange, KEY_PREFIX,
    };
    pub use crate::errors::{ConfigError, DemoError, QueryError};
    pub use crate::runtime::{init_tracing, open_ledger, run};
    pub use crate::service::{DemoChaincode, QueryResult};

    pub use cc_shim::prelude::*;
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
