//! # cc-shim - Chaincode Host Interface
//!
//! The contract-facing side of a permissioned ledger: the stub a contract
//! reads and writes through, the response it returns, and the pieces needed
//! to run a contract locally.
//!
//! ## Transaction Model
//!
//! | Rule | Enforcement Location |
//! |------|---------------------|
//! | Reads see committed state only | `adapters/ledger_stub.rs` - `get_state()` |
//! | Writes are staged per transaction | `adapters/ledger_stub.rs` - `put_state()` / `del_state()` |
//! | Write set commits atomically, success only | `adapters/ledger_stub.rs` - `execute_transaction()` |
//! | Empty keys are rejected on write | `adapters/ledger_stub.rs` - `put_state()` |
//!
//! ## Outbound Dependencies
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | `KeyValueStore` | Committed ledger (in-memory or RocksDB) |
//!
//! ## Usage Example
//!
//! ```ignore
//! use cc_shim::prelude::*;
//!
//! let mut mock = MockStub::new("demo", MyChaincode);
//! let resp = mock.mock_invoke("tx1", ["query", "1"]).await;
//! assert!(resp.is_success());
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod host;
pub mod ports;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::domain::{status, Invocation, Response, TransactionKind};

    pub use crate::ports::inbound::Chaincode;
    pub use crate::ports::outbound::{BatchOperation, ChaincodeStub, KeyValueStore};

    pub use crate::errors::{HostError, KVStoreError, StubError};

    pub use crate::adapters::{
        execute_transaction, shared_ledger, InMemoryKVStore, LedgerStub, MockStub, SharedLedger,
    };
    #[cfg(feature = "rocksdb")]
    pub use crate::adapters::{RocksDbConfig, RocksDbStore};

    pub use crate::host::{
        start, HostConfig, HostStats, TransactionRequest, TransactionResponse,
    };
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
