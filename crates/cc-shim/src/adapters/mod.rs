//! # Adapters Layer
//!
//! Concrete implementations of the outbound ports.
//!
//! - `InMemoryKVStore`: committed ledger held in memory
//! - `RocksDbStore`: committed ledger on disk (feature `rocksdb`)
//! - `LedgerStub`: per-transaction stub with a staged write set
//! - `MockStub`: test harness that runs a contract against an in-memory ledger

pub mod ledger_stub;
pub mod memory_store;
pub mod mock_stub;
#[cfg(feature = "rocksdb")]
pub mod rocksdb_store;

pub use ledger_stub::*;
pub use memory_store::*;
pub use mock_stub::*;
#[cfg(feature = "rocksdb")]
pub use rocksdb_store::*;
