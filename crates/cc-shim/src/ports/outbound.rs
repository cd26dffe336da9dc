//! # Driven Ports (Outbound)
//!
//! What a contract and the host depend on:
//! - `ChaincodeStub`: the per-transaction view of the ledger given to chaincode
//! - `KeyValueStore`: the committed ledger behind the stub
//!
//! Adapters in `crate::adapters` implement both.

use crate::domain::split_function_and_parameters;
use crate::errors::{KVStoreError, StubError};
use async_trait::async_trait;

// =============================================================================
// CHAINCODE STUB
// =============================================================================

/// Per-transaction handle to the ledger.
///
/// ## Implementation Notes
///
/// - Reads return committed state; writes are staged until the host commits
/// - `put_state` rejects an empty key
/// - `del_state` on a missing key is not an error
#[async_trait]
pub trait ChaincodeStub: Send + Sync {
    /// Transaction id assigned by the host.
    fn tx_id(&self) -> &str;

    /// Raw arguments, function name first.
    fn args(&self) -> &[String];

    /// Split the arguments into the function name and its parameters.
    fn function_and_parameters(&self) -> (String, Vec<String>) {
        split_function_and_parameters(self.args())
    }

    /// Read a value.
    ///
    /// # Returns
    ///
    /// * `Some(bytes)` - If the key exists
    /// * `None` - If the key was never written or has been deleted
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StubError>;

    /// Stage a write.
    async fn put_state(&self, key: &str, value: &[u8]) -> Result<(), StubError>;

    /// Stage a delete.
    async fn del_state(&self, key: &str) -> Result<(), StubError>;
}

// =============================================================================
// KEY VALUE STORE
// =============================================================================

/// Committed ledger storage.
///
/// Production: `RocksDbStore` (feature `rocksdb`)
/// Testing: `InMemoryKVStore`
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Put a single key-value pair.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Delete a key.
    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError>;

    /// Execute an atomic batch write.
    ///
    /// Either ALL operations in the batch are applied, or NONE are.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.get(key)?.is_some())
    }

    /// All pairs whose key starts with `prefix`, in key order.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, KVStoreError>;
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put { key: Vec<u8>, value: Vec<u8> },
    /// Delete a key.
    Delete { key: Vec<u8> },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a Delete operation.
    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }

    /// Key touched by this operation.
    #[must_use]
    pub fn key(&self) -> &[u8] {
        match self {
            BatchOperation::Put { key, .. } | BatchOperation::Delete { key } => key,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryKVStore;

    #[test]
    fn test_batch_operation_key() {
        assert_eq!(BatchOperation::put("a", "1").key(), b"a");
        assert_eq!(BatchOperation::delete("b").key(), b"b");
    }

    #[test]
    fn test_default_exists() {
        let mut store = InMemoryKVStore::new();
        assert!(!store.exists(b"k").unwrap());
        store.put(b"k", b"v").unwrap();
        assert!(store.exists(b"k").unwrap());
    }

    struct FixedArgs(Vec<String>);

    #[async_trait]
    impl ChaincodeStub for FixedArgs {
        fn tx_id(&self) -> &str {
            "fixed"
        }

        fn args(&self) -> &[String] {
            &self.0
        }

        async fn get_state(&self, _key: &str) -> Result<Option<Vec<u8>>, StubError> {
            Ok(None)
        }

        async fn put_state(&self, _key: &str, _value: &[u8]) -> Result<(), StubError> {
            Ok(())
        }

        async fn del_state(&self, _key: &str) -> Result<(), StubError> {
            Ok(())
        }
    }

    #[test]
    fn test_default_function_and_parameters() {
        let stub = FixedArgs(vec!["delete".to_string(), "7".to_string()]);
        let (function, params) = stub.function_and_parameters();
        assert_eq!(function, "delete");
        assert_eq!(params, vec!["7".to_string()]);

        let empty = FixedArgs(Vec::new());
        assert_eq!(empty.function_and_parameters(), (String::new(), Vec::new()));
    }
}
