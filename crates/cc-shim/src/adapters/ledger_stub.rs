//! # Ledger Stub
//!
//! `ChaincodeStub` over a shared committed ledger.
//!
//! Reads go straight to committed state. Writes and deletes are staged in a
//! per-transaction write set and only reach the ledger through `commit`, as a
//! single atomic batch. A stub that is dropped without committing leaves the
//! ledger untouched.

use crate::domain::{Invocation, Response, TransactionKind};
use crate::errors::{KVStoreError, StubError};
use crate::ports::inbound::Chaincode;
use crate::ports::outbound::{BatchOperation, ChaincodeStub, KeyValueStore};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Committed ledger shared between transactions.
pub type SharedLedger = Arc<RwLock<dyn KeyValueStore>>;

/// Wrap a store so it can back many stubs.
pub fn shared_ledger<S: KeyValueStore + 'static>(store: S) -> SharedLedger {
    Arc::new(RwLock::new(store))
}

/// Per-transaction stub.
pub struct LedgerStub {
    invocation: Invocation,
    ledger: SharedLedger,
    /// Staged writes; `None` marks a delete. Last write to a key wins.
    write_set: Mutex<BTreeMap<String, Option<Vec<u8>>>>,
}

impl LedgerStub {
    /// Create a stub for one transaction.
    pub fn new(invocation: Invocation, ledger: SharedLedger) -> Self {
        Self {
            invocation,
            ledger,
            write_set: Mutex::new(BTreeMap::new()),
        }
    }

    /// Number of distinct keys written or deleted so far.
    pub fn pending_writes(&self) -> usize {
        self.write_set.lock().len()
    }

    /// Apply the write set to the ledger as one atomic batch.
    ///
    /// Returns the number of operations applied.
    pub fn commit(self) -> Result<usize, KVStoreError> {
        let operations: Vec<BatchOperation> = self
            .write_set
            .into_inner()
            .into_iter()
            .map(|(key, value)| match value {
                Some(value) => BatchOperation::put(key, value),
                None => BatchOperation::delete(key),
            })
            .collect();

        let count = operations.len();
        if count > 0 {
            self.ledger.write().atomic_batch_write(operations)?;
        }
        debug!(tx_id = %self.invocation.tx_id, operations = count, "Write set committed");
        Ok(count)
    }
}

#[async_trait]
impl ChaincodeStub for LedgerStub {
    fn tx_id(&self) -> &str {
        &self.invocation.tx_id
    }

    fn args(&self) -> &[String] {
        &self.invocation.args
    }

    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StubError> {
        let value = self.ledger.read().get(key.as_bytes())?;
        Ok(value)
    }

    async fn put_state(&self, key: &str, value: &[u8]) -> Result<(), StubError> {
        if key.is_empty() {
            return Err(StubError::EmptyKey);
        }
        self.write_set
            .lock()
            .insert(key.to_string(), Some(value.to_vec()));
        Ok(())
    }

    async fn del_state(&self, key: &str) -> Result<(), StubError> {
        self.write_set.lock().insert(key.to_string(), None);
        Ok(())
    }
}

/// Run one transaction against the ledger.
///
/// The write set is committed only when the chaincode returns a success
/// response. A commit failure turns the response into an error.
#[instrument(skip(chaincode, ledger, invocation), fields(tx_id = %invocation.tx_id))]
pub async fn execute_transaction<C>(
    chaincode: &C,
    ledger: &SharedLedger,
    kind: TransactionKind,
    invocation: Invocation,
) -> Response
where
    C: Chaincode + ?Sized,
{
    let stub = LedgerStub::new(invocation, Arc::clone(ledger));

    let response = match kind {
        TransactionKind::Init => chaincode.init(&stub).await,
        TransactionKind::Invoke => chaincode.invoke(&stub).await,
    };

    if !response.is_success() {
        debug!(
            status = response.status,
            message = %response.message,
            discarded = stub.pending_writes(),
            "Transaction failed, write set discarded"
        );
        return response;
    }

    match stub.commit() {
        Ok(_) => response,
        Err(e) => {
            warn!(error = %e, "Commit failed");
            Response::error(e.to_string())
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

    fn ledger_with(pairs: &[(&str, &str)]) -> SharedLedger {
        let mut store = InMemoryKVStore::new();
        for (k, v) in pairs {
            store.put(k.as_bytes(), v.as_bytes()).unwrap();
        }
        shared_ledger(store)
    }

    #[tokio::test]
    async fn test_reads_see_committed_state_only() {
        let ledger = ledger_with(&[("key1", "1")]);
        let stub = LedgerStub::new(Invocation::new(["increase"]), Arc::clone(&ledger));

        stub.put_state("key1", b"99").await.unwrap();
        assert_eq!(stub.get_state("key1").await.unwrap(), Some(b"1".to_vec()));
        assert_eq!(stub.pending_writes(), 1);
    }

    #[tokio::test]
    async fn test_commit_applies_last_write() {
        let ledger = ledger_with(&[("key1", "1"), ("key2", "2")]);
        let stub = LedgerStub::new(Invocation::new(["x"]), Arc::clone(&ledger));

        stub.put_state("key1", b"10").await.unwrap();
        stub.put_state("key1", b"11").await.unwrap();
        stub.del_state("key2").await.unwrap();
        stub.del_state("missing").await.unwrap();
        assert_eq!(stub.commit().unwrap(), 3);

        let store = ledger.read();
        assert_eq!(store.get(b"key1").unwrap(), Some(b"11".to_vec()));
        assert_eq!(store.get(b"key2").unwrap(), None);
    }

    #[tokio::test]
    async fn test_dropped_stub_changes_nothing() {
        let ledger = ledger_with(&[("key1", "1")]);
        {
            let stub = LedgerStub::new(Invocation::new(["x"]), Arc::clone(&ledger));
            stub.put_state("key1", b"2").await.unwrap();
        }
        assert_eq!(ledger.read().get(b"key1").unwrap(), Some(b"1".to_vec()));
    }

    #[tokio::test]
    async fn test_empty_key_rejected() {
        let ledger = ledger_with(&[]);
        let stub = LedgerStub::new(Invocation::new(["x"]), ledger);
        assert_eq!(
            stub.put_state("", b"1").await.unwrap_err(),
            StubError::EmptyKey
        );
    }

    struct WriteThenFail;

    #[async_trait]
    impl Chaincode for WriteThenFail {
        async fn init(&self, stub: &dyn ChaincodeStub) -> Response {
            if let Err(e) = stub.put_state("key1", b"init").await {
                return Response::error(e.to_string());
            }
            Response::success(None)
        }

        async fn invoke(&self, stub: &dyn ChaincodeStub) -> Response {
            let _ = stub.put_state("key1", b"changed").await;
            Response::error("nope")
        }
    }

    #[tokio::test]
    async fn test_execute_commits_only_on_success() {
        let ledger = ledger_with(&[]);

        let resp = execute_transaction(
            &WriteThenFail,
            &ledger,
            TransactionKind::Init,
            Invocation::new(["init"]),
        )
        .await;
        assert!(resp.is_success());
        assert_eq!(ledger.read().get(b"key1").unwrap(), Some(b"init".to_vec()));

        let resp = execute_transaction(
            &WriteThenFail,
            &ledger,
            TransactionKind::Invoke,
            Invocation::new(["anything"]),
        )
        .await;
        assert_eq!(resp.message, "nope");
        assert_eq!(ledger.read().get(b"key1").unwrap(), Some(b"init".to_vec()));
    }
}
