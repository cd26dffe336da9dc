//! # Mock Stub
//!
//! Test harness that runs a contract against an in-memory ledger, one
//! transaction at a time, with the same commit rules as the host.

use crate::adapters::ledger_stub::{execute_transaction, shared_ledger, SharedLedger};
use crate::adapters::memory_store::InMemoryKVStore;
use crate::domain::{Invocation, Response, TransactionKind};
use crate::errors::KVStoreError;
use crate::ports::inbound::Chaincode;
use crate::ports::outbound::KeyValueStore;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Drives a single contract in tests.
pub struct MockStub<C: Chaincode> {
    name: String,
    chaincode: C,
    ledger: SharedLedger,
}

impl<C: Chaincode> MockStub<C> {
    /// Create a harness with an empty in-memory ledger.
    pub fn new(name: impl Into<String>, chaincode: C) -> Self {
        Self::with_ledger(name, chaincode, shared_ledger(InMemoryKVStore::new()))
    }

    /// Create a harness over an existing ledger.
    pub fn with_ledger(name: impl Into<String>, chaincode: C, ledger: SharedLedger) -> Self {
        Self {
            name: name.into(),
            chaincode,
            ledger,
        }
    }

    /// Harness name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ledger the harness commits to.
    pub fn ledger(&self) -> SharedLedger {
        Arc::clone(&self.ledger)
    }

    /// Run the instantiate transaction.
    pub async fn mock_init<I, S>(&mut self, tx_id: &str, args: I) -> Response
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.run(TransactionKind::Init, tx_id, args).await
    }

    /// Run a regular transaction.
    pub async fn mock_invoke<I, S>(&mut self, tx_id: &str, args: I) -> Response
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.run(TransactionKind::Invoke, tx_id, args).await
    }

    async fn run<I, S>(&mut self, kind: TransactionKind, tx_id: &str, args: I) -> Response
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let invocation = Invocation::with_tx_id(tx_id, args);
        execute_transaction(&self.chaincode, &self.ledger, kind, invocation).await
    }

    /// Committed value of a key.
    pub fn state(&self, key: &str) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.ledger.read().get(key.as_bytes())
    }

    /// Committed value of a key as text.
    pub fn state_text(&self, key: &str) -> Result<Option<String>, KVStoreError> {
        Ok(self
            .state(key)?
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
    }

    /// Write directly to committed state, bypassing the contract.
    pub fn seed_state(&self, key: &str, value: &[u8]) -> Result<(), KVStoreError> {
        self.ledger.write().put(key.as_bytes(), value)
    }

    /// Every committed pair, keys decoded as text.
    pub fn snapshot(&self) -> Result<BTreeMap<String, Vec<u8>>, KVStoreError> {
        Ok(self
            .ledger
            .read()
            .prefix_scan(b"")?
            .into_iter()
            .map(|(key, value)| (String::from_utf8_lossy(&key).into_owned(), value))
            .collect())
    }
}
