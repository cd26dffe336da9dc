//! # Demo Chaincode
//!
//! Maintains integer values under `key<N>` entries of the ledger.
//!
//! ## Operations
//!
//! | Entry | Parameters | Effect |
//! |-------|------------|--------|
//! | `init` | `prefix from to` | `key<i> = i` for every `i` in `from..=to` (`prefix` is ignored) |
//! | `increase` | `from to delta` | `key<i> += delta` for every `i` in `from..=to` |
//! | `delete` | `n` | remove `key<n>` |
//! | `query` | `name` | return the value of `key<name>` |
//!
//! The first error ends the transaction; the host then discards every write
//! staged so far.

use crate::config::DemoConfig;
use crate::domain::{
    add_to_value, general_key, parse_int, query_key, DemoFunction, KeyRange, KEY_PREFIX,
};
use crate::errors::DemoError;
use async_trait::async_trait;
use cc_shim::domain::Response;
use cc_shim::ports::{Chaincode, ChaincodeStub};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Success body logged by `query`.
#[derive(Debug, Serialize)]
pub struct QueryResult<'a> {
    /// Queried name, as given.
    #[serde(rename = "Name")]
    pub name: &'a str,
    /// Stored value.
    #[serde(rename = "Amount")]
    pub amount: &'a str,
}

type TxResult = Result<Option<Vec<u8>>, DemoError>;

/// The demo chaincode. Stateless apart from its limits.
#[derive(Debug, Clone)]
pub struct DemoChaincode {
    max_range_span: u64,
}

impl Default for DemoChaincode {
    fn default() -> Self {
        Self::new(&DemoConfig::default())
    }
}

impl DemoChaincode {
    /// Create the chaincode from configuration.
    #[must_use]
    pub fn new(config: &DemoConfig) -> Self {
        Self {
            max_range_span: config.max_range_span,
        }
    }

    #[instrument(skip(self, stub, args), fields(tx_id = %stub.tx_id()))]
    async fn handle_init(&self, stub: &dyn ChaincodeStub, args: &[String]) -> TxResult {
        info!("Demo Init");
        let [_prefix, from, to] = args else {
            return Err(DemoError::IncorrectArguments("3"));
        };

        let range = KeyRange::parse(from, to)?;
        range.check_span(self.max_range_span)?;
        info!(
            key_prefix = KEY_PREFIX,
            key_from = %general_key(range.from),
            key_to = %general_key(range.to),
            "Initializing key range"
        );

        for i in range.indices() {
            stub.put_state(&general_key(i), i.to_string().as_bytes())
                .await?;
        }
        Ok(None)
    }

    #[instrument(skip(self, stub, function, args), fields(tx_id = %stub.tx_id(), function = %function))]
    async fn handle_invoke(
        &self,
        stub: &dyn ChaincodeStub,
        function: &str,
        args: &[String],
    ) -> TxResult {
        info!("Demo Invoke");
        match DemoFunction::parse(function)? {
            DemoFunction::Increase => self.increase(stub, args).await,
            DemoFunction::Delete => self.delete(stub, args).await,
            DemoFunction::Query => self.query(stub, args).await,
        }
    }

    /// Add `delta` to every value in `from..=to`. Missing keys start at 0.
    async fn increase(&self, stub: &dyn ChaincodeStub, args: &[String]) -> TxResult {
        let [from, to, delta] = args else {
            return Err(DemoError::IncorrectArguments("3"));
        };

        let range = KeyRange::parse(from, to)?;
        let delta = parse_int(delta)?;
        range.check_span(self.max_range_span)?;

        for i in range.indices() {
            let key = general_key(i);
            let current = stub
                .get_state(&key)
                .await
                .map_err(DemoError::GetStateFailed)?;
            let updated = add_to_value(&key, current.as_deref(), delta)?;
            stub.put_state(&key, updated.to_string().as_bytes())
                .await
                .map_err(DemoError::PutStateFailed)?;
        }

        debug!(from = range.from, to = range.to, delta, "Range increased");
        Ok(None)
    }

    /// Remove one key. Removing a missing key succeeds.
    async fn delete(&self, stub: &dyn ChaincodeStub, args: &[String]) -> TxResult {
        let [index] = args else {
            return Err(DemoError::IncorrectArguments("1"));
        };

        let key = general_key(parse_int(index)?);
        stub.del_state(&key)
            .await
            .map_err(DemoError::DeleteStateFailed)?;

        debug!(key = %key, "Key deleted");
        Ok(None)
    }

    /// Return the stored bytes of `key<name>`.
    async fn query(&self, stub: &dyn ChaincodeStub, args: &[String]) -> TxResult {
        let [name] = args else {
            return Err(DemoError::IncorrectArguments("name of the person to query"));
        };

        let value = stub
            .get_state(&query_key(name))
            .await
            .map_err(|source| DemoError::QueryStateFailed {
                name: name.clone(),
                source,
            })?
            .ok_or_else(|| DemoError::NilAmount { name: name.clone() })?;

        let amount = String::from_utf8_lossy(&value);
        let body = QueryResult {
            name,
            amount: &amount,
        };
        if let Ok(json) = serde_json::to_string(&body) {
            info!(response = %json, "Query Response");
        }
        Ok(Some(value))
    }
}

fn into_response(result: TxResult) -> Response {
    match result {
        Ok(payload) => Response::success(payload),
        Err(e) => {
            warn!(error = %e, "Transaction rejected");
            e.into_response()
        }
    }
}

#[async_trait]
impl Chaincode for DemoChaincode {
    async fn init(&self, stub: &dyn ChaincodeStub) -> Response {
        let (_function, args) = stub.function_and_parameters();
        into_response(self.handle_init(stub, &args).await)
    }

    async fn invoke(&self, stub: &dyn ChaincodeStub) -> Response {
        let (function, args) = stub.function_and_parameters();
        into_response(self.handle_invoke(stub, &function, &args).await)
    }
}

// =============================================================================
// TESTS
// =============================================================================
