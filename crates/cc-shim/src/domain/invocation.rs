//! # Invocation
//!
//! Arguments of a single transaction as handed to the chaincode.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which chaincode entry point a transaction targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Instantiate transaction, dispatched to `Chaincode::init`.
    Init,
    /// Regular transaction, dispatched to `Chaincode::invoke`.
    Invoke,
}

/// One transaction's id and raw string arguments.
///
/// By convention the first argument names the function and the rest are its
/// parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    /// Transaction id assigned by the host.
    pub tx_id: String,
    /// Raw arguments, function name first.
    pub args: Vec<String>,
}

impl Invocation {
    /// Create an invocation with a fresh transaction id.
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_tx_id(Uuid::new_v4().to_string(), args)
    }

    /// Create an invocation with the given transaction id.
    pub fn with_tx_id<I, S>(tx_id: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tx_id: tx_id.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Split the arguments into the function name and its parameters.
    ///
    /// An empty argument list yields an empty function name.
    #[must_use]
    pub fn function_and_parameters(&self) -> (String, Vec<String>) {
        split_function_and_parameters(&self.args)
    }
}

/// Split raw arguments into the function name and its parameters.
#[must_use]
pub fn split_function_and_parameters(args: &[String]) -> (String, Vec<String>) {
    match args.split_first() {
        Some((function, params)) => (function.clone(), params.to_vec()),
        None => (String::new(), Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_and_parameters() {
        let inv = Invocation::new(["increase", "1", "5", "10"]);
        let (function, params) = inv.function_and_parameters();
        assert_eq!(function, "increase");
        assert_eq!(params, vec!["1", "5", "10"]);
    }

    #[test]
    fn test_empty_args() {
        let inv = Invocation::new(Vec::<String>::new());
        let (function, params) = inv.function_and_parameters();
        assert!(function.is_empty());
        assert!(params.is_empty());
    }

    #[test]
    fn test_kind_serde_names() {
        let kind: TransactionKind = serde_json::from_str("\"init\"").unwrap();
        assert_eq!(kind, TransactionKind::Init);
        assert_eq!(
            serde_json::to_string(&TransactionKind::Invoke).unwrap(),
            "\"invoke\""
        );
    }

    #[test]
    fn test_fresh_tx_ids_differ() {
        let a = Invocation::new(["query", "1"]);
        let b = Invocation::new(["query", "1"]);
        assert_ne!(a.tx_id, b.tx_id);
        assert!(Uuid::parse_str(&a.tx_id).is_ok());
    }
}
