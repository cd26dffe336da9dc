//! # Driving Port (Inbound)
//!
//! The interface a contract exposes to the host. The host calls `init` once
//! when the contract is instantiated and `invoke` for every later
//! transaction.

use crate::domain::Response;
use crate::ports::outbound::ChaincodeStub;
use async_trait::async_trait;

/// A smart contract executed by the host.
///
/// Implementations must not keep state between calls; everything durable
/// goes through the stub.
#[async_trait]
pub trait Chaincode: Send + Sync {
    /// Handle the instantiate transaction.
    async fn init(&self, stub: &dyn ChaincodeStub) -> Response;

    /// Handle a regular transaction.
    async fn invoke(&self, stub: &dyn ChaincodeStub) -> Response;
}
