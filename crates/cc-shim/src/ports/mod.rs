//! # Ports Layer
//!
//! Trait definitions between chaincode and the host.
//!
//! - **Driving Port (Inbound)**: `Chaincode`, implemented by contracts
//! - **Driven Ports (Outbound)**: `ChaincodeStub`, `KeyValueStore`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
