//! # Domain Layer
//!
//! Plain value types shared by the chaincode and its host.
//! No I/O and no async in here.

pub mod invocation;
pub mod response;

pub use invocation::*;
pub use response::*;
