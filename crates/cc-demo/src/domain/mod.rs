//! # Domain Layer
//!
//! Key naming, integer handling and function dispatch. No I/O.

pub mod function;
pub mod keys;

pub use function::*;
pub use keys::*;
