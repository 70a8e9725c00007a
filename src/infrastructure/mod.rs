//! Infrastructure layer - external service integrations
//!
//! This layer contains:
//! - the chain client trait with its JSON-RPC and mock implementations
//! - the Tokio runtime bridge for async operations

pub mod chain;
pub mod runtime;
