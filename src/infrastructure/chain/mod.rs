pub mod client;
pub mod mock;
pub mod rpc;

pub use client::{ChainClient, ChainError};
pub use mock::MockChain;
pub use rpc::RpcChain;
