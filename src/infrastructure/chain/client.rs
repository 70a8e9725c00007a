//! Chain client abstraction
//!
//! This trait defines the node capabilities the dashboard needs,
//! abstracting over the transport so the search engine and the feed
//! run identically against a live node or the in-memory mock.

use thiserror::Error;

use crate::domain::block::{Block, Header};
use crate::domain::event::EventRecord;

/// Failures a chain client call can surface.
///
/// The display string of each variant is shown to the user verbatim
/// (prefixed with `ERROR: ` by the session), so messages carry the
/// identifier that failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainError {
    /// Malformed identifier, rejected before any network round trip
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Identifier does not correspond to any existing block
    #[error("not found: {0}")]
    NotFound(String),
    /// Transport or connection failure
    #[error("network error: {0}")]
    Network(String),
}

/// Abstract chain node client
#[async_trait::async_trait]
pub trait ChainClient: Send + Sync {
    /// Human-readable chain name (e.g. "Development")
    async fn chain_name(&self) -> Result<String, ChainError>;

    /// Resolve a block height to its canonical hash.
    /// Fails with `NotFound` past the finalized height.
    async fn resolve_hash(&self, height: u64) -> Result<String, ChainError>;

    /// Fetch the header for a known block hash
    async fn get_header(&self, hash: &str) -> Result<Header, ChainError>;

    /// Fetch a full block, extrinsics included
    async fn get_block(&self, hash: &str) -> Result<Block, ChainError>;

    /// Fetch the chain's event log as of the given block
    async fn get_event_log(&self, hash: &str) -> Result<Vec<EventRecord>, ChainError>;

    /// Header of the latest finalized block, for the live feed
    async fn latest_header(&self) -> Result<Header, ChainError>;

    /// Well-known accounts exposed by the node (dev nodes)
    async fn accounts(&self) -> Result<Vec<String>, ChainError>;
}
