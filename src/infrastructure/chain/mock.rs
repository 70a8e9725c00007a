//! In-memory chain client
//!
//! Backs the `--mock` data mode and the integration tests: a small
//! scripted chain with deterministic hashes and optional failure
//! injection at the event-log boundary.

use std::collections::HashMap;

use crate::domain::block::{Block, Extrinsic, Header};
use crate::domain::event::EventRecord;
use crate::infrastructure::chain::client::{ChainClient, ChainError};

pub struct MockChain {
    chain: String,
    accounts: Vec<String>,
    blocks: Vec<Block>,
    events: HashMap<String, Vec<EventRecord>>,
    event_log_failure: Option<ChainError>,
}

impl MockChain {
    pub fn named(chain: impl Into<String>) -> Self {
        Self {
            chain: chain.into(),
            accounts: vec!["alice".to_string(), "bob".to_string()],
            blocks: Vec::new(),
            events: HashMap::new(),
            event_log_failure: None,
        }
    }

    /// Append a block at the next height and register its event log.
    /// Returns the generated hash.
    pub fn push_block(&mut self, extrinsics: Vec<Extrinsic>, events: Vec<EventRecord>) -> String {
        let number = self.blocks.len() as u64;
        let hash = Self::hash_for(number);
        self.blocks.push(Block {
            header: Header {
                number,
                hash: hash.clone(),
            },
            extrinsics,
        });
        self.events.insert(hash.clone(), events);
        hash
    }

    /// Deterministic per-height hash, stable across runs
    pub fn hash_for(number: u64) -> String {
        format!("0x{:064x}", number + 0x5c17)
    }

    /// Make every subsequent `get_event_log` call fail
    pub fn fail_event_log(&mut self, error: ChainError) {
        self.event_log_failure = Some(error);
    }

    pub fn set_accounts(&mut self, accounts: Vec<String>) {
        self.accounts = accounts;
    }

    fn find_block(&self, hash: &str) -> Result<&Block, ChainError> {
        self.blocks
            .iter()
            .find(|block| block.header.hash == hash)
            .ok_or_else(|| ChainError::NotFound(format!("no block for hash {hash}")))
    }

    /// A couple of pre-wired blocks so the dashboard has something to
    /// show without a node: an empty block, then a transfer block.
    pub fn development() -> Self {
        use crate::domain::event::Phase;

        let mut chain = Self::named("Development");
        let timestamp_set = Extrinsic {
            signed: false,
            section: "timestamp".to_string(),
            method: "set".to_string(),
            args: vec!["1600000000000".to_string()],
            docs: vec!["Set the current time.".to_string()],
        };
        let transfer = Extrinsic {
            signed: true,
            section: "balances".to_string(),
            method: "transfer".to_string(),
            args: vec!["5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY".to_string(), "1000".to_string()],
            docs: vec!["Transfer some liquid free balance to another account.".to_string()],
        };
        let success = |index| EventRecord {
            phase: Phase::ApplyExtrinsic(index),
            section: "system".to_string(),
            method: "ExtrinsicSuccess".to_string(),
        };

        chain.push_block(vec![timestamp_set.clone()], vec![success(0)]);
        chain.push_block(
            vec![timestamp_set, transfer],
            vec![
                success(0),
                EventRecord {
                    phase: Phase::ApplyExtrinsic(1),
                    section: "balances".to_string(),
                    method: "Transfer".to_string(),
                },
                success(1),
            ],
        );
        chain
    }
}

#[async_trait::async_trait]
impl ChainClient for MockChain {
    async fn chain_name(&self) -> Result<String, ChainError> {
        Ok(self.chain.clone())
    }

    async fn resolve_hash(&self, height: u64) -> Result<String, ChainError> {
        self.blocks
            .get(height as usize)
            .map(|block| block.header.hash.clone())
            .ok_or_else(|| ChainError::NotFound(format!("no block at height {height}")))
    }

    async fn get_header(&self, hash: &str) -> Result<Header, ChainError> {
        Ok(self.find_block(hash)?.header.clone())
    }

    async fn get_block(&self, hash: &str) -> Result<Block, ChainError> {
        Ok(self.find_block(hash)?.clone())
    }

    async fn get_event_log(&self, hash: &str) -> Result<Vec<EventRecord>, ChainError> {
        if let Some(error) = &self.event_log_failure {
            return Err(error.clone());
        }
        self.find_block(hash)?;
        Ok(self.events.get(hash).cloned().unwrap_or_default())
    }

    async fn latest_header(&self) -> Result<Header, ChainError> {
        self.blocks
            .last()
            .map(|block| block.header.clone())
            .ok_or_else(|| ChainError::NotFound("chain is empty".to_string()))
    }

    async fn accounts(&self) -> Result<Vec<String>, ChainError> {
        Ok(self.accounts.clone())
    }
}
