//! Block search engine
//!
//! Resolves a user-supplied identifier to a concrete block, joins it
//! with the chain's event log, and renders the per-extrinsic report.
//! Both lookup paths converge on the same correlation and rendering
//! code; only the resolution topology differs per mode.

use crate::domain::block::{Block, BlockId, Header};
use crate::domain::{correlate, report};
use crate::infrastructure::chain::{ChainClient, ChainError};

/// A successfully resolved block, ready for correlation
#[derive(Debug, Clone)]
pub struct Found {
    pub chain: String,
    pub header: Header,
    pub block: Block,
}

impl Found {
    /// The status line shown for a successful lookup
    pub fn status_line(&self) -> String {
        format!(
            "[ {} ] : found block #{} has hash {}",
            self.chain, self.header.number, self.header.hash
        )
    }
}

/// Resolve an identifier to its block.
///
/// Height mode resolves the canonical hash first and reports the
/// header from a dedicated fetch; hash mode reads the header off the
/// returned block. Errors propagate unchanged, and no partial result
/// ever escapes this function.
pub async fn resolve(client: &dyn ChainClient, id: &BlockId) -> Result<Found, ChainError> {
    let chain = client.chain_name().await?;
    match id {
        BlockId::Height(height) => {
            let hash = client.resolve_hash(*height).await?;
            let header = client.get_header(&hash).await?;
            let block = client.get_block(&hash).await?;
            Ok(Found {
                chain,
                header,
                block,
            })
        }
        BlockId::Hash(hash) => {
            let block = client.get_block(hash).await?;
            let header = block.header.clone();
            Ok(Found {
                chain,
                header,
                block,
            })
        }
    }
}

/// Fetch the event log for a resolved block and render the report
pub async fn build_report(client: &dyn ChainClient, found: &Found) -> Result<String, ChainError> {
    let event_log = client.get_event_log(&found.header.hash).await?;
    let records = correlate(&found.block.extrinsics, &event_log);
    Ok(report::render(&records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::chain::MockChain;

    #[tokio::test]
    async fn height_resolution_reports_the_requested_height() {
        let chain = MockChain::development();
        for height in 0..2 {
            let found = resolve(&chain, &BlockId::Height(height)).await.unwrap();
            assert_eq!(found.header.number, height);
            assert_eq!(found.header.hash, MockChain::hash_for(height));
        }
    }

    #[tokio::test]
    async fn hash_resolution_round_trips_the_hash() {
        let chain = MockChain::development();
        let hash = MockChain::hash_for(1);
        let found = resolve(&chain, &BlockId::Hash(hash.clone())).await.unwrap();
        assert_eq!(found.header.hash, hash);
        assert_eq!(found.header.number, 1);
    }

    #[tokio::test]
    async fn unknown_height_is_not_found() {
        let chain = MockChain::development();
        let err = resolve(&chain, &BlockId::Height(999)).await.unwrap_err();
        assert_eq!(err, ChainError::NotFound("no block at height 999".to_string()));
    }

    #[tokio::test]
    async fn status_line_carries_chain_name_number_and_hash() {
        let chain = MockChain::development();
        let found = resolve(&chain, &BlockId::Height(1)).await.unwrap();
        assert_eq!(
            found.status_line(),
            format!(
                "[ Development ] : found block #1 has hash {}",
                MockChain::hash_for(1)
            )
        );
    }

    #[tokio::test]
    async fn report_marks_eventless_extrinsics_and_keeps_order() {
        let chain = MockChain::development();
        let found = resolve(&chain, &BlockId::Height(1)).await.unwrap();
        let report = build_report(&chain, &found).await.unwrap();

        // extrinsic 0 only has ExtrinsicSuccess; extrinsic 1 has the
        // transfer event before its success event
        assert!(report.contains("timestamp.set:: system.ExtrinsicSuccess"));
        assert!(report.contains(
            "balances.transfer:: balances.Transfer, system.ExtrinsicSuccess"
        ));
        let timestamp_at = report.find("timestamp.set").unwrap();
        let transfer_at = report.find("balances.transfer").unwrap();
        assert!(timestamp_at < transfer_at);
    }

    #[tokio::test]
    async fn event_log_failure_propagates_unchanged() {
        let mut chain = MockChain::development();
        chain.fail_event_log(ChainError::Network("connection reset".to_string()));
        let found = resolve(&chain, &BlockId::Height(0)).await.unwrap();
        let err = build_report(&chain, &found).await.unwrap_err();
        assert_eq!(err, ChainError::Network("connection reset".to_string()));
    }
}
