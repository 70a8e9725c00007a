//! Block-side data model: identifiers, headers, extrinsics

use crate::infrastructure::chain::ChainError;

/// How the user asked to look a block up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    BlockNumber,
    BlockHash,
}

impl SearchMode {
    pub fn title(&self) -> &'static str {
        match self {
            SearchMode::BlockNumber => "by Block Number",
            SearchMode::BlockHash => "by Block Hash",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            SearchMode::BlockNumber => "# Block Number",
            SearchMode::BlockHash => "Block Hash #",
        }
    }

    pub fn toggled(&self) -> SearchMode {
        match self {
            SearchMode::BlockNumber => SearchMode::BlockHash,
            SearchMode::BlockHash => SearchMode::BlockNumber,
        }
    }
}

/// A user-supplied block identifier, constructed once per search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockId {
    Height(u64),
    Hash(String),
}

/// Expected length of a `0x`-prefixed 32-byte hash string
const HASH_LEN: usize = 66;

impl BlockId {
    /// Parse raw input under the declared search mode.
    ///
    /// Height mode wants a non-negative integer; hash mode wants a
    /// fixed-length hex string. Anything else is `InvalidInput`.
    pub fn parse(mode: SearchMode, text: &str) -> Result<Self, ChainError> {
        let trimmed = text.trim();
        match mode {
            SearchMode::BlockNumber => trimmed
                .parse::<u64>()
                .map(BlockId::Height)
                .map_err(|_| {
                    ChainError::InvalidInput(format!("'{trimmed}' is not a block number"))
                }),
            SearchMode::BlockHash => {
                let payload = trimmed.strip_prefix("0x").ok_or_else(|| {
                    ChainError::InvalidInput(format!("'{trimmed}' is not a 0x-prefixed hash"))
                })?;
                if trimmed.len() != HASH_LEN || hex::decode(payload).is_err() {
                    return Err(ChainError::InvalidInput(format!(
                        "'{trimmed}' is not a {HASH_LEN}-char hex hash"
                    )));
                }
                Ok(BlockId::Hash(trimmed.to_string()))
            }
        }
    }
}

/// A block's identifying summary, without its body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub number: u64,
    pub hash: String,
}

/// One call included in a block. Its position in `Block::extrinsics`
/// is the correlation key for the event log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extrinsic {
    pub signed: bool,
    pub section: String,
    pub method: String,
    pub args: Vec<String>,
    pub docs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub header: Header,
    pub extrinsics: Vec<Extrinsic>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_HASH: &str =
        "0x1d4a1f212b44912e2a75ba7cbb0aadcbd8bd2eb53b0b1e3ed7e57ae0ffa5a125";

    #[test]
    fn parses_height() {
        let id = BlockId::parse(SearchMode::BlockNumber, " 100 ").unwrap();
        assert_eq!(id, BlockId::Height(100));
    }

    #[test]
    fn rejects_negative_and_garbage_heights() {
        for text in ["-1", "abc", "1.5", ""] {
            let err = BlockId::parse(SearchMode::BlockNumber, text).unwrap_err();
            assert!(matches!(err, ChainError::InvalidInput(_)), "{text}");
        }
    }

    #[test]
    fn parses_well_formed_hash() {
        let id = BlockId::parse(SearchMode::BlockHash, GOOD_HASH).unwrap();
        assert_eq!(id, BlockId::Hash(GOOD_HASH.to_string()));
    }

    #[test]
    fn rejects_malformed_hashes() {
        for text in ["0x1234", "deadbeef", &GOOD_HASH.replace('1', "z")] {
            let err = BlockId::parse(SearchMode::BlockHash, text).unwrap_err();
            assert!(matches!(err, ChainError::InvalidInput(_)), "{text}");
        }
    }
}
