use thiserror::Error;

/// Integrity failures reported by [`crate::Chain::verify`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("invalid genesis block: {0}")]
    InvalidGenesis(&'static str),

    #[error("block {index} follows block {previous}: indices must be contiguous")]
    IndexGap { previous: u64, index: u64 },

    #[error("block {index}: stored merkle root does not match its transactions")]
    MerkleMismatch { index: u64 },

    #[error("block {index}: stored hash does not match its header")]
    HashMismatch { index: u64 },

    #[error("block {index}: previous hash does not match the hash of block {previous}")]
    BrokenLink { previous: u64, index: u64 },

    #[error("cannot add a block after index {0}")]
    IndexOverflow(u64),

    #[error("block index {0} not found")]
    BlockNotFound(u64),

    #[error("merkle error: {0}")]
    Merkle(#[from] hl_merkle::MerkleError),
}
