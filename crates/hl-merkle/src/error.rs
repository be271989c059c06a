use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MerkleError {
    #[error("tree is empty")]
    Empty,

    #[error("leaf index {index} out of range for {len} leaves")]
    LeafOutOfRange { index: usize, len: usize },

    #[error("transaction hash not found in tree")]
    NotFound,
}
