pub mod block;
pub mod chain;
pub mod error;

pub use block::Block;
pub use chain::Chain;
pub use error::ChainError;

/// `previous_hash` recorded in the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "0";
