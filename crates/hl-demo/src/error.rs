use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("invalid transaction {0:?}: expected SENDER:RECIPIENT:AMOUNT")]
    InvalidTransaction(String),

    #[error("invalid amount {0:?}")]
    InvalidAmount(String),

    #[error("serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),

    #[error("chain error: {0}")]
    Chain(#[from] hl_chain::ChainError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
