use std::str::FromStr;

use hl_transaction::Amount;

use crate::DemoError;

/// How the demo block is attached to the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkMode {
    /// Build the block against the tail hash, then hand it to
    /// `Chain::append`, which rewrites `previous_hash` without rehashing.
    #[default]
    Append,
    /// Let `Chain::add_block` resolve the tail before building the block.
    Build,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// A transaction to put in the demo block, parsed from
/// `SENDER:RECIPIENT:AMOUNT`.
#[derive(Debug, Clone, PartialEq)]
pub struct TxSpec {
    pub sender: String,
    pub recipient: String,
    pub amount: Amount,
}

impl TxSpec {
    pub fn new(sender: &str, recipient: &str, amount: impl Into<Amount>) -> Self {
        Self {
            sender: sender.to_owned(),
            recipient: recipient.to_owned(),
            amount: amount.into(),
        }
    }
}

impl FromStr for TxSpec {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Split from the right: the sender may itself contain ':'.
        let mut parts = s.rsplitn(3, ':');
        let (Some(amount), Some(recipient), Some(sender)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(DemoError::InvalidTransaction(s.to_owned()));
        };

        Ok(Self {
            sender: sender.to_owned(),
            recipient: recipient.to_owned(),
            amount: parse_amount(amount)?,
        })
    }
}

/// Integers stay integers; anything else that parses as a float is a
/// decimal amount.
fn parse_amount(s: &str) -> Result<Amount, DemoError> {
    let s = s.trim();
    if let Ok(v) = s.parse::<i64>() {
        return Ok(Amount::Integer(v));
    }
    s.parse::<f64>()
        .map(Amount::Decimal)
        .map_err(|_| DemoError::InvalidAmount(s.to_owned()))
}

/// Full configuration for one demo run.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Transactions bundled into the single demo block.
    pub transactions: Vec<TxSpec>,

    pub link_mode: LinkMode,

    pub format: OutputFormat,

    /// Run chain verification after building and report the outcome.
    pub verify: bool,

    /// When `true` the binary suppresses log output.  The library itself
    /// does not initialise a tracing subscriber.
    pub quiet: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            transactions: vec![
                TxSpec::new("Alice", "Bob", 10),
                TxSpec::new("Bob", "Charlie", 5),
            ],
            link_mode: LinkMode::default(),
            format: OutputFormat::default(),
            verify: false,
            quiet: false,
        }
    }
}
