use hl_chain::{Block, Chain};
use hl_transaction::{Clock, Transaction};
use tracing::info;

use crate::{DemoConfig, DemoError, LinkMode};

/// Build a chain of genesis plus one block holding the configured
/// transactions, linked the way `config.link_mode` asks for.
pub fn build_chain(config: &DemoConfig, clock: &impl Clock) -> Result<Chain, DemoError> {
    let mut chain = Chain::with_clock(clock);

    let transactions: Vec<Transaction> = config
        .transactions
        .iter()
        .map(|spec| {
            Transaction::new(
                spec.sender.as_str(),
                spec.recipient.as_str(),
                spec.amount,
                clock,
            )
        })
        .collect();

    match config.link_mode {
        LinkMode::Append => {
            let block = Block::new(1, clock.now(), chain.latest().hash(), transactions);
            chain.append(block);
        }
        LinkMode::Build => {
            chain.add_block(transactions, clock)?;
        }
    }

    info!(
        blocks = chain.len(),
        tip = chain.latest().hash(),
        mode = ?config.link_mode,
        "demo chain built"
    );
    Ok(chain)
}
