use std::io::Write;

use hl_chain::Chain;

use crate::{DemoError, OutputFormat};

pub fn render(chain: &Chain, format: OutputFormat, out: &mut impl Write) -> Result<(), DemoError> {
    match format {
        OutputFormat::Text => render_text(chain, out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, chain)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Human-readable listing: header fields of each block followed by its
/// transfers.
pub fn render_text(chain: &Chain, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "Blockchain:")?;
    for block in chain.blocks() {
        writeln!(out, "Block #{}", block.index())?;
        writeln!(out, "Timestamp: {}", block.timestamp())?;
        writeln!(out, "Previous Hash: {}", block.previous_hash())?;
        writeln!(out, "Merkle Root: {}", block.merkle_root())?;
        writeln!(out, "Hash: {}", block.hash())?;
        writeln!(out, "Transactions:")?;
        for tx in block.transactions() {
            writeln!(
                out,
                "Sender: {}, Recipient: {}, Amount: {}",
                tx.sender(),
                tx.recipient(),
                tx.amount()
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}
