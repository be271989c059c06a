use hl_merkle::MerkleProof;
use hl_transaction::{Clock, SystemClock, Transaction};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{block::Block, error::ChainError, GENESIS_PREVIOUS_HASH};

/// The append-only chain of [`Block`]s.
///
/// Always contains at least the genesis block.  Linkage between blocks is
/// set by [`Chain::append`] and [`Chain::add_block`] but not structurally
/// enforced; [`Chain::verify`] checks it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawChain")]
pub struct Chain {
    blocks: Vec<Block>,
}

/// Deserialisation shape; rejects an empty block list so that
/// [`Chain::latest`] always has a block to return.
#[derive(Deserialize)]
struct RawChain {
    blocks: Vec<Block>,
}

impl TryFrom<RawChain> for Chain {
    type Error = ChainError;

    fn try_from(raw: RawChain) -> Result<Self, Self::Error> {
        if raw.blocks.is_empty() {
            return Err(ChainError::InvalidGenesis("chain has no blocks"));
        }
        Ok(Self { blocks: raw.blocks })
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new()
    }
}

impl Chain {
    /// Initialise a new chain with a genesis block stamped by the system
    /// clock.
    pub fn new() -> Self {
        Self::with_clock(&SystemClock)
    }

    pub fn with_clock(clock: &impl Clock) -> Self {
        Self {
            blocks: vec![Self::genesis(clock)],
        }
    }

    pub fn genesis(clock: &impl Clock) -> Block {
        Block::genesis(clock.now())
    }

    /// Number of blocks in the chain (including genesis).
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The most recent block.
    pub fn latest(&self) -> &Block {
        // Genesis is pushed on construction and blocks are never removed.
        &self.blocks[self.blocks.len() - 1]
    }

    /// Append `block`, first pointing its `previous_hash` at the current
    /// tail.
    ///
    /// The block's stored hash is *not* recomputed, so if it was built with a
    /// different tentative previous hash its hash no longer covers the value
    /// now stored.  [`Chain::verify`] reports such a block as a
    /// [`ChainError::HashMismatch`].
    pub fn append(&mut self, mut block: Block) {
        let tail_hash = self.latest().hash().to_owned();
        if block.previous_hash() != tail_hash {
            warn!(
                index = block.index(),
                tentative = block.previous_hash(),
                tail = %tail_hash,
                "previous hash rewritten on append; block hash not recomputed"
            );
        }
        block.relink(tail_hash);
        debug!(index = block.index(), hash = block.hash(), "block appended");
        self.blocks.push(block);
    }

    /// Build a block on top of the current tail and append it.
    ///
    /// Unlike [`Chain::append`], the tail hash and next index are resolved
    /// before the block is built, so its hash covers its final
    /// `previous_hash` and the block is never mutated.
    ///
    /// Fails only when the tail index is already `u64::MAX`.
    pub fn add_block(
        &mut self,
        transactions: Vec<Transaction>,
        clock: &impl Clock,
    ) -> Result<&Block, ChainError> {
        let tip = self.latest();
        let index = tip
            .index()
            .checked_add(1)
            .ok_or(ChainError::IndexOverflow(tip.index()))?;
        let block = Block::new(index, clock.now(), tip.hash(), transactions);
        debug!(index, hash = block.hash(), "block added");
        self.blocks.push(block);
        Ok(self.latest())
    }

    /// Return a reference to a block by its index.
    pub fn get(&self, index: u64) -> Option<&Block> {
        usize::try_from(index).ok().and_then(|i| self.blocks.get(i))
    }

    /// Return all blocks from `start_index` onward (inclusive).
    pub fn blocks_from(&self, start_index: u64) -> &[Block] {
        match usize::try_from(start_index) {
            Ok(pos) if pos < self.blocks.len() => &self.blocks[pos..],
            _ => &[],
        }
    }

    /// All blocks in the chain.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Inclusion proof for the transaction with hash `tx_hash` in block
    /// `block_index`.  Verify it against that block's merkle root.
    pub fn transaction_proof(
        &self,
        block_index: u64,
        tx_hash: &str,
    ) -> Result<MerkleProof, ChainError> {
        let block = self
            .get(block_index)
            .ok_or(ChainError::BlockNotFound(block_index))?;
        Ok(block.merkle_tree().proof_for_hash(tx_hash)?)
    }

    /// Validate the full chain structure, stopping at the first failure:
    /// - the genesis block has index 0, previous hash `"0"` and no
    ///   transactions;
    /// - indices are contiguous;
    /// - each stored merkle root and hash match a recomputation;
    /// - each `previous_hash` matches the hash of the preceding block.
    pub fn verify(&self) -> Result<(), ChainError> {
        let result = self.check();
        if let Err(err) = &result {
            warn!(%err, "chain verification failed");
        }
        result
    }

    pub fn is_valid(&self) -> bool {
        self.verify().is_ok()
    }

    fn check(&self) -> Result<(), ChainError> {
        let genesis = self
            .blocks
            .first()
            .ok_or(ChainError::InvalidGenesis("chain has no blocks"))?;
        if genesis.index() != 0 {
            return Err(ChainError::InvalidGenesis("index must be 0"));
        }
        if genesis.previous_hash() != GENESIS_PREVIOUS_HASH {
            return Err(ChainError::InvalidGenesis("previous hash must be \"0\""));
        }
        if !genesis.transactions().is_empty() {
            return Err(ChainError::InvalidGenesis("must not carry transactions"));
        }
        check_sealed(genesis)?;

        for window in self.blocks.windows(2) {
            let (prev, next) = (&window[0], &window[1]);

            if prev.index().checked_add(1) != Some(next.index()) {
                return Err(ChainError::IndexGap {
                    previous: prev.index(),
                    index: next.index(),
                });
            }
            check_sealed(next)?;
            if next.previous_hash() != prev.hash() {
                return Err(ChainError::BrokenLink {
                    previous: prev.index(),
                    index: next.index(),
                });
            }
        }

        Ok(())
    }
}

fn check_sealed(block: &Block) -> Result<(), ChainError> {
    let index = block.index();
    if block.recompute_merkle_root() != block.merkle_root() {
        return Err(ChainError::MerkleMismatch { index });
    }
    if !block.is_sealed() {
        return Err(ChainError::HashMismatch { index });
    }
    Ok(())
}
