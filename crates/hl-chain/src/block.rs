use hl_merkle::{merkle_root, MerkleTree};
use hl_transaction::{sha256_hex, Timestamp, Transaction};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::GENESIS_PREVIOUS_HASH;

/// A block of transactions.
///
/// The Merkle root and the block hash are computed once, in that order, when
/// the block is built.  The only field that can change afterwards is
/// `previous_hash`, which [`crate::Chain::append`] overwrites with the tail
/// hash without rehashing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Position in the chain (genesis = 0).
    index: u64,

    /// Creation time of the block.
    timestamp: Timestamp,

    /// Hash of the preceding block, or `"0"` for genesis.
    previous_hash: String,

    /// All transactions bundled in this block, in insertion order.
    transactions: Vec<Transaction>,

    /// Merkle root over the transaction hashes; empty when there are none.
    merkle_root: String,

    /// `sha256_hex(index || timestamp || previous_hash || merkle_root)` as
    /// of construction.
    hash: String,
}

impl Block {
    pub fn new(
        index: u64,
        timestamp: Timestamp,
        previous_hash: impl Into<String>,
        transactions: Vec<Transaction>,
    ) -> Self {
        let previous_hash = previous_hash.into();
        let merkle_root = Self::calculate_merkle_root(&transactions);
        let hash = Self::calculate_hash(index, &timestamp, &previous_hash, &merkle_root);
        debug!(index, txs = transactions.len(), %merkle_root, %hash, "block built");

        Self {
            index,
            timestamp,
            previous_hash,
            transactions,
            merkle_root,
            hash,
        }
    }

    /// The first block of a chain: index 0, no transactions, previous hash
    /// `"0"`.
    pub fn genesis(timestamp: Timestamp) -> Self {
        Self::new(0, timestamp, GENESIS_PREVIOUS_HASH, Vec::new())
    }

    pub fn calculate_merkle_root(transactions: &[Transaction]) -> String {
        let hashes: Vec<&str> = transactions.iter().map(Transaction::hash).collect();
        merkle_root(&hashes)
    }

    pub fn calculate_hash(
        index: u64,
        timestamp: &Timestamp,
        previous_hash: &str,
        merkle_root: &str,
    ) -> String {
        sha256_hex(format!("{index}{timestamp}{previous_hash}{merkle_root}"))
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn previous_hash(&self) -> &str {
        &self.previous_hash
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn merkle_root(&self) -> &str {
        &self.merkle_root
    }

    /// Hex-encoded block hash fixed at construction.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Merkle root over the current transaction list.
    pub fn recompute_merkle_root(&self) -> String {
        Self::calculate_merkle_root(&self.transactions)
    }

    /// Block hash over the current header fields.
    pub fn recompute_hash(&self) -> String {
        Self::calculate_hash(self.index, &self.timestamp, &self.previous_hash, &self.merkle_root)
    }

    /// True when the stored hash still covers the current header.  Becomes
    /// false if `append` rewrote `previous_hash` to a different value.
    pub fn is_sealed(&self) -> bool {
        self.hash == self.recompute_hash()
    }

    /// Full tree over this block's transactions, for inclusion proofs.
    pub fn merkle_tree(&self) -> MerkleTree {
        MerkleTree::new(&self.transactions)
    }

    /// Point this block at a new predecessor.  The stored hash is left as it
    /// was.
    pub(crate) fn relink(&mut self, previous_hash: String) {
        self.previous_hash = previous_hash;
    }
}
