use hl_transaction::{sha256_hex, Transaction};
use tracing::trace;

use crate::{
    error::MerkleError,
    proof::{MerkleProof, ProofNode, ProofSide},
};

/// Parent hash: SHA-256 over the two child hex strings concatenated as text.
pub(crate) fn hash_pair(left: &str, right: &str) -> String {
    let mut combined = String::with_capacity(left.len() + right.len());
    combined.push_str(left);
    combined.push_str(right);
    sha256_hex(combined)
}

/// Reduce one level: pairs are hashed left to right and an unpaired trailing
/// hash is carried forward unchanged.
fn next_level<S: AsRef<str>>(level: &[S]) -> Vec<String> {
    level
        .chunks(2)
        .map(|chunk| match chunk {
            [left, right] => hash_pair(left.as_ref(), right.as_ref()),
            [last] => last.as_ref().to_owned(),
            _ => unreachable!("chunks(2) yields one or two items"),
        })
        .collect()
}

/// Merkle root of an ordered list of hex hashes.
///
/// An empty list gives the empty string and a single hash is returned as is,
/// without hashing it again.  Odd levels are never padded by duplication.
pub fn merkle_root<S: AsRef<str>>(hashes: &[S]) -> String {
    match hashes {
        [] => String::new(),
        [only] => only.as_ref().to_owned(),
        _ => {
            let mut level = next_level(hashes);
            while level.len() > 1 {
                level = next_level(&level);
            }
            level.swap_remove(0)
        }
    }
}

/// A binary Merkle tree over transaction hashes, keeping every level so that
/// inclusion proofs can be produced.
///
/// Built with the same reduction as [`merkle_root`], so
/// `tree.root_hash() == merkle_root(leaves)` for any input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MerkleTree {
    /// `levels[0]` = leaf hashes, `levels[last]` = single root hash.
    /// No levels at all for an empty tree.
    levels: Vec<Vec<String>>,
}

impl MerkleTree {
    /// Build a tree from the hashes of `transactions`, in order.
    pub fn new(transactions: &[Transaction]) -> Self {
        Self::from_hashes(transactions.iter().map(|tx| tx.hash().to_owned()).collect())
    }

    pub fn from_hashes(leaves: Vec<String>) -> Self {
        if leaves.is_empty() {
            return Self::default();
        }

        let mut levels = vec![leaves];
        while let Some(top) = levels.last().filter(|l| l.len() > 1) {
            let parent = next_level(top);
            levels.push(parent);
        }
        trace!(leaves = levels[0].len(), height = levels.len(), "merkle tree built");

        Self { levels }
    }

    /// Hex-encoded root, or the empty string for an empty tree.
    pub fn root_hash(&self) -> &str {
        self.levels
            .last()
            .and_then(|l| l.first())
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn leaves(&self) -> &[String] {
        self.levels.first().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of levels including leaves and root.
    pub fn height(&self) -> usize {
        self.levels.len()
    }

    /// Build an inclusion proof for the leaf at `leaf_index`.
    pub fn proof(&self, leaf_index: usize) -> Result<MerkleProof, MerkleError> {
        let leaves = self.levels.first().ok_or(MerkleError::Empty)?;
        let leaf_hash = leaves
            .get(leaf_index)
            .cloned()
            .ok_or(MerkleError::LeafOutOfRange {
                index: leaf_index,
                len: leaves.len(),
            })?;

        let mut path = Vec::new();
        let mut index = leaf_index;

        for level in &self.levels[..self.levels.len() - 1] {
            let sibling = if index % 2 == 1 {
                Some((index - 1, ProofSide::Left))
            } else if index + 1 < level.len() {
                Some((index + 1, ProofSide::Right))
            } else {
                // Carried forward: no sibling on this level.
                None
            };

            if let Some((sibling_index, side)) = sibling {
                path.push(ProofNode {
                    hash: level[sibling_index].clone(),
                    side,
                });
            }

            index /= 2;
        }

        Ok(MerkleProof { leaf_hash, path })
    }

    /// Inclusion proof for the first leaf equal to `hash`.
    pub fn proof_for_hash(&self, hash: &str) -> Result<MerkleProof, MerkleError> {
        if self.is_empty() {
            return Err(MerkleError::Empty);
        }
        let index = self
            .leaves()
            .iter()
            .position(|leaf| leaf == hash)
            .ok_or(MerkleError::NotFound)?;
        self.proof(index)
    }
}

#[cfg(test)]
mod tests {
    use hl_transaction::{is_hex_digest, Timestamp, Transaction, HEX_DIGEST_LEN};
    use rand::{seq::SliceRandom, Rng};

    use super::*;

    fn leaf(i: usize) -> String {
        sha256_hex(format!("leaf-{i}"))
    }

    fn leaves(n: usize) -> Vec<String> {
        (0..n).map(leaf).collect()
    }

    #[test]
    fn empty_list_gives_empty_root() {
        assert_eq!(merkle_root::<String>(&[]), "");
        assert_eq!(MerkleTree::from_hashes(vec![]).root_hash(), "");
    }

    #[test]
    fn single_hash_is_returned_unchanged() {
        let h = leaf(0);
        assert_eq!(merkle_root(&[h.clone()]), h);
    }

    #[test]
    fn two_hashes_are_hashed_as_concatenated_text() {
        let (h0, h1) = (leaf(0), leaf(1));
        assert_eq!(merkle_root(&[&h0, &h1]), sha256_hex(format!("{h0}{h1}")));
    }

    #[test]
    fn odd_trailing_hash_is_carried_forward() {
        let (h0, h1, h2) = (leaf(0), leaf(1), leaf(2));
        let expected = sha256_hex(format!("{}{h2}", sha256_hex(format!("{h0}{h1}"))));
        assert_eq!(merkle_root(&[h0, h1, h2]), expected);
    }

    #[test]
    fn five_leaves_carry_twice() {
        let h = leaves(5);
        let p01 = hash_pair(&h[0], &h[1]);
        let p23 = hash_pair(&h[2], &h[3]);
        let expected = hash_pair(&hash_pair(&p01, &p23), &h[4]);
        assert_eq!(merkle_root(&h), expected);
        assert_eq!(expected.len(), HEX_DIGEST_LEN);
        assert!(is_hex_digest(&expected));
    }

    #[test]
    fn root_is_order_sensitive() {
        let h = leaves(2);
        let reversed: Vec<String> = h.iter().rev().cloned().collect();
        assert_ne!(merkle_root(&h), merkle_root(&reversed));
    }

    #[test]
    fn shuffled_leaves_change_the_root() {
        let mut rng = rand::thread_rng();
        let original = leaves(8);
        let mut shuffled = original.clone();
        while shuffled == original {
            shuffled.shuffle(&mut rng);
        }
        assert_ne!(merkle_root(&original), merkle_root(&shuffled));
    }

    #[test]
    fn tree_root_matches_merkle_root() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let h = leaves(rng.gen_range(0..=17));
            assert_eq!(MerkleTree::from_hashes(h.clone()).root_hash(), merkle_root(&h));
        }
    }

    #[test]
    fn tree_from_transactions_uses_their_hashes() {
        let ts = Timestamp::from_secs_f64(1.0);
        let txs = vec![
            Transaction::at("Alice", "Bob", 10, ts),
            Transaction::at("Bob", "Charlie", 5, ts),
        ];
        let tree = MerkleTree::new(&txs);
        assert_eq!(tree.leaves(), [txs[0].hash(), txs[1].hash()]);
        assert_eq!(tree.root_hash(), hash_pair(txs[0].hash(), txs[1].hash()));
    }

    #[test]
    fn proof_verifies_every_leaf() {
        for n in 1..=9 {
            let tree = MerkleTree::from_hashes(leaves(n));
            let root = tree.root_hash().to_owned();
            for i in 0..n {
                let proof = tree.proof(i).unwrap();
                assert!(proof.verify(&root), "proof failed for leaf {i} of {n}");
            }
        }
    }

    #[test]
    fn single_leaf_proof_is_empty() {
        let tree = MerkleTree::from_hashes(leaves(1));
        let proof = tree.proof(0).unwrap();
        assert!(proof.path.is_empty());
        assert!(proof.verify(tree.root_hash()));
    }

    #[test]
    fn carried_leaf_skips_levels() {
        // Leaf 4 of 5 has no sibling until the final level.
        let tree = MerkleTree::from_hashes(leaves(5));
        let proof = tree.proof(4).unwrap();
        assert_eq!(proof.path.len(), 1);
        assert_eq!(proof.path[0].side, ProofSide::Left);
    }

    #[test]
    fn tampered_root_fails_verification() {
        let tree = MerkleTree::from_hashes(leaves(4));
        let proof = tree.proof(2).unwrap();
        assert!(!proof.verify(&leaf(99)));
    }

    #[test]
    fn proof_errors() {
        assert_eq!(MerkleTree::default().proof(0), Err(MerkleError::Empty));
        assert_eq!(
            MerkleTree::from_hashes(leaves(3)).proof(3),
            Err(MerkleError::LeafOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            MerkleTree::from_hashes(leaves(3)).proof_for_hash(&leaf(7)),
            Err(MerkleError::NotFound)
        );
    }

    #[test]
    fn proof_for_hash_finds_leaf() {
        let tree = MerkleTree::from_hashes(leaves(6));
        let proof = tree.proof_for_hash(&leaf(3)).unwrap();
        assert_eq!(proof.leaf_hash, leaf(3));
        assert!(proof.verify(tree.root_hash()));
    }
}
