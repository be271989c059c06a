use serde::{Deserialize, Serialize};

use crate::tree::hash_pair;

/// Indicates which side the sibling hash sits on when re-computing a parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProofSide {
    Left,
    Right,
}

/// A single step in a Merkle inclusion proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofNode {
    pub hash: String,
    pub side: ProofSide,
}

/// An inclusion proof for a single transaction hash.
///
/// Levels where the leaf's ancestor was carried forward without a sibling
/// contribute no step, so the path can be shorter than the tree height.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    /// The leaf hash being proved.
    pub leaf_hash: String,
    /// Ordered list of sibling hashes from leaf to root.
    pub path: Vec<ProofNode>,
}

impl MerkleProof {
    /// Returns `true` if following the proof path reproduces `expected_root`.
    pub fn verify(&self, expected_root: &str) -> bool {
        let computed = self
            .path
            .iter()
            .fold(self.leaf_hash.clone(), |current, node| match node.side {
                ProofSide::Left => hash_pair(&node.hash, &current),
                ProofSide::Right => hash_pair(&current, &node.hash),
            });

        computed == expected_root
    }
}
