//! Merkle path structure for inclusion verification.

use ark_bls12_381::Fr;

use super::TreeError;
use crate::poseidon::{combine_hash, Personalization};
use crate::VERIFICATION_TREE_DEPTH;

/// A leaf-to-root inclusion path.
///
/// `siblings[i]` is the sibling hash at level `i`; `directions[i]` is
/// true when the current node is the right child at that level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerklePath {
    siblings: Vec<Fr>,
    directions: Vec<bool>,
}

impl MerklePath {
    /// Create a path, checking that both sequences agree in length and
    /// fit inside the verification tree depth.
    pub fn new(siblings: Vec<Fr>, directions: Vec<bool>) -> Result<Self, TreeError> {
        if siblings.len() != directions.len() {
            return Err(TreeError::PathLengthMismatch {
                siblings: siblings.len(),
                directions: directions.len(),
            });
        }
        if siblings.len() > VERIFICATION_TREE_DEPTH {
            return Err(TreeError::DepthExceeded(siblings.len()));
        }
        Ok(Self {
            siblings,
            directions,
        })
    }

    /// Get the sibling hashes, leaf level first.
    pub fn siblings(&self) -> &[Fr] {
        &self.siblings
    }

    /// Get the direction at each level (true = current node is right child).
    pub fn directions(&self) -> &[bool] {
        &self.directions
    }

    /// Get the path depth (number of levels).
    pub fn depth(&self) -> usize {
        self.siblings.len()
    }

    /// Recompute the root this path implies for the given leaf.
    pub fn compute_root(&self, leaf: Fr) -> Result<Fr, TreeError> {
        let mut current = leaf;
        for (level, (sibling, &is_right)) in self
            .siblings
            .iter()
            .zip(self.directions.iter())
            .enumerate()
        {
            let (left, right) = if is_right {
                (*sibling, current)
            } else {
                (current, *sibling)
            };
            current = combine_hash(Personalization::MerkleLevel(level), left, right)?;
        }
        Ok(current)
    }
}
