//! Dense fixed-depth commitment tree built from the hash primitive.

use ark_bls12_381::Fr;

use super::{MerklePath, TreeError};
use crate::poseidon::{combine_hash, Personalization};
use crate::VERIFICATION_TREE_DEPTH;

/// A complete binary Merkle tree over a power-of-two leaf set.
///
/// Leaves are commitments; every internal node is the two-to-one hash of
/// its children personalized with the level at which they combine. The
/// tree holds no persistent storage concerns; durable state lives with
/// the external tree-maintenance component.
#[derive(Clone, Debug)]
pub struct CommitmentTree {
    /// levels[0] = leaves, levels[depth] = [root]
    levels: Vec<Vec<Fr>>,
}

impl CommitmentTree {
    /// Build a tree from a power-of-two number of leaves.
    pub fn from_leaves(leaves: &[Fr]) -> Result<Self, TreeError> {
        if leaves.is_empty() {
            return Err(TreeError::EmptyLeaves);
        }
        if !leaves.len().is_power_of_two() {
            return Err(TreeError::LeafCountNotPowerOfTwo(leaves.len()));
        }
        let depth = leaves.len().trailing_zeros() as usize;
        if depth > VERIFICATION_TREE_DEPTH {
            return Err(TreeError::DepthExceeded(depth));
        }

        let mut levels = Vec::with_capacity(depth + 1);
        levels.push(leaves.to_vec());
        for level in 0..depth {
            let prev = &levels[level];
            let mut next = Vec::with_capacity(prev.len() / 2);
            for pair in prev.chunks(2) {
                next.push(combine_hash(
                    Personalization::MerkleLevel(level),
                    pair[0],
                    pair[1],
                )?);
            }
            levels.push(next);
        }

        Ok(Self { levels })
    }

    /// Get the tree depth.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Get the number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Get the current root hash.
    pub fn root(&self) -> Fr {
        self.levels[self.depth()][0]
    }

    /// Get a leaf by index.
    pub fn leaf(&self, index: usize) -> Result<Fr, TreeError> {
        self.levels[0]
            .get(index)
            .copied()
            .ok_or(TreeError::IndexOutOfRange {
                index,
                leaves: self.leaf_count(),
            })
    }

    /// Generate the inclusion path for the given leaf index.
    pub fn path(&self, index: usize) -> Result<MerklePath, TreeError> {
        if index >= self.leaf_count() {
            return Err(TreeError::IndexOutOfRange {
                index,
                leaves: self.leaf_count(),
            });
        }

        let mut siblings = Vec::with_capacity(self.depth());
        let mut directions = Vec::with_capacity(self.depth());
        let mut current_index = index;
        for level in 0..self.depth() {
            siblings.push(self.levels[level][current_index ^ 1]);
            directions.push(current_index & 1 == 1);
            current_index >>= 1;
        }

        MerklePath::new(siblings, directions)
    }
}
