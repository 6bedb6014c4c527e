//! Commitment tree model shared by tree maintainers and the verifier.
//!
//! This module provides:
//! - [`MerklePath`]: ordered sibling/direction pairs proving a leaf's
//!   inclusion under a root
//! - [`CommitmentTree`]: a dense fixed-depth binary tree built from the
//!   hash primitive
//!
//! Internal nodes are produced by the two-to-one hash with the level
//! index as personalization, counted from the leaves. Two trees sharing
//! a root are equal only up to the leaves actually covered by presented
//! paths; full-tree equality is a property of the proof system's
//! soundness, never of a root comparison alone.

mod path;
mod tree;


pub use path::MerklePath;
pub use tree::CommitmentTree;

use thiserror::Error;

use crate::poseidon::HashError;
use crate::VERIFICATION_TREE_DEPTH;

/// Errors from the commitment tree model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("sibling and direction sequences differ in length ({siblings} vs {directions})")]
    PathLengthMismatch { siblings: usize, directions: usize },
    #[error("depth {0} exceeds the verification tree depth {}", VERIFICATION_TREE_DEPTH)]
    DepthExceeded(usize),
    #[error("tree has no leaves")]
    EmptyLeaves,
    #[error("leaf count {0} is not a power of two")]
    LeafCountNotPowerOfTwo(usize),
    #[error("leaf index {index} out of range for {leaves} leaves")]
    IndexOutOfRange { index: usize, leaves: usize },
    #[error(transparent)]
    Hash(#[from] HashError),
}
