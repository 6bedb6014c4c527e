//! Verification core for a confidential-transfer protocol.
//!
//! This crate implements the checks that gate state transitions of a
//! Merkle commitment tree:
//! - a domain-separated two-to-one Poseidon hash, used both as the
//!   commitment combiner and as the Merkle node combiner,
//! - the commitment-tree path/root model shared by tree maintainers and
//!   the proof verifier,
//! - Groth16 verification (over BLS12-381) of the three proof families
//!   that advance the tree: pre-transfer, preparation and transfer.
//!
//! Proof generation, trusted setup, tree storage and transport live in
//! external components; this crate only consumes their byte-level
//! artifacts (canonical field encodings, proof and verifying-key blobs)
//! and never retains a reference to a caller's buffer past the call.
//!
//! Every operation is pure and stateless, so callers may verify batches
//! of proofs concurrently with no coordination beyond collecting results.

pub mod field;
pub mod inputs;
pub mod merkle;
pub mod poseidon;
pub mod verify;

#[cfg(test)]
mod tests;

pub use field::{decode_field, encode_field, FieldError, FIELD_SIZE};
pub use inputs::{InputError, PreTransferInputs, PreparationInputs, TransferInputs};
pub use merkle::{CommitmentTree, MerklePath, TreeError};
pub use poseidon::{
    combine_hash, combine_hash_bytes, commitment_hash, poseidon_config, HashError,
    Personalization,
};
pub use verify::{
    decode_proof, decode_verifying_key, verify_pre_transfer, verify_pre_transfer_proof,
    verify_preparation, verify_preparation_proof, verify_transfer, verify_transfer_proof,
    VerifyError,
};

pub use ark_bls12_381::Fr;

/// Depth of the friend/anonymity-set tree.
pub const FRIEND_TREE_DEPTH: usize = 4;

/// Depth of the verification-record tree. Merkle level personalizations
/// are legal in `0..VERIFICATION_TREE_DEPTH`.
///
/// Levels are counted from the leaves (level 0 combines two leaves) and
/// the left child is the first hash input. These conventions are fixed
/// protocol constants agreed with the prover, not per-call parameters.
pub const VERIFICATION_TREE_DEPTH: usize = 32;

/// Number of value slots in a transfer proof's `vlist`.
pub const MAX_VALUE_SLOTS: usize = 1 << FRIEND_TREE_DEPTH;
