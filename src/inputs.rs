//! Public input tuple assembly for the three proof families.
//!
//! The verifier binds these ordered tuples — not the raw call arguments —
//! into the pairing check, so the mapping from arguments to tuple slots
//! is part of the protocol contract with the prover and must stay stable.
//! All byte-level validation happens here, before any cryptographic work.

use ark_bls12_381::Fr;
use ark_ff::{One, Zero};
use thiserror::Error;

use crate::field::{decode_field, FieldError, FIELD_SIZE};
use crate::{FRIEND_TREE_DEPTH, MAX_VALUE_SLOTS};

/// Errors from public input decoding
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("{name}: {source}")]
    Field {
        name: &'static str,
        source: FieldError,
    },
    #[error("friend_directions must be {} bytes, got {0}", FRIEND_TREE_DEPTH)]
    DirectionsLength(usize),
    #[error("friend_directions[{index}] is {value}, expected 0 or 1")]
    DirectionNotBit { index: usize, value: u8 },
    #[error("vlist must be {} bytes, got {0}", MAX_VALUE_SLOTS * FIELD_SIZE)]
    ValueListLength(usize),
    #[error("vlist[{index}]: {source}")]
    ValueElement { index: usize, source: FieldError },
}

fn field_arg(name: &'static str, bytes: &[u8]) -> Result<Fr, InputError> {
    decode_field(bytes).map_err(|source| InputError::Field { name, source })
}

/// Public inputs bound by a pre-transfer proof.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreTransferInputs {
    pub commit_root: Fr,
    pub commit_root_t: Fr,
    pub address_new: Fr,
    pub nonce: Fr,
}

impl PreTransferInputs {
    /// Number of field elements in the bound tuple.
    pub const LEN: usize = 4;

    /// Decode and validate the raw protocol arguments.
    pub fn from_bytes(
        commit_root: &[u8],
        commit_root_t: &[u8],
        address_new: &[u8],
        nonce: &[u8],
    ) -> Result<Self, InputError> {
        Ok(Self {
            commit_root: field_arg("commit_root", commit_root)?,
            commit_root_t: field_arg("commit_root_t", commit_root_t)?,
            address_new: field_arg("address_new", address_new)?,
            nonce: field_arg("nonce", nonce)?,
        })
    }

    /// Tuple in protocol order:
    /// `[commit_root, commit_root_t, address_new, nonce]`.
    pub fn to_field_elements(&self) -> Vec<Fr> {
        vec![
            self.commit_root,
            self.commit_root_t,
            self.address_new,
            self.nonce,
        ]
    }
}

/// Public inputs bound by a preparation proof.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparationInputs {
    pub commit_root: Fr,
    pub friend_directions: [bool; FRIEND_TREE_DEPTH],
    pub nonce: Fr,
    pub pre_transfer_index: Fr,
    pub verification_root: Fr,
}

impl PreparationInputs {
    /// Number of field elements in the bound tuple.
    pub const LEN: usize = 4 + FRIEND_TREE_DEPTH;

    /// Decode and validate the raw protocol arguments. The direction
    /// buffer must hold exactly one byte per hop, each 0 or 1.
    pub fn from_bytes(
        commit_root: &[u8],
        friend_directions: &[u8],
        nonce: &[u8],
        pre_transfer_index: &[u8],
        verification_root: &[u8],
    ) -> Result<Self, InputError> {
        if friend_directions.len() != FRIEND_TREE_DEPTH {
            return Err(InputError::DirectionsLength(friend_directions.len()));
        }
        let mut directions = [false; FRIEND_TREE_DEPTH];
        for (index, &value) in friend_directions.iter().enumerate() {
            directions[index] = match value {
                0 => false,
                1 => true,
                value => return Err(InputError::DirectionNotBit { index, value }),
            };
        }

        Ok(Self {
            commit_root: field_arg("commit_root", commit_root)?,
            friend_directions: directions,
            nonce: field_arg("nonce", nonce)?,
            pre_transfer_index: field_arg("pre_transfer_index", pre_transfer_index)?,
            verification_root: field_arg("verification_root", verification_root)?,
        })
    }

    /// Tuple in protocol order:
    /// `[commit_root, d_0..d_3, nonce, pre_transfer_index, verification_root]`,
    /// with each direction publicized as 0 or 1.
    pub fn to_field_elements(&self) -> Vec<Fr> {
        let mut elements = Vec::with_capacity(Self::LEN);
        elements.push(self.commit_root);
        elements.extend(
            self.friend_directions
                .iter()
                .map(|&bit| if bit { Fr::one() } else { Fr::zero() }),
        );
        elements.push(self.nonce);
        elements.push(self.pre_transfer_index);
        elements.push(self.verification_root);
        elements
    }
}

/// Public inputs bound by a transfer proof.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferInputs {
    pub commit_root: Fr,
    /// Exactly [`MAX_VALUE_SLOTS`] signed value contributions.
    pub vlist: Vec<Fr>,
}

impl TransferInputs {
    /// Number of field elements in the bound tuple.
    pub const LEN: usize = 1 + MAX_VALUE_SLOTS;

    /// Decode and validate the raw protocol arguments. The value buffer
    /// is a fixed-width concatenation of canonical field elements.
    pub fn from_bytes(commit_root: &[u8], vlist: &[u8]) -> Result<Self, InputError> {
        let commit_root = field_arg("commit_root", commit_root)?;

        if vlist.len() != MAX_VALUE_SLOTS * FIELD_SIZE {
            return Err(InputError::ValueListLength(vlist.len()));
        }
        let mut values = Vec::with_capacity(MAX_VALUE_SLOTS);
        for (index, chunk) in vlist.chunks(FIELD_SIZE).enumerate() {
            values.push(
                decode_field(chunk).map_err(|source| InputError::ValueElement { index, source })?,
            );
        }

        Ok(Self {
            commit_root,
            vlist: values,
        })
    }

    /// Tuple in protocol order: `[commit_root, v_0..v_15]`.
    pub fn to_field_elements(&self) -> Vec<Fr> {
        let mut elements = Vec::with_capacity(Self::LEN);
        elements.push(self.commit_root);
        elements.extend_from_slice(&self.vlist);
        elements
    }
}
