//! Native domain-separated hash functions (outside circuits).

use ark_bls12_381::Fr;
use ark_crypto_primitives::sponge::poseidon::PoseidonSponge;
use ark_crypto_primitives::sponge::CryptographicSponge;
use ark_ff::One;
use thiserror::Error;

use super::config::poseidon_config;
use crate::field::{decode_field, encode_field, FieldError, FIELD_SIZE};
use crate::VERIFICATION_TREE_DEPTH;

/// Domain-separation tag for the two-to-one hash.
///
/// The wire protocol encodes this as a signed integer: −1 selects the
/// commitment hash, a non-negative value selects Merkle node combination
/// at that level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Personalization {
    /// Commitment/leaf hash (wire tag −1).
    Commitment,
    /// Combination of two nodes at the given level, counted from the
    /// leaves (level 0 combines two leaves).
    MerkleLevel(usize),
}

/// Errors from the hash primitive
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    #[error("merkle level {0} outside the supported range 0..{}", VERIFICATION_TREE_DEPTH)]
    LevelOutOfRange(usize),
    #[error("unknown personalization tag {0}")]
    UnknownTag(i64),
    #[error(transparent)]
    Field(#[from] FieldError),
}

impl Personalization {
    /// Parse the wire-protocol tag integer.
    pub fn from_raw(tag: i64) -> Result<Self, HashError> {
        match tag {
            -1 => Ok(Personalization::Commitment),
            level if level >= 0 => {
                let level = level as usize;
                if level < VERIFICATION_TREE_DEPTH {
                    Ok(Personalization::MerkleLevel(level))
                } else {
                    Err(HashError::LevelOutOfRange(level))
                }
            }
            other => Err(HashError::UnknownTag(other)),
        }
    }

    /// Field element absorbed ahead of the two hash inputs.
    fn tag_element(self) -> Result<Fr, HashError> {
        match self {
            Personalization::Commitment => Ok(-Fr::one()),
            Personalization::MerkleLevel(level) => {
                if level >= VERIFICATION_TREE_DEPTH {
                    return Err(HashError::LevelOutOfRange(level));
                }
                Ok(Fr::from(level as u64))
            }
        }
    }
}

fn sponge_hash(tag: Fr, a: Fr, b: Fr) -> Fr {
    let config = poseidon_config::<Fr>();
    let mut sponge = PoseidonSponge::new(&config);
    sponge.absorb(&tag);
    sponge.absorb(&a);
    sponge.absorb(&b);
    sponge.squeeze_field_elements(1)[0]
}

/// Compress two field elements into one under the given personalization.
pub fn combine_hash(personalization: Personalization, a: Fr, b: Fr) -> Result<Fr, HashError> {
    Ok(sponge_hash(personalization.tag_element()?, a, b))
}

/// Commitment hash of two field elements (wire tag −1).
pub fn commitment_hash(a: Fr, b: Fr) -> Fr {
    sponge_hash(-Fr::one(), a, b)
}

/// Byte-contract variant of [`combine_hash`].
///
/// Both inputs must be exactly [`FIELD_SIZE`] bytes and canonical; a
/// malformed input is a typed error, never a silently truncated or
/// zeroed output.
pub fn combine_hash_bytes(
    personalization: Personalization,
    a: &[u8],
    b: &[u8],
) -> Result<[u8; FIELD_SIZE], HashError> {
    let a = decode_field(a)?;
    let b = decode_field(b)?;
    let out = combine_hash(personalization, a, b)?;
    Ok(encode_field(&out))
}
