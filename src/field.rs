//! Canonical byte encoding of scalar field elements.
//!
//! The wire format is fixed-width little-endian, matching the proving
//! system. Encodings of values at or above the field order are invalid
//! input and are rejected, never silently reduced.

use ark_bls12_381::Fr;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use thiserror::Error;

/// Width of a canonical field element encoding in bytes.
pub const FIELD_SIZE: usize = 32;

/// Errors from canonical field decoding
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("field element must be {} bytes, got {0}", FIELD_SIZE)]
    Length(usize),
    #[error("field element encoding is not a canonical representative")]
    NonCanonical,
}

/// Decode a canonical little-endian field element.
pub fn decode_field(bytes: &[u8]) -> Result<Fr, FieldError> {
    if bytes.len() != FIELD_SIZE {
        return Err(FieldError::Length(bytes.len()));
    }
    // deserialize_compressed rejects values >= the field order
    Fr::deserialize_compressed(bytes).map_err(|_| FieldError::NonCanonical)
}

/// Encode a field element to its canonical little-endian form.
pub fn encode_field(fr: &Fr) -> [u8; FIELD_SIZE] {
    let mut bytes = [0u8; FIELD_SIZE];
    fr.serialize_compressed(&mut bytes[..])
        .expect("Fr serializes to exactly FIELD_SIZE bytes");
    bytes
}
