//! Proof verification gateway for the three proof families.
//!
//! Every operation is a pure predicate over caller-borrowed buffers with
//! a tri-state outcome: `Ok(true)` (proof accepted), `Ok(false)` (proof
//! rejected — an expected, cheap, side-effect-free result), or a typed
//! error distinguishing a caller contract violation from structurally
//! invalid cryptographic data. No failure path panics on
//! attacker-controlled input, and verification never retries: identical
//! inputs always produce identical results.
//!
//! The shared skeleton: decode and validate all public-input arguments
//! first (the proof and key buffers are untouched until the arguments
//! pass), then deserialize the verifying key and proof with full
//! on-curve and subgroup validation, check the key's input capacity
//! against the family's tuple shape, and finally run the pairing check.

use ark_bls12_381::{Bls12_381, Fr};
use ark_groth16::{Groth16, Proof, VerifyingKey};
use ark_serialize::{CanonicalDeserialize, SerializationError};
use ark_snark::SNARK;
use thiserror::Error;
use tracing::{debug, trace};

use crate::inputs::{InputError, PreTransferInputs, PreparationInputs, TransferInputs};

/// Errors during verification
#[derive(Error, Debug)]
pub enum VerifyError {
    /// The byte-level input contract was violated. Detected before any
    /// cryptographic check runs; distinct from a rejected proof, which
    /// is an `Ok(false)` outcome.
    #[error("malformed input: {0}")]
    Malformed(String),
    /// The verifying key or proof decodes structurally but carries data
    /// inconsistent with the curve, or the pairing backend faulted.
    /// A hard rejection, never a crash.
    #[error("invalid cryptographic data: {0}")]
    Internal(String),
}

impl From<InputError> for VerifyError {
    fn from(err: InputError) -> Self {
        VerifyError::Malformed(err.to_string())
    }
}

/// Truncated or empty buffers are a caller contract violation; group
/// data that fails curve or subgroup checks is a structural fault.
fn classify(kind: &str, err: SerializationError) -> VerifyError {
    match err {
        SerializationError::IoError(_) | SerializationError::NotEnoughSpace => {
            VerifyError::Malformed(format!("{kind} buffer is truncated"))
        }
        other => VerifyError::Internal(format!("{kind}: {other}")),
    }
}

/// Deserialize a verifying key blob, validating group membership.
///
/// Callers verifying many proofs under one key should decode it once and
/// reuse it through the typed entry points; the decoded key is owned by
/// the caller, never cached by this crate.
pub fn decode_verifying_key(bytes: &[u8]) -> Result<VerifyingKey<Bls12_381>, VerifyError> {
    if bytes.is_empty() {
        return Err(VerifyError::Malformed("verifying key buffer is empty".into()));
    }
    VerifyingKey::deserialize_compressed(bytes).map_err(|err| classify("verifying key", err))
}

/// Deserialize a proof blob, validating group membership.
pub fn decode_proof(bytes: &[u8]) -> Result<Proof<Bls12_381>, VerifyError> {
    if bytes.is_empty() {
        return Err(VerifyError::Malformed("proof buffer is empty".into()));
    }
    Proof::deserialize_compressed(bytes).map_err(|err| classify("proof", err))
}

fn verify_tuple(
    family: &'static str,
    expected_len: usize,
    vk: &VerifyingKey<Bls12_381>,
    proof: &Proof<Bls12_381>,
    tuple: Vec<Fr>,
) -> Result<bool, VerifyError> {
    if tuple.len() != expected_len {
        return Err(VerifyError::Malformed(format!(
            "{family} binds {expected_len} public inputs, got {}",
            tuple.len()
        )));
    }
    // gamma_abc fixes the tuple shape a key can bind; a key from another
    // family must fail here, not reach the pairing check.
    if vk.gamma_abc_g1.len() != expected_len + 1 {
        return Err(VerifyError::Malformed(format!(
            "verifying key carries {} public inputs, {family} binds {expected_len}",
            vk.gamma_abc_g1.len().saturating_sub(1)
        )));
    }

    let accepted = Groth16::<Bls12_381>::verify(vk, &tuple, proof)
        .map_err(|err| VerifyError::Internal(err.to_string()))?;
    if !accepted {
        debug!(family = family, "proof rejected");
    }
    Ok(accepted)
}

/// Verify a pre-transfer proof against its decoded public inputs.
pub fn verify_pre_transfer(
    vk: &VerifyingKey<Bls12_381>,
    proof: &Proof<Bls12_381>,
    inputs: &PreTransferInputs,
) -> Result<bool, VerifyError> {
    verify_tuple(
        "pre_transfer",
        PreTransferInputs::LEN,
        vk,
        proof,
        inputs.to_field_elements(),
    )
}

/// Verify a preparation proof against its decoded public inputs.
pub fn verify_preparation(
    vk: &VerifyingKey<Bls12_381>,
    proof: &Proof<Bls12_381>,
    inputs: &PreparationInputs,
) -> Result<bool, VerifyError> {
    verify_tuple(
        "preparation",
        PreparationInputs::LEN,
        vk,
        proof,
        inputs.to_field_elements(),
    )
}

/// Verify a transfer proof against its decoded public inputs.
pub fn verify_transfer(
    vk: &VerifyingKey<Bls12_381>,
    proof: &Proof<Bls12_381>,
    inputs: &TransferInputs,
) -> Result<bool, VerifyError> {
    verify_tuple(
        "transfer",
        TransferInputs::LEN,
        vk,
        proof,
        inputs.to_field_elements(),
    )
}

/// Verify a pre-transfer proof from raw protocol buffers.
///
/// Proves a valid transition from tree state `commit_root` to
/// `commit_root_t`, consistent with the derived address `address_new`
/// and bound to `nonce` for replay protection. Public input tuple:
/// `[commit_root, commit_root_t, address_new, nonce]`.
pub fn verify_pre_transfer_proof(
    commit_root: &[u8],
    commit_root_t: &[u8],
    address_new: &[u8],
    nonce: &[u8],
    proof: &[u8],
    vk: &[u8],
) -> Result<bool, VerifyError> {
    let inputs = PreTransferInputs::from_bytes(commit_root, commit_root_t, address_new, nonce)?;
    trace!(commit_root = %hex::encode(commit_root), "verifying pre_transfer proof");
    let vk = decode_verifying_key(vk)?;
    let proof = decode_proof(proof)?;
    verify_pre_transfer(&vk, &proof, &inputs)
}

/// Verify a preparation proof from raw protocol buffers.
///
/// Proves that a friend-graph path described by `friend_directions` is
/// consistent with `commit_root` and resolves to `verification_root`,
/// anchored to the prior step `pre_transfer_index` and bound to `nonce`.
/// `friend_directions` must hold exactly one byte per hop, each 0 or 1.
/// Public input tuple: `[commit_root, d_0..d_3, nonce,
/// pre_transfer_index, verification_root]`.
pub fn verify_preparation_proof(
    commit_root: &[u8],
    friend_directions: &[u8],
    nonce: &[u8],
    pre_transfer_index: &[u8],
    verification_root: &[u8],
    proof: &[u8],
    vk: &[u8],
) -> Result<bool, VerifyError> {
    let inputs = PreparationInputs::from_bytes(
        commit_root,
        friend_directions,
        nonce,
        pre_transfer_index,
        verification_root,
    )?;
    trace!(commit_root = %hex::encode(commit_root), "verifying preparation proof");
    let vk = decode_verifying_key(vk)?;
    let proof = decode_proof(proof)?;
    verify_preparation(&vk, &proof, &inputs)
}

/// Verify a transfer proof from raw protocol buffers.
///
/// Proves that the value contributions in `vlist` balance against
/// commitments anchored at `commit_root`. `vlist` is the fixed-width
/// concatenation of sixteen canonical field elements. Public input
/// tuple: `[commit_root, v_0..v_15]`.
pub fn verify_transfer_proof(
    commit_root: &[u8],
    vlist: &[u8],
    proof: &[u8],
    vk: &[u8],
) -> Result<bool, VerifyError> {
    let inputs = TransferInputs::from_bytes(commit_root, vlist)?;
    trace!(commit_root = %hex::encode(commit_root), "verifying transfer proof");
    let vk = decode_verifying_key(vk)?;
    let proof = decode_proof(proof)?;
    verify_transfer(&vk, &proof, &inputs)
}
