//! End-to-end tests for the verification gateway.
//!
//! Proofs come from in-test oracle circuits whose only job is to bind
//! the public input tuple of one proof family, so the gateway is
//! exercised exactly the way the external prover's artifacts would.

use ark_bls12_381::{Bls12_381, Fr};
use ark_ff::UniformRand;
use ark_groth16::{Groth16, Proof, ProvingKey, VerifyingKey};
use ark_relations::lc;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError, Variable};
use ark_serialize::CanonicalSerialize;
use ark_snark::SNARK;
use ark_std::rand::{rngs::StdRng, SeedableRng};

use crate::field::{encode_field, FIELD_SIZE};
use crate::inputs::{PreTransferInputs, PreparationInputs, TransferInputs};
use crate::verify::{
    decode_proof, decode_verifying_key, verify_pre_transfer, verify_pre_transfer_proof,
    verify_preparation, verify_preparation_proof, verify_transfer, verify_transfer_proof,
    VerifyError,
};
use crate::MAX_VALUE_SLOTS;

/// Oracle circuit: binds `n` public inputs by constraining a witness to
/// equal their sum.
struct InputBindingCircuit {
    inputs: Vec<Option<Fr>>,
}

impl InputBindingCircuit {
    fn shape(len: usize) -> Self {
        Self {
            inputs: vec![None; len],
        }
    }

    fn with_inputs(values: &[Fr]) -> Self {
        Self {
            inputs: values.iter().copied().map(Some).collect(),
        }
    }
}

impl ConstraintSynthesizer<Fr> for InputBindingCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        let mut sum_lc = lc!();
        for &value in &self.inputs {
            let var = cs.new_input_variable(|| value.ok_or(SynthesisError::AssignmentMissing))?;
            sum_lc = sum_lc + var;
        }
        let assigned = self.inputs;
        let witness = cs.new_witness_variable(move || {
            let mut acc = Fr::from(0u64);
            for &value in &assigned {
                acc += value.ok_or(SynthesisError::AssignmentMissing)?;
            }
            Ok(acc)
        })?;
        cs.enforce_constraint(sum_lc, lc!() + Variable::One, lc!() + witness)
    }
}

fn setup_family(
    len: usize,
    rng: &mut StdRng,
) -> (ProvingKey<Bls12_381>, VerifyingKey<Bls12_381>) {
    Groth16::<Bls12_381>::circuit_specific_setup(InputBindingCircuit::shape(len), rng).unwrap()
}

fn prove_tuple(pk: &ProvingKey<Bls12_381>, tuple: &[Fr], rng: &mut StdRng) -> Proof<Bls12_381> {
    Groth16::<Bls12_381>::prove(pk, InputBindingCircuit::with_inputs(tuple), rng).unwrap()
}

fn to_bytes(value: &impl CanonicalSerialize) -> Vec<u8> {
    let mut bytes = Vec::new();
    value.serialize_compressed(&mut bytes).unwrap();
    bytes
}

fn random_pre_transfer_inputs(rng: &mut StdRng) -> PreTransferInputs {
    PreTransferInputs {
        commit_root: Fr::rand(rng),
        commit_root_t: Fr::rand(rng),
        address_new: Fr::rand(rng),
        nonce: Fr::rand(rng),
    }
}

#[test]
fn test_pre_transfer_accepted() {
    let mut rng = StdRng::seed_from_u64(42);
    let (pk, vk) = setup_family(PreTransferInputs::LEN, &mut rng);

    let inputs = random_pre_transfer_inputs(&mut rng);
    let proof = prove_tuple(&pk, &inputs.to_field_elements(), &mut rng);

    assert!(verify_pre_transfer(&vk, &proof, &inputs).unwrap());
}

#[test]
fn test_pre_transfer_any_altered_field_rejected() {
    let mut rng = StdRng::seed_from_u64(42);
    let (pk, vk) = setup_family(PreTransferInputs::LEN, &mut rng);

    let inputs = random_pre_transfer_inputs(&mut rng);
    let proof = prove_tuple(&pk, &inputs.to_field_elements(), &mut rng);

    for slot in 0..PreTransferInputs::LEN {
        let mut altered = inputs.clone();
        match slot {
            0 => altered.commit_root += Fr::from(1u64),
            1 => altered.commit_root_t += Fr::from(1u64),
            2 => altered.address_new += Fr::from(1u64),
            _ => altered.nonce += Fr::from(1u64),
        }
        assert!(
            !verify_pre_transfer(&vk, &proof, &altered).unwrap(),
            "altered slot {} was accepted",
            slot
        );
    }
}

#[test]
fn test_pre_transfer_byte_level_round_trip() {
    let mut rng = StdRng::seed_from_u64(7);
    let (pk, vk) = setup_family(PreTransferInputs::LEN, &mut rng);

    let inputs = random_pre_transfer_inputs(&mut rng);
    let proof = prove_tuple(&pk, &inputs.to_field_elements(), &mut rng);
    let proof_bytes = to_bytes(&proof);
    let vk_bytes = to_bytes(&vk);

    let accepted = verify_pre_transfer_proof(
        &encode_field(&inputs.commit_root),
        &encode_field(&inputs.commit_root_t),
        &encode_field(&inputs.address_new),
        &encode_field(&inputs.nonce),
        &proof_bytes,
        &vk_bytes,
    )
    .unwrap();
    assert!(accepted);

    // one altered argument flips the outcome to rejection
    let rejected = verify_pre_transfer_proof(
        &encode_field(&inputs.commit_root),
        &encode_field(&(inputs.commit_root_t + Fr::from(1u64))),
        &encode_field(&inputs.address_new),
        &encode_field(&inputs.nonce),
        &proof_bytes,
        &vk_bytes,
    )
    .unwrap();
    assert!(!rejected);
}

#[test]
fn test_truncated_buffers_are_malformed() {
    let mut rng = StdRng::seed_from_u64(11);
    let (pk, vk) = setup_family(PreTransferInputs::LEN, &mut rng);

    let inputs = random_pre_transfer_inputs(&mut rng);
    let proof = prove_tuple(&pk, &inputs.to_field_elements(), &mut rng);
    let proof_bytes = to_bytes(&proof);
    let vk_bytes = to_bytes(&vk);

    let commit_root = encode_field(&inputs.commit_root);
    let commit_root_t = encode_field(&inputs.commit_root_t);
    let address_new = encode_field(&inputs.address_new);
    let nonce = encode_field(&inputs.nonce);

    let truncated_proof = verify_pre_transfer_proof(
        &commit_root,
        &commit_root_t,
        &address_new,
        &nonce,
        &proof_bytes[..proof_bytes.len() - 4],
        &vk_bytes,
    )
    .unwrap_err();
    assert!(matches!(truncated_proof, VerifyError::Malformed(_)));

    let truncated_vk = verify_pre_transfer_proof(
        &commit_root,
        &commit_root_t,
        &address_new,
        &nonce,
        &proof_bytes,
        &vk_bytes[..vk_bytes.len() - 4],
    )
    .unwrap_err();
    assert!(matches!(truncated_vk, VerifyError::Malformed(_)));

    let empty_vk = verify_pre_transfer_proof(
        &commit_root,
        &commit_root_t,
        &address_new,
        &nonce,
        &proof_bytes,
        &[],
    )
    .unwrap_err();
    assert!(matches!(empty_vk, VerifyError::Malformed(_)));

    let empty_proof = verify_pre_transfer_proof(
        &commit_root,
        &commit_root_t,
        &address_new,
        &nonce,
        &[],
        &vk_bytes,
    )
    .unwrap_err();
    assert!(matches!(empty_proof, VerifyError::Malformed(_)));
}

#[test]
fn test_garbage_group_data_is_internal() {
    let mut rng = StdRng::seed_from_u64(13);
    let (pk, vk) = setup_family(PreTransferInputs::LEN, &mut rng);

    let inputs = random_pre_transfer_inputs(&mut rng);
    let proof = prove_tuple(&pk, &inputs.to_field_elements(), &mut rng);

    let garbage_proof = vec![0xFFu8; to_bytes(&proof).len()];
    let err = decode_proof(&garbage_proof).unwrap_err();
    assert!(matches!(err, VerifyError::Internal(_)));

    let garbage_vk = vec![0xFFu8; to_bytes(&vk).len()];
    let err = decode_verifying_key(&garbage_vk).unwrap_err();
    assert!(matches!(err, VerifyError::Internal(_)));
}

#[test]
fn test_non_canonical_argument_is_malformed() {
    use ark_ff::{BigInteger, PrimeField};

    let mut rng = StdRng::seed_from_u64(17);
    let (pk, vk) = setup_family(PreTransferInputs::LEN, &mut rng);

    let inputs = random_pre_transfer_inputs(&mut rng);
    let proof = prove_tuple(&pk, &inputs.to_field_elements(), &mut rng);

    let err = verify_pre_transfer_proof(
        &Fr::MODULUS.to_bytes_le(),
        &encode_field(&inputs.commit_root_t),
        &encode_field(&inputs.address_new),
        &encode_field(&inputs.nonce),
        &to_bytes(&proof),
        &to_bytes(&vk),
    )
    .unwrap_err();
    match err {
        VerifyError::Malformed(message) => assert!(message.contains("commit_root")),
        other => panic!("expected malformed input, got {:?}", other),
    }
}

#[test]
fn test_preparation_accepted_and_direction_bound() {
    let mut rng = StdRng::seed_from_u64(23);
    let (pk, vk) = setup_family(PreparationInputs::LEN, &mut rng);

    let inputs = PreparationInputs {
        commit_root: Fr::rand(&mut rng),
        friend_directions: [true, false, true, true],
        nonce: Fr::rand(&mut rng),
        pre_transfer_index: Fr::rand(&mut rng),
        verification_root: Fr::rand(&mut rng),
    };
    let proof = prove_tuple(&pk, &inputs.to_field_elements(), &mut rng);
    let proof_bytes = to_bytes(&proof);
    let vk_bytes = to_bytes(&vk);

    let accepted = verify_preparation_proof(
        &encode_field(&inputs.commit_root),
        &[1, 0, 1, 1],
        &encode_field(&inputs.nonce),
        &encode_field(&inputs.pre_transfer_index),
        &encode_field(&inputs.verification_root),
        &proof_bytes,
        &vk_bytes,
    )
    .unwrap();
    assert!(accepted);

    // flipping one direction bit changes the bound tuple
    let rejected = verify_preparation_proof(
        &encode_field(&inputs.commit_root),
        &[1, 0, 1, 0],
        &encode_field(&inputs.nonce),
        &encode_field(&inputs.pre_transfer_index),
        &encode_field(&inputs.verification_root),
        &proof_bytes,
        &vk_bytes,
    )
    .unwrap();
    assert!(!rejected);

    assert!(verify_preparation(&vk, &proof, &inputs).unwrap());
}

#[test]
fn test_preparation_arguments_checked_before_buffers() {
    let root = encode_field(&Fr::from(1u64));

    // both buffers are empty garbage; the direction length error must
    // surface first
    let err = verify_preparation_proof(&root, &[1, 0, 1], &root, &root, &root, &[], &[])
        .unwrap_err();
    match err {
        VerifyError::Malformed(message) => assert!(message.contains("friend_directions")),
        other => panic!("expected malformed input, got {:?}", other),
    }
}

#[test]
fn test_transfer_accepted_and_value_bound() {
    let mut rng = StdRng::seed_from_u64(29);
    let (pk, vk) = setup_family(TransferInputs::LEN, &mut rng);

    let inputs = TransferInputs {
        commit_root: Fr::rand(&mut rng),
        vlist: (0..MAX_VALUE_SLOTS).map(|_| Fr::rand(&mut rng)).collect(),
    };
    let proof = prove_tuple(&pk, &inputs.to_field_elements(), &mut rng);
    let proof_bytes = to_bytes(&proof);
    let vk_bytes = to_bytes(&vk);

    let mut vlist_bytes = Vec::with_capacity(MAX_VALUE_SLOTS * FIELD_SIZE);
    for value in &inputs.vlist {
        vlist_bytes.extend_from_slice(&encode_field(value));
    }

    let accepted = verify_transfer_proof(
        &encode_field(&inputs.commit_root),
        &vlist_bytes,
        &proof_bytes,
        &vk_bytes,
    )
    .unwrap();
    assert!(accepted);

    // altering a single value slot flips the outcome
    let mut altered = vlist_bytes.clone();
    let slot = 3 * FIELD_SIZE..4 * FIELD_SIZE;
    altered[slot].copy_from_slice(&encode_field(&(inputs.vlist[3] + Fr::from(1u64))));
    let rejected = verify_transfer_proof(
        &encode_field(&inputs.commit_root),
        &altered,
        &proof_bytes,
        &vk_bytes,
    )
    .unwrap();
    assert!(!rejected);

    assert!(verify_transfer(&vk, &proof, &inputs).unwrap());
}

#[test]
fn test_transfer_vlist_contract_checked_first() {
    let root = encode_field(&Fr::from(1u64));

    let err = verify_transfer_proof(&root, &[0u8; 5], &[], &[]).unwrap_err();
    match err {
        VerifyError::Malformed(message) => assert!(message.contains("vlist")),
        other => panic!("expected malformed input, got {:?}", other),
    }
}

#[test]
fn test_cross_family_key_is_malformed() {
    let mut rng = StdRng::seed_from_u64(31);

    // a pre-transfer key binds 4 inputs; the transfer family binds 17
    let (pk, pre_transfer_vk) = setup_family(PreTransferInputs::LEN, &mut rng);
    let inputs = random_pre_transfer_inputs(&mut rng);
    let proof = prove_tuple(&pk, &inputs.to_field_elements(), &mut rng);

    let mut vlist_bytes = Vec::with_capacity(MAX_VALUE_SLOTS * FIELD_SIZE);
    for _ in 0..MAX_VALUE_SLOTS {
        vlist_bytes.extend_from_slice(&encode_field(&Fr::from(0u64)));
    }

    let err = verify_transfer_proof(
        &encode_field(&inputs.commit_root),
        &vlist_bytes,
        &to_bytes(&proof),
        &to_bytes(&pre_transfer_vk),
    )
    .unwrap_err();
    assert!(matches!(err, VerifyError::Malformed(_)));
}

#[test]
fn test_decoded_key_reuse_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(37);
    let (pk, vk) = setup_family(PreTransferInputs::LEN, &mut rng);

    let inputs = random_pre_transfer_inputs(&mut rng);
    let proof = prove_tuple(&pk, &inputs.to_field_elements(), &mut rng);

    let decoded_vk = decode_verifying_key(&to_bytes(&vk)).unwrap();
    let decoded_proof = decode_proof(&to_bytes(&proof)).unwrap();

    let first = verify_pre_transfer(&decoded_vk, &decoded_proof, &inputs).unwrap();
    let second = verify_pre_transfer(&decoded_vk, &decoded_proof, &inputs).unwrap();
    assert!(first);
    assert_eq!(first, second);
}
