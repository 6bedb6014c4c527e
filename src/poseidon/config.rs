//! Poseidon configuration for the BLS12-381 scalar field.
//!
//! Rate 2 / capacity 1 with an x^5 S-box, the standard arity-2 sponge
//! shape for 128-bit security.

use ark_crypto_primitives::sponge::poseidon::PoseidonConfig;
use ark_crypto_primitives::sponge::Absorb;
use ark_ff::PrimeField;

/// Number of full rounds (split evenly between start and end)
const FULL_ROUNDS: usize = 8;

/// Number of partial rounds
const PARTIAL_ROUNDS: usize = 57;

/// S-box exponent
const ALPHA: u64 = 5;

/// Sponge rate (field elements absorbed per permutation)
const RATE: usize = 2;

/// Build the Poseidon configuration used by every hash in this crate.
pub fn poseidon_config<F: PrimeField + Absorb>() -> PoseidonConfig<F> {
    let (ark, mds) = generate_parameters::<F>(RATE, FULL_ROUNDS, PARTIAL_ROUNDS);

    PoseidonConfig::new(FULL_ROUNDS, PARTIAL_ROUNDS, ALPHA, mds, ark, RATE, 1)
}

/// Deterministic round-constant and MDS generation.
/// Production deployments should pin constants from a public generation
/// ceremony; the grind below is reproducible but not audited.
fn generate_parameters<F: PrimeField>(
    rate: usize,
    full_rounds: usize,
    partial_rounds: usize,
) -> (Vec<Vec<F>>, Vec<Vec<F>>) {
    let width = rate + 1;
    let total_rounds = full_rounds + partial_rounds;

    // Round constants: square-and-offset grind from a fixed seed.
    let mut ark = Vec::with_capacity(total_rounds);
    let mut state = F::from(0x7a6b_7472_616e_7366u64); // "zktransf"
    for _ in 0..total_rounds {
        let mut round_constants = Vec::with_capacity(width);
        for _ in 0..width {
            state = state.square() + F::from(7u64);
            round_constants.push(state);
        }
        ark.push(round_constants);
    }

    // MDS matrix: 2 on the diagonal, 1 elsewhere.
    let mds = (0..width)
        .map(|i| {
            (0..width)
                .map(|j| if i == j { F::from(2u64) } else { F::from(1u64) })
                .collect()
        })
        .collect();

    (ark, mds)
}
