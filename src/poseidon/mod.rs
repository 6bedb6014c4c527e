//! Domain-separated Poseidon hashing over the BLS12-381 scalar field.
//!
//! This module provides the protocol's two-to-one compression function.
//! Every invocation carries a [`Personalization`]: the commitment tag for
//! leaf/commitment derivation, or the Merkle level at which two nodes are
//! combined. The tag is absorbed into the sponge ahead of the inputs, so
//! a node hashed at one level cannot be reinterpreted as a commitment or
//! as a node at any other level.

mod config;
mod native;

pub use config::poseidon_config;
pub use native::{combine_hash, combine_hash_bytes, commitment_hash, HashError, Personalization};
