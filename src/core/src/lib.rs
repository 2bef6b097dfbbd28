//! Core primitives for committing to ordered transaction ids.
//!
//! This crate builds binary Merkle trees whose every digest is a double
//! SHA-256, extracts inclusion proofs for individual ids, and verifies those
//! proofs against a root without access to the tree.

pub mod engine;
pub mod errors;
pub mod hash;
pub mod proofs;
pub mod tree;

// Re-export commonly used types
pub use engine::MerkleEngine;
pub use errors::{MerkleError, MerkleResult};
pub use hash::{combine, double_hash, Digest};
pub use proofs::{verify, Proof, ProofStep, Side};
pub use tree::{MerkleTree, QueryOutcome};
