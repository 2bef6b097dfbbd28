//! Error types for the core crate.

use thiserror::Error;

/// Errors that can occur while building or querying a Merkle tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    /// Error when the leaf sequence handed to construction is unusable.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error when the engine is queried before any tree was built.
    #[error("Merkle tree not built: generate a tree before querying it")]
    NotBuilt,

    /// Error when a base-layer position does not exist.
    #[error("Leaf index {index} out of range for {len} leaves")]
    IndexOutOfRange {
        /// The requested index
        index: usize,
        /// The number of leaves in the tree
        len: usize,
    },

    /// Error when a digest cannot be parsed from its text form.
    #[error("Invalid digest: {0}")]
    InvalidDigest(String),

    /// Error when a proof verification fails.
    #[error("Proof verification failed: {0}")]
    ProofVerificationFailed(String),

    /// Error when serialization or deserialization fails.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result alias used throughout the core crate.
pub type MerkleResult<T> = Result<T, MerkleError>;

impl From<bincode::Error> for MerkleError {
    fn from(error: bincode::Error) -> Self {
        MerkleError::Serialization(error.to_string())
    }
}
