//! Error types for the txmerkle CLI.

use thiserror::Error;
use txmerkle_core::MerkleError;

/// Errors that can occur in the CLI.
#[derive(Error, Debug)]
pub enum CliError {
    /// Error raised by the Merkle engine.
    #[error("Merkle error: {0}")]
    Merkle(#[from] MerkleError),

    /// Error when a file operation fails.
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    /// Error when JSON serialization or deserialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error when no leaf source produced any transaction ids.
    #[error("No leaves: pass ids on the command line, --leaves-file, or set \"leaves\" in the config")]
    NoLeaves,
}
