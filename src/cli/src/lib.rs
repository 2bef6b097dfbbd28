//! Command line driver for transaction Merkle trees.

pub mod commands;
pub mod config;
pub mod errors;
pub mod leaves;

// Re-export commonly used types and functions
pub use commands::{demo, layers, prove, root, verify};
pub use config::MerkleConfig;
pub use errors::CliError;
