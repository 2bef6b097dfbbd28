//! Root command: commit to a list of transaction ids.

use crate::errors::CliError;
use tracing::info;
use txmerkle_core::{Digest, MerkleEngine};

/// Runs the root command.
pub fn run(leaves: &[String]) -> Result<Digest, CliError> {
    let mut engine = MerkleEngine::new();
    let root = engine.build_root(leaves)?;
    info!("Committed {} transaction ids", leaves.len());
    Ok(root)
}
