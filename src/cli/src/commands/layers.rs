//! Layers command: dump the layer stack for inspection.

use crate::errors::CliError;
use txmerkle_core::{Digest, MerkleEngine};

/// Runs the layers command, returning the layers root-first.
pub fn run(leaves: &[String]) -> Result<Vec<Vec<Digest>>, CliError> {
    let mut engine = MerkleEngine::new();
    engine.build_root(leaves)?;
    Ok(engine.layers()?.to_vec())
}
