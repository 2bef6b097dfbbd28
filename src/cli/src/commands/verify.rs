//! Verify command: check a proof against a root without rebuilding the tree.

use crate::errors::CliError;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};
use txmerkle_core::{Digest, Proof};

/// Loads a proof from a JSON file, as printed by `prove --json`.
///
/// Accepts either a bare proof array or a full prove report with a `proof` field.
pub fn load_proof<P: AsRef<Path>>(path: P) -> Result<Proof, CliError> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let value: serde_json::Value = serde_json::from_str(&contents)?;
    let proof = match value.get("proof") {
        Some(inner) => serde_json::from_value(inner.clone())?,
        None => serde_json::from_value(value)?,
    };
    Ok(proof)
}

/// Runs the verify command.
pub fn run<P: AsRef<Path>>(leaf: &str, root: &str, proof_path: P) -> Result<bool, CliError> {
    let root = Digest::from_hex(root)?;
    let proof = load_proof(proof_path)?;
    debug!("Loaded {}", proof);

    let valid = txmerkle_core::verify(leaf, &proof, &root);
    info!("Proof for {} against {}: {}", leaf, root, if valid { "valid" } else { "invalid" });
    Ok(valid)
}
