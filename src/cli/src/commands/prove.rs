//! Prove command: check containment and emit an inclusion proof.

use crate::errors::CliError;
use serde::Serialize;
use tracing::{debug, info};
use txmerkle_core::{MerkleEngine, QueryOutcome};

/// What the prove command found for one transaction id.
#[derive(Debug, Clone, Serialize)]
pub struct ProveReport {
    /// The id that was looked up
    pub leaf: String,
    /// Presence, proof and root
    #[serde(flatten)]
    pub outcome: QueryOutcome,
    /// Hex of the compact binary proof encoding, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoded: Option<String>,
}

/// Runs the prove command.
pub fn run(leaves: &[String], leaf: &str) -> Result<ProveReport, CliError> {
    let mut engine = MerkleEngine::new();
    engine.build_root(leaves)?;

    let outcome = engine.query(leaf)?;
    let encoded = match &outcome.proof {
        Some(proof) => {
            debug!("Proof for {}: {}", leaf, proof);
            Some(hex::encode(proof.to_bytes()?))
        }
        None => None,
    };
    info!("Transaction {} present: {}", leaf, outcome.present);

    Ok(ProveReport {
        leaf: leaf.to_string(),
        outcome,
        encoded,
    })
}
