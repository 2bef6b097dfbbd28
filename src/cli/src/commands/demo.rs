//! Demo command: build a tree, look ids up and check every proof.

use crate::config::MerkleConfig;
use crate::errors::CliError;
use serde::Serialize;
use tracing::{info, warn};
use txmerkle_core::{verify, Digest, MerkleEngine};

/// Result of looking one id up during the demo.
#[derive(Debug, Clone, Serialize)]
pub struct DemoQuery {
    /// The id that was looked up
    pub leaf: String,
    /// Whether it is in the tree
    pub present: bool,
    /// Number of proof steps, when present
    pub proof_len: Option<usize>,
    /// Whether the proof verified against the root, when present
    pub verified: Option<bool>,
}

/// Everything the demo observed.
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    /// Root of the demo tree
    pub root: Digest,
    /// Number of layers in the tree
    pub depth: usize,
    /// Whether rebuilding from the same leaves gave the same root
    pub reproducible: bool,
    /// One entry per configured query
    pub queries: Vec<DemoQuery>,
}

/// Runs the demo command.
pub fn run(config: &MerkleConfig) -> Result<DemoReport, CliError> {
    let mut engine = MerkleEngine::new();
    let root = engine.build_root(&config.demo_leaves)?;
    info!("Merkle root for {:?}: {}", config.demo_leaves, root);

    let reproducible = engine.build_root(&config.demo_leaves)? == root;
    if !reproducible {
        warn!("Rebuilding the demo tree produced a different root");
    }

    let mut queries = Vec::with_capacity(config.demo_queries.len());
    for leaf in &config.demo_queries {
        let outcome = engine.query(leaf)?;
        let query = match (&outcome.proof, &outcome.root) {
            (Some(proof), Some(root)) => {
                let verified = verify(leaf, proof, root);
                info!("{} is included, {} proof steps, verified: {}", leaf, proof.len(), verified);
                DemoQuery {
                    leaf: leaf.clone(),
                    present: true,
                    proof_len: Some(proof.len()),
                    verified: Some(verified),
                }
            }
            _ => {
                info!("{} is not included", leaf);
                DemoQuery {
                    leaf: leaf.clone(),
                    present: false,
                    proof_len: None,
                    verified: None,
                }
            }
        };
        queries.push(query);
    }

    Ok(DemoReport {
        root,
        depth: engine.layers()?.len(),
        reproducible,
        queries,
    })
}
