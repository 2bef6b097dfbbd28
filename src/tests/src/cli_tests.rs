//! Tests for the CLI crate.

use tempfile::tempdir;
use txmerkle_cli::{demo, layers, leaves, prove, root, verify, CliError, MerkleConfig};
use txmerkle_core::MerkleTree;

fn ids(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

/// A leaves file drives root, prove and verify end to end.
#[test]
fn test_leaves_file_to_verified_proof() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let leaves_path = dir.path().join("leaves.txt");
    std::fs::write(&leaves_path, "tx1\ntx2\n\ntx3\ntx4\ntx5\n")?;

    let leaves = leaves::resolve(Vec::new(), Some(leaves_path.as_path()), &MerkleConfig::default())?;
    assert_eq!(leaves.len(), 5);

    let root = root::run(&leaves)?;
    assert_eq!(root, MerkleTree::build(&leaves)?.root());

    let report = prove::run(&leaves, "tx5")?;
    let proof_path = dir.path().join("proof.json");
    std::fs::write(&proof_path, serde_json::to_string_pretty(&report)?)?;
    assert!(verify::run("tx5", &root.to_hex(), &proof_path)?);
    assert!(!verify::run("tx4", &root.to_hex(), &proof_path)?);

    // A bare proof array works too
    let bare_path = dir.path().join("bare.json");
    std::fs::write(&bare_path, serde_json::to_string(&report.outcome.proof)?)?;
    assert!(verify::run("tx5", &root.to_hex(), &bare_path)?);
    Ok(())
}

/// Layers come back root first, matching the tree.
#[test]
fn test_layers_command() {
    let leaves = ids(&["a", "b", "c"]);
    let layers = layers::run(&leaves).unwrap();
    assert_eq!(layers.len(), 3);
    assert_eq!(layers[0].len(), 1);
    assert_eq!(layers[2].len(), 3);
    assert_eq!(layers[0][0], root::run(&leaves).unwrap());
}

/// The demo reads its leaves and queries from a config file.
#[test]
fn test_demo_from_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    let config = MerkleConfig {
        leaves: Vec::new(),
        demo_leaves: ids(&["t1", "t2", "t3"]),
        demo_queries: ids(&["t3", "t4"]),
    };
    config.to_file(&path).unwrap();

    let report = demo::run(&MerkleConfig::from_file(&path).unwrap()).unwrap();
    assert!(report.reproducible);
    assert_eq!(report.queries[0].verified, Some(true));
    assert_eq!(report.queries[0].proof_len, Some(1));
    assert!(!report.queries[1].present);
}

/// Missing leaves are reported, not panicked on.
#[test]
fn test_no_leaves() {
    assert!(matches!(
        leaves::resolve(Vec::new(), None, &MerkleConfig::default()),
        Err(CliError::NoLeaves)
    ));
}
