//! Resolving the transaction ids a command operates on.

use crate::config::MerkleConfig;
use crate::errors::CliError;
use std::path::Path;
use tracing::debug;

/// Parses one transaction id per line, trimming whitespace and skipping blank lines.
pub fn parse_leaves(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads a leaves file.
pub fn read_leaves_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>, CliError> {
    let contents = std::fs::read_to_string(&path)?;
    let leaves = parse_leaves(&contents);
    debug!("Read {} leaves from {}", leaves.len(), path.as_ref().display());
    Ok(leaves)
}

/// Picks the leaves to use: positional ids first, then the leaves file, then the config.
pub fn resolve(
    positional: Vec<String>,
    leaves_file: Option<&Path>,
    config: &MerkleConfig,
) -> Result<Vec<String>, CliError> {
    let leaves = if !positional.is_empty() {
        positional
    } else if let Some(path) = leaves_file {
        read_leaves_file(path)?
    } else {
        config.leaves.clone()
    };

    if leaves.is_empty() {
        return Err(CliError::NoLeaves);
    }
    Ok(leaves)
}
