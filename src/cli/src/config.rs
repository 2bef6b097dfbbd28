//! Configuration for the txmerkle CLI.

use crate::errors::CliError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for the txmerkle CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MerkleConfig {
    /// Transaction ids used when no leaves are given on the command line
    pub leaves: Vec<String>,
    /// Transaction ids committed to by the demo command
    pub demo_leaves: Vec<String>,
    /// Ids the demo command looks up after building
    pub demo_queries: Vec<String>,
}

impl Default for MerkleConfig {
    fn default() -> Self {
        Self {
            leaves: Vec::new(),
            demo_leaves: ["tx1", "tx2", "tx3", "tx4"].iter().map(|s| s.to_string()).collect(),
            demo_queries: vec!["tx3".to_string(), "tx9".to_string()],
        }
    }
}

impl MerkleConfig {
    /// Loads configuration from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Saves configuration to a file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CliError> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
