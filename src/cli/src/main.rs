//! txmerkle: build transaction Merkle trees and check inclusion proofs.

use anyhow::{bail, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use structopt::StructOpt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use txmerkle_cli::commands::{demo, layers, prove, root, verify};
use txmerkle_cli::{leaves, MerkleConfig};

/// Command line arguments for txmerkle.
#[derive(Debug, StructOpt)]
#[structopt(name = "txmerkle", about = "Double-SHA256 Merkle trees over transaction ids")]
struct Opt {
    /// Path to the configuration file
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// File with one transaction id per line
    #[structopt(short, long, parse(from_os_str))]
    leaves_file: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[structopt(long)]
    json: bool,

    /// Subcommand to run
    #[structopt(subcommand)]
    cmd: Command,
}

/// Subcommands for txmerkle.
#[derive(Debug, StructOpt)]
enum Command {
    /// Compute the Merkle root of the transaction ids
    #[structopt(name = "root")]
    Root {
        /// Transaction ids, in order
        leaves: Vec<String>,
    },

    /// Check whether a transaction id is included and print its proof
    #[structopt(name = "prove")]
    Prove {
        /// Transaction id to look up
        leaf: String,

        /// Transaction ids, in order
        leaves: Vec<String>,
    },

    /// Verify an inclusion proof against a root
    #[structopt(name = "verify")]
    Verify {
        /// Transaction id the proof is for
        #[structopt(long)]
        leaf: String,

        /// Claimed Merkle root (hex)
        #[structopt(long)]
        root: String,

        /// JSON file holding the proof
        #[structopt(long, parse(from_os_str))]
        proof: PathBuf,
    },

    /// Print every layer of the tree, root first
    #[structopt(name = "layers")]
    Layers {
        /// Transaction ids, in order
        leaves: Vec<String>,
    },

    /// Build a sample tree and walk through queries and verification
    #[structopt(name = "demo")]
    Demo,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command line arguments
    let opt = Opt::from_args();

    // Load configuration
    let config = match &opt.config {
        Some(path) => MerkleConfig::from_file(path)?,
        None => MerkleConfig::default(),
    };
    let leaves_file = opt.leaves_file.as_deref();

    // Run the appropriate command
    match opt.cmd {
        Command::Root { leaves: positional } => {
            let leaves = leaves::resolve(positional, leaves_file, &config)?;
            let root = root::run(&leaves)?;
            if opt.json {
                print_json(&serde_json::json!({ "leaves": leaves.len(), "root": root }))?;
            } else {
                println!("{} {}", "Merkle root:".green(), root);
            }
        }
        Command::Prove { leaf, leaves: positional } => {
            let leaves = leaves::resolve(positional, leaves_file, &config)?;
            let report = prove::run(&leaves, &leaf)?;
            if opt.json {
                print_json(&report)?;
            } else if let (Some(proof), Some(root)) = (&report.outcome.proof, &report.outcome.root) {
                println!("{} {}", "Included:".green(), leaf);
                println!("{} {}", "Merkle root:".green(), root);
                println!("{} {} steps", "Proof:".green(), proof.len());
                for step in proof.steps() {
                    println!("  {:+} {}", step.side.offset(), step.sibling);
                }
                if let Some(encoded) = &report.encoded {
                    println!("{} {}", "Encoded:".green(), encoded);
                }
            } else {
                println!("{} {}", "Not included:".yellow(), leaf);
            }
        }
        Command::Verify { leaf, root, proof } => {
            let valid = verify::run(&leaf, &root, &proof)?;
            if opt.json {
                print_json(&serde_json::json!({ "leaf": leaf, "root": root, "valid": valid }))?;
            }
            if !valid {
                if !opt.json {
                    println!("{} {}", "Invalid proof for".red(), leaf);
                }
                bail!("proof for {} does not lead to {}", leaf, root);
            }
            if !opt.json {
                println!("{} {}", "Valid proof for".green(), leaf);
            }
        }
        Command::Layers { leaves: positional } => {
            let leaves = leaves::resolve(positional, leaves_file, &config)?;
            let layers = layers::run(&leaves)?;
            if opt.json {
                print_json(&layers)?;
            } else {
                println!("{} {}", "Layers:".green(), layers.len());
                for (i, layer) in layers.iter().enumerate() {
                    println!("{} {} ({} hashes)", "Layer".cyan(), i, layer.len());
                    for hash in layer {
                        println!("  {}", hash);
                    }
                }
            }
        }
        Command::Demo => {
            let report = demo::run(&config)?;
            if opt.json {
                print_json(&report)?;
            } else {
                println!("{} {}", "Merkle root:".green(), report.root);
                println!("{} {}", "Reproducible:".green(), report.reproducible);
                for query in &report.queries {
                    match (query.proof_len, query.verified) {
                        (Some(steps), Some(verified)) => println!(
                            "{} {} ({} steps, verified: {})",
                            "Included:".green(),
                            query.leaf,
                            steps,
                            verified
                        ),
                        _ => println!("{} {}", "Not included:".yellow(), query.leaf),
                    }
                }
            }
        }
    }

    Ok(())
}
