//! Binary Merkle tree over an ordered list of transaction ids.
//!
//! Layers are kept root-first: `layers[0]` holds the root alone and the last
//! layer holds one digest per leaf, in the order the leaves were supplied.
//! When a layer has an odd length its trailing digest is promoted to the next
//! layer unchanged instead of being paired with a copy of itself.

use crate::errors::{MerkleError, MerkleResult};
use crate::hash::{combine, double_hash, Digest};
use crate::proofs::{Proof, ProofStep, Side};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Result of asking a tree whether it contains a leaf.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOutcome {
    /// Whether the leaf's digest is in the base layer
    pub present: bool,
    /// Inclusion proof, only when present
    pub proof: Option<Proof>,
    /// Root the proof leads to, only when present
    pub root: Option<Digest>,
}

impl QueryOutcome {
    /// Outcome for a leaf that is not in the tree.
    pub fn absent() -> Self {
        Self {
            present: false,
            proof: None,
            root: None,
        }
    }

    /// Outcome for a leaf that is in the tree.
    pub fn present(proof: Proof, root: Digest) -> Self {
        Self {
            present: true,
            proof: Some(proof),
            root: Some(root),
        }
    }
}

/// An immutable, fully built Merkle tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleTree {
    layers: Vec<Vec<Digest>>,
}

impl MerkleTree {
    /// Builds a tree from an ordered, non-empty sequence of leaf ids.
    ///
    /// # Errors
    ///
    /// [`MerkleError::InvalidInput`] when `leaves` is empty.
    pub fn build<I>(leaves: I) -> MerkleResult<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let base: Vec<Digest> = leaves.into_iter().map(double_hash).collect();
        Self::from_leaf_hashes(base)
    }

    fn from_leaf_hashes(base: Vec<Digest>) -> MerkleResult<Self> {
        if base.is_empty() {
            return Err(MerkleError::InvalidInput("no leaves supplied".to_string()));
        }

        let leaf_count = base.len();
        let mut layers = vec![base];
        loop {
            let current = &layers[layers.len() - 1];
            if current.len() == 1 {
                break;
            }
            let next = next_layer(current);
            layers.push(next);
        }
        // Built base-first, stored root-first.
        layers.reverse();

        let tree = Self { layers };
        debug!(
            leaves = leaf_count,
            depth = tree.depth(),
            root = %tree.root(),
            "built merkle tree"
        );
        Ok(tree)
    }

    /// The root digest.
    pub fn root(&self) -> Digest {
        self.layers[0][0]
    }

    /// All layers, root layer first.
    pub fn layers(&self) -> &[Vec<Digest>] {
        &self.layers
    }

    /// Number of layers, counting both the root and base layers.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// The base layer: one digest per leaf, in input order.
    pub fn base_layer(&self) -> &[Digest] {
        &self.layers[self.layers.len() - 1]
    }

    /// Number of leaves the tree was built from.
    pub fn leaf_count(&self) -> usize {
        self.base_layer().len()
    }

    /// Position of the first base-layer digest matching `leaf`.
    pub fn position(&self, leaf: impl AsRef<[u8]>) -> Option<usize> {
        let target = double_hash(leaf);
        self.base_layer().iter().position(|h| *h == target)
    }

    /// Whether `leaf` is among the leaves.
    pub fn contains(&self, leaf: impl AsRef<[u8]>) -> bool {
        self.position(leaf).is_some()
    }

    /// Looks `leaf` up and, when present, extracts its inclusion proof.
    pub fn query(&self, leaf: impl AsRef<[u8]>) -> QueryOutcome {
        match self.position(leaf) {
            Some(index) => {
                let proof = self.walk(index);
                QueryOutcome::present(proof, self.root())
            }
            None => QueryOutcome::absent(),
        }
    }

    /// Inclusion proof for the leaf at `index` in the base layer.
    ///
    /// # Errors
    ///
    /// [`MerkleError::IndexOutOfRange`] when `index` is not a leaf position.
    pub fn proof_for_index(&self, index: usize) -> MerkleResult<Proof> {
        let len = self.leaf_count();
        if index >= len {
            return Err(MerkleError::IndexOutOfRange { index, len });
        }
        Ok(self.walk(index))
    }

    // Walks base to root. A trailing lone node was promoted unchanged, so it
    // contributes no step at that hop.
    fn walk(&self, mut index: usize) -> Proof {
        let mut proof = Proof::default();
        for layer in self.layers.iter().rev() {
            if layer.len() < 2 {
                break;
            }
            if index % 2 == 1 {
                proof.push(ProofStep::new(layer[index - 1], Side::Left));
            } else if let Some(sibling) = layer.get(index + 1) {
                proof.push(ProofStep::new(*sibling, Side::Right));
            }
            index /= 2;
        }
        proof
    }
}

fn next_layer(current: &[Digest]) -> Vec<Digest> {
    current
        .chunks(2)
        .map(|pair| match pair {
            [left, right] => combine(left, right),
            [lone] => *lone,
            _ => unreachable!("chunks(2) yields one or two elements"),
        })
        .collect()
}

impl fmt::Display for MerkleTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Merkle tree: {} layers", self.depth())?;
        for (i, layer) in self.layers.iter().enumerate() {
            writeln!(f, "  layer {} ({} hashes)", i, layer.len())?;
            for hash in layer {
                writeln!(f, "    {}", hash)?;
            }
        }
        Ok(())
    }
}
