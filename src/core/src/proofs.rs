//! Inclusion proofs for the transaction Merkle tree.
//!
//! A proof is the list of sibling digests met while walking from a leaf up to
//! the root, each tagged with the side the sibling sits on. Verifying one needs
//! nothing but the leaf id, the proof and the claimed root.

use crate::errors::{MerkleError, MerkleResult};
use crate::hash::{combine, double_hash, Digest};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Which side of the carried digest a sibling sits on.
///
/// Serialized as the signed offset of the sibling: `1` for right, `-1` for left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Sibling is appended: `combine(acc, sibling)`.
    Right,
    /// Sibling is prepended: `combine(sibling, acc)`.
    Left,
}

impl Side {
    /// Signed offset of the sibling relative to the carried node.
    pub fn offset(self) -> i8 {
        match self {
            Side::Right => 1,
            Side::Left => -1,
        }
    }
}

impl Serialize for Side {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i8(self.offset())
    }
}

impl<'de> Deserialize<'de> for Side {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match i8::deserialize(deserializer)? {
            1 => Ok(Side::Right),
            -1 => Ok(Side::Left),
            other => Err(serde::de::Error::custom(format!(
                "invalid sibling offset {} (expected 1 or -1)",
                other
            ))),
        }
    }
}

/// One hop of an inclusion proof.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    /// The sibling digest at this layer
    #[serde(rename = "hash")]
    pub sibling: Digest,
    /// Where the sibling sits relative to the carried digest
    #[serde(rename = "offset")]
    pub side: Side,
}

impl ProofStep {
    /// Creates a new proof step.
    pub fn new(sibling: Digest, side: Side) -> Self {
        Self { sibling, side }
    }

    /// Folds this step into the digest carried up from the layer below.
    pub fn apply(&self, acc: &Digest) -> Digest {
        match self.side {
            Side::Right => combine(acc, &self.sibling),
            Side::Left => combine(&self.sibling, acc),
        }
    }
}

/// An inclusion proof, ordered from the base layer up to (excluding) the root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Proof {
    steps: Vec<ProofStep>,
}

impl Proof {
    /// Creates a proof from its steps.
    pub fn new(steps: Vec<ProofStep>) -> Self {
        Self { steps }
    }

    /// The steps, base layer first.
    pub fn steps(&self) -> &[ProofStep] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the proof has no steps (single-leaf trees).
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub(crate) fn push(&mut self, step: ProofStep) {
        self.steps.push(step);
    }

    /// Recomputes the root implied by this proof for `leaf`.
    pub fn compute_root(&self, leaf: impl AsRef<[u8]>) -> Digest {
        self.steps
            .iter()
            .fold(double_hash(leaf), |acc, step| step.apply(&acc))
    }

    /// Verifies that this proof commits `leaf` to `root`.
    ///
    /// # Returns
    ///
    /// `true` if the proof is valid, `false` otherwise
    pub fn verify(&self, leaf: impl AsRef<[u8]>, root: &Digest) -> bool {
        let computed = self.compute_root(leaf);
        let result = computed == *root;
        debug!(steps = self.len(), %computed, %root, result, "verified inclusion proof");
        result
    }

    /// Verifies the proof, returning a Result.
    pub fn verify_with_error(&self, leaf: impl AsRef<[u8]>, root: &Digest) -> MerkleResult<()> {
        if self.verify(leaf, root) {
            Ok(())
        } else {
            Err(MerkleError::ProofVerificationFailed(
                "Merkle proof verification failed".to_string(),
            ))
        }
    }

    /// Compact binary encoding of the proof.
    pub fn to_bytes(&self) -> MerkleResult<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decodes a proof produced by [`Proof::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> MerkleResult<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl fmt::Display for Proof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Proof {{ {} steps", self.steps.len())?;
        for step in &self.steps {
            write!(f, ", {:+} {}", step.side.offset(), step.sibling)?;
        }
        write!(f, " }}")
    }
}

/// Checks that `proof` links `leaf` to `claimed_root` without access to the tree.
///
/// A tampered proof or a wrong root gives `false`, never an error.
pub fn verify(leaf: impl AsRef<[u8]>, proof: &Proof, claimed_root: &Digest) -> bool {
    proof.verify(leaf, claimed_root)
}
