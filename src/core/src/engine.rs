//! Stateful facade that caches the most recently built tree.

use crate::errors::{MerkleError, MerkleResult};
use crate::hash::Digest;
use crate::tree::{MerkleTree, QueryOutcome};
use tracing::{debug, info};

/// Builds Merkle trees and answers containment queries against the last one.
///
/// Each call to [`MerkleEngine::build_root`] replaces the cached tree. Queries
/// fail with [`MerkleError::NotBuilt`] until a build has succeeded.
#[derive(Debug, Default)]
pub struct MerkleEngine {
    tree: Option<MerkleTree>,
}

impl MerkleEngine {
    /// Creates an engine with no cached tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a fresh tree from `leaves` and returns its root.
    ///
    /// Any previously cached tree is dropped first, so a failed build leaves
    /// the engine unbuilt.
    pub fn build_root<I>(&mut self, leaves: I) -> MerkleResult<Digest>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        if self.tree.take().is_some() {
            debug!("discarding cached merkle tree");
        }
        let tree = MerkleTree::build(leaves)?;
        let root = tree.root();
        info!(leaves = tree.leaf_count(), %root, "generated merkle root");
        self.tree = Some(tree);
        Ok(root)
    }

    /// Checks whether `leaf` is in the cached tree and extracts its proof.
    pub fn query(&self, leaf: impl AsRef<[u8]>) -> MerkleResult<QueryOutcome> {
        Ok(self.tree()?.query(leaf))
    }

    /// The cached tree.
    pub fn tree(&self) -> MerkleResult<&MerkleTree> {
        self.tree.as_ref().ok_or(MerkleError::NotBuilt)
    }

    /// The cached layer stack, root layer first.
    pub fn layers(&self) -> MerkleResult<&[Vec<Digest>]> {
        Ok(self.tree()?.layers())
    }

    /// Hands the cached tree over to the caller, leaving the engine unbuilt.
    pub fn into_tree(self) -> Option<MerkleTree> {
        self.tree
    }
}
