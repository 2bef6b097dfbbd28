//! Double SHA-256 hashing primitive and the digest type it produces.
//!
//! Every digest in the tree is produced by hashing the input once, rendering
//! that digest as lowercase hex, and hashing the hex text again. Sibling
//! digests are combined by concatenating their hex text, never their raw bytes.

use crate::errors::{MerkleError, MerkleResult};
use sha2::{Digest as _, Sha256};
use std::fmt;

/// Length of a digest in bytes.
pub const DIGEST_LENGTH: usize = 32;

/// A 32-byte double SHA-256 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Digest([u8; DIGEST_LENGTH]);

impl Digest {
    /// Creates a digest from raw bytes.
    pub const fn new(bytes: [u8; DIGEST_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parses a digest from hex text, with or without a `0x` prefix.
    pub fn from_hex(hex_str: &str) -> MerkleResult<Self> {
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(hex_str)
            .map_err(|e| MerkleError::InvalidDigest(format!("invalid hex: {}", e)))?;
        if bytes.len() != DIGEST_LENGTH {
            return Err(MerkleError::InvalidDigest(format!(
                "expected {} bytes, got {}",
                DIGEST_LENGTH,
                bytes.len()
            )));
        }
        let mut arr = [0u8; DIGEST_LENGTH];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// Lowercase hex rendering. This is the text that gets concatenated
    /// when two digests are combined.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; DIGEST_LENGTH] {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// Digests travel as hex strings in every serialized form.
impl serde::Serialize for Digest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Digest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct DigestVisitor;

        impl<'de> serde::de::Visitor<'de> for DigestVisitor {
            type Value = Digest;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a 64-character hex digest")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Digest::from_hex(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(DigestVisitor)
    }
}

fn sha256(data: &[u8]) -> [u8; DIGEST_LENGTH] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let mut result = [0u8; DIGEST_LENGTH];
    result.copy_from_slice(&hasher.finalize());
    result
}

/// Hashes `data` with SHA-256, then hashes the hex text of that digest again.
pub fn double_hash(data: impl AsRef<[u8]>) -> Digest {
    let first = sha256(data.as_ref());
    Digest(sha256(hex::encode(first).as_bytes()))
}

/// Parent digest of two siblings: `double_hash(hex(left) ++ hex(right))`.
pub fn combine(left: &Digest, right: &Digest) -> Digest {
    let mut joined = String::with_capacity(DIGEST_LENGTH * 4);
    joined.push_str(&left.to_hex());
    joined.push_str(&right.to_hex());
    double_hash(joined)
}
