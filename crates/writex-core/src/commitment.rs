//! Content commitments.
//!
//! A commitment binds a document to an author address:
//!
//! ```text
//! commitment = SHA-256(content) || SHA-256(author_address)
//! ```
//!
//! The content hash comes first. Verification recomputes the value from the
//! presented content and author and compares all 64 bytes.
//!
//! Anyone holding a commitment can test it against a guessed author or
//! document, so it offers integrity and attribution only. It is not a
//! zero-knowledge proof and hides nothing.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};
use crate::types::WriterAddress;

/// Length of a commitment in bytes.
pub const COMMITMENT_LEN: usize = 64;

/// A 64-byte content commitment. Serialized as 128 lowercase hex characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Commitment([u8; COMMITMENT_LEN]);

impl Commitment {
    /// Commit `content` to `author`.
    pub fn generate(content: &[u8], author: &WriterAddress) -> Self {
        let content_hash = Sha256::digest(content);
        let author_hash = Sha256::digest(author.as_str().as_bytes());

        let mut bytes = [0u8; COMMITMENT_LEN];
        bytes[..32].copy_from_slice(&content_hash);
        bytes[32..].copy_from_slice(&author_hash);
        Self(bytes)
    }

    /// Check that this commitment was produced from `content` and `author`.
    pub fn verify(&self, content: &[u8], author: &WriterAddress) -> bool {
        Self::generate(content, author) == *self
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; COMMITMENT_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; COMMITMENT_LEN] {
        &self.0
    }

    /// The SHA-256 of the committed content.
    pub fn content_hash(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.0[..32]);
        out
    }

    /// The SHA-256 of the committed author address.
    pub fn author_hash(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.0[32..]);
        out
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a 128-character hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        if s.len() != COMMITMENT_LEN * 2 {
            return Err(CoreError::InvalidCommitment(format!(
                "expected {} hex chars, got {}",
                COMMITMENT_LEN * 2,
                s.len()
            )));
        }
        let bytes = hex::decode(s).map_err(|e| CoreError::InvalidCommitment(e.to_string()))?;
        let mut arr = [0u8; COMMITMENT_LEN];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({}...)", &self.to_hex()[..16])
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Commitment {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Commitment {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

impl From<Commitment> for String {
    fn from(c: Commitment) -> Self {
        c.to_hex()
    }
}

/// Free-function form of [`Commitment::generate`].
pub fn generate_commitment(content: &[u8], author: &WriterAddress) -> Commitment {
    Commitment::generate(content, author)
}

/// Free-function form of [`Commitment::verify`].
pub fn verify_commitment(commitment: &Commitment, content: &[u8], author: &WriterAddress) -> bool {
    commitment.verify(content, author)
}
