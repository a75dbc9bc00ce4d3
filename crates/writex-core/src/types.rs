//! Strong type definitions for WriteX.
//!
//! All identifiers are newtypes to prevent misuse at compile time.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// Number of hex characters after the `0x` prefix of an address.
const ADDRESS_HEX_LEN: usize = 64;

/// A 12-byte registry record identifier.
///
/// Freshly generated for every new writer; carries no meaning beyond identity.
/// Serialized as 24 lowercase hex characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WriterId(pub [u8; 12]);

impl WriterId {
    /// Generate a new random identifier.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 12];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 12] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| CoreError::InvalidWriterId(e.to_string()))?;
        let arr: [u8; 12] = bytes
            .try_into()
            .map_err(|_| CoreError::InvalidWriterId(format!("expected 24 hex chars: {s}")))?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for WriterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WriterId({})", self.to_hex())
    }
}

impl fmt::Display for WriterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for WriterId {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

impl From<WriterId> for String {
    fn from(id: WriterId) -> Self {
        id.to_hex()
    }
}

/// A writer's derived address: `0x` followed by 64 lowercase hex characters.
///
/// The string form is canonical. Parsing accepts an upper-case prefix or
/// mixed-case digits and normalises them, so two spellings of the same
/// address always commit to the same bytes.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WriterAddress(String);

impl WriterAddress {
    /// Build an address from a 32-byte digest.
    pub fn from_digest(digest: [u8; 32]) -> Self {
        Self(format!("0x{}", hex::encode(digest)))
    }

    /// Parse and normalise an address string.
    pub fn parse(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| CoreError::InvalidAddress(format!("missing 0x prefix: {s}")))?;

        if digits.len() != ADDRESS_HEX_LEN {
            return Err(CoreError::InvalidAddress(format!(
                "expected {ADDRESS_HEX_LEN} hex chars, got {}",
                digits.len()
            )));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CoreError::InvalidAddress(format!("non-hex characters: {s}")));
        }

        Ok(Self(format!("0x{}", digits.to_ascii_lowercase())))
    }

    /// The canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for WriterAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WriterAddress({}…)", &self.0[..18])
    }
}

impl fmt::Display for WriterAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for WriterAddress {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WriterAddress {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<WriterAddress> for String {
    fn from(addr: WriterAddress) -> Self {
        addr.0
    }
}

impl AsRef<str> for WriterAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An opaque reference to content held by a storage gateway.
///
/// The core never interprets a locator beyond requiring a non-empty ASCII
/// alphanumeric token, which keeps it safe to splice into gateway URLs.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locator(String);

impl Locator {
    /// Parse a locator string.
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(CoreError::InvalidLocator("locator is empty".into()));
        }
        if !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(CoreError::InvalidLocator(format!(
                "unexpected characters in {s:?}"
            )));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Locator({})", self.0)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Locator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Locator {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<Locator> for String {
    fn from(locator: Locator) -> Self {
        locator.0
    }
}

/// A writer registry record.
///
/// Exactly one record exists per `public_key`; `address` is derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriterIdentity {
    pub id: WriterId,
    pub public_key: String,
    pub address: WriterAddress,
    /// Creation time (Unix ms).
    pub created_at: i64,
}

impl WriterIdentity {
    /// Create a new record with a fresh id.
    pub fn new(public_key: impl Into<String>, address: WriterAddress, created_at: i64) -> Self {
        Self {
            id: WriterId::generate(),
            public_key: public_key.into(),
            address,
            created_at,
        }
    }
}

/// Get current time in milliseconds.
pub fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}
