//! Writer address derivation.
//!
//! An address is `0x || hex(HMAC-SHA256(secret, public_key))`. The derivation
//! is keyed and deterministic: the same public key always maps to the same
//! address under the same secret, which is what lets the registry look a
//! writer up again. The secret is injected by the caller; there is no
//! built-in default.

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use std::fmt;

use crate::error::{CoreError, Result};
use crate::types::WriterAddress;

type HmacSha256 = Hmac<Sha256>;

/// The server-held key for address derivation.
///
/// Never printed: `Debug` is redacted.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct DerivationSecret(Vec<u8>);

impl DerivationSecret {
    /// Wrap raw key material. Empty keys are rejected.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(CoreError::EmptySecret);
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for DerivationSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DerivationSecret(<{} bytes redacted>)", self.0.len())
    }
}

impl TryFrom<String> for DerivationSecret {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self> {
        Self::new(s.into_bytes())
    }
}

/// Derive the address for `public_key` under `secret`.
pub fn derive_address(secret: &DerivationSecret, public_key: &str) -> Result<WriterAddress> {
    if public_key.is_empty() {
        return Err(CoreError::EmptyPublicKey);
    }

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| CoreError::Derivation(e.to_string()))?;
    mac.update(public_key.as_bytes());

    Ok(WriterAddress::from_digest(mac.finalize().into_bytes().into()))
}

/// Holds the derivation secret so callers don't thread it through every call.
#[derive(Debug, Clone)]
pub struct AddressDeriver {
    secret: DerivationSecret,
}

impl AddressDeriver {
    pub fn new(secret: DerivationSecret) -> Self {
        Self { secret }
    }

    /// Derive the address for a public key.
    pub fn derive(&self, public_key: &str) -> Result<WriterAddress> {
        derive_address(&self.secret, public_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn deriver() -> AddressDeriver {
        AddressDeriver::new(DerivationSecret::new("writex-test-secret").unwrap())
    }

    #[test]
    fn test_known_vector() {
        let addr = deriver().derive("pub123").unwrap();
        assert_eq!(
            addr.as_str(),
            "0xf83fcf99eecdc7acb76fadf89939e948ed55b266067bbb1156982807bb622eee"
        );
    }

    #[test]
    fn test_secret_changes_address() {
        let other = AddressDeriver::new(DerivationSecret::new("your-secret-key").unwrap());
        let addr = other.derive("pub123").unwrap();
        assert_eq!(
            addr.as_str(),
            "0x6e661e73471d29abd1717970221629dd3fcacc663bb9adb21dc489b8ee990049"
        );
        assert_ne!(addr, deriver().derive("pub123").unwrap());
    }

    #[test]
    fn test_empty_public_key_rejected() {
        assert_eq!(deriver().derive(""), Err(CoreError::EmptyPublicKey));
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert_eq!(DerivationSecret::new(Vec::new()), Err(CoreError::EmptySecret));
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let secret = DerivationSecret::new("hunter2").unwrap();
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("hunter2"));
    }

    proptest! {
        #[test]
        fn derivation_is_deterministic(pk in "\\PC{1,64}") {
            let d = deriver();
            prop_assert_eq!(d.derive(&pk).unwrap(), d.derive(&pk).unwrap());
        }

        #[test]
        fn derivation_has_address_shape(pk in "\\PC{1,64}") {
            let addr = deriver().derive(&pk).unwrap();
            prop_assert_eq!(addr.as_str().len(), 66);
            prop_assert!(addr.as_str().starts_with("0x"));
            prop_assert_eq!(WriterAddress::parse(addr.as_str()).unwrap(), addr);
        }

        #[test]
        fn distinct_keys_get_distinct_addresses(a in "[a-z0-9]{1,32}", b in "[a-z0-9]{1,32}") {
            prop_assume!(a != b);
            let d = deriver();
            prop_assert_ne!(d.derive(&a).unwrap(), d.derive(&b).unwrap());
        }
    }
}
