//! Golden test vectors for address derivation, commitments and locators.
//!
//! Every WriteX implementation must reproduce these exactly for the same
//! secret, public key and content.

use writex_core::{derive_address, Commitment, DerivationSecret};
use writex_gateway::cid_v0;

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Address derivation secret.
    pub secret: &'static str,
    pub public_key: &'static str,
    pub content: &'static str,
    /// `0x` + 64 hex.
    pub expected_address: &'static str,
    /// SHA-256 of the content (hex), the first half of the commitment.
    pub expected_content_hash: &'static str,
    /// SHA-256 of the address string (hex), the second half.
    pub expected_author_hash: &'static str,
    /// CIDv0-style locator from the in-memory and local gateways.
    pub expected_locator: &'static str,
}

impl GoldenVector {
    /// The full 128-hex-character commitment.
    pub fn expected_commitment(&self) -> String {
        format!("{}{}", self.expected_content_hash, self.expected_author_hash)
    }
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "pub123 hello world",
            secret: "writex-test-secret",
            public_key: "pub123",
            content: "hello world",
            expected_address: "0xf83fcf99eecdc7acb76fadf89939e948ed55b266067bbb1156982807bb622eee",
            expected_content_hash: "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9",
            expected_author_hash: "17f2bd5d51829cb13a4b17570ea8cb93a8d359c657b04827d5361d08b9c6a74b",
            expected_locator: "QmaozNR7DZHQK1ZcU9p7QdrshMvXqWK6gpu5rmrkPdT3L4",
        },
        GoldenVector {
            name: "pub124 same content",
            secret: "writex-test-secret",
            public_key: "pub124",
            content: "hello world",
            expected_address: "0xb8c8e61da8f0133b86c60b899554ad7c010a426f5491b61aadf76c867324c4cb",
            expected_content_hash: "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9",
            expected_author_hash: "f894553d1aa3aafc987a480cd47914723e9ad9a25c565f2fe0e3cbac508f48cf",
            expected_locator: "QmaozNR7DZHQK1ZcU9p7QdrshMvXqWK6gpu5rmrkPdT3L4",
        },
        GoldenVector {
            name: "other secret, non-ASCII content",
            secret: "your-secret-key",
            public_key: "pub123",
            content: "h\u{e9}llo w\u{f6}rld \u{270d}",
            expected_address: "0x6e661e73471d29abd1717970221629dd3fcacc663bb9adb21dc489b8ee990049",
            expected_content_hash: "0c913d36857a1199486eb5bf9726c9ed68ca957d16c83b20cdf14b437358fd9b",
            expected_author_hash: "a8fb81924a84e95c42cf39d3dd661e2bd33ddbc58199eadc27f6324dda150bce",
            expected_locator: "QmPBi3yagCyjyKvGqX4LXccf67WsogVfqUJeeji7sbdrpJ",
        },
        GoldenVector {
            name: "empty content",
            secret: "writex-test-secret",
            public_key: "pub123",
            content: "",
            expected_address: "0xf83fcf99eecdc7acb76fadf89939e948ed55b266067bbb1156982807bb622eee",
            expected_content_hash: "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
            expected_author_hash: "17f2bd5d51829cb13a4b17570ea8cb93a8d359c657b04827d5361d08b9c6a74b",
            expected_locator: "QmdfTbBqBPQ7VNxZEYEj14VmRuZBkqFbiwReogJgS1zR1n",
        },
    ]
}

/// Recompute a vector's outputs and compare. Returns a description of the
/// first mismatch.
pub fn check_vector(vector: &GoldenVector) -> Result<(), String> {
    let secret = DerivationSecret::new(vector.secret).map_err(|e| e.to_string())?;
    let address = derive_address(&secret, vector.public_key).map_err(|e| e.to_string())?;
    if address.as_str() != vector.expected_address {
        return Err(format!(
            "address: expected {}, got {}",
            vector.expected_address, address
        ));
    }

    let commitment = Commitment::generate(vector.content.as_bytes(), &address);
    let expected = vector.expected_commitment();
    if commitment.to_hex() != expected {
        return Err(format!("commitment: expected {}, got {}", expected, commitment));
    }

    let locator = cid_v0(vector.content.as_bytes()).map_err(|e| e.to_string())?;
    if locator.as_str() != vector.expected_locator {
        return Err(format!(
            "locator: expected {}, got {}",
            vector.expected_locator, locator
        ));
    }

    Ok(())
}

/// Check every vector. Returns `(name, passed, detail)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| match check_vector(v) {
            Ok(()) => (v.name.to_string(), true, String::new()),
            Err(detail) => (v.name.to_string(), false, detail),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_pass() {
        for (name, passed, detail) in verify_all_vectors() {
            assert!(passed, "{name}: {detail}");
        }
    }

    #[test]
    fn test_vectors_are_well_formed() {
        for vector in all_vectors() {
            assert_eq!(vector.expected_address.len(), 66, "{}", vector.name);
            assert_eq!(vector.expected_commitment().len(), 128, "{}", vector.name);
        }
    }

    #[test]
    fn test_tampered_vector_is_reported() {
        let mut vector = all_vectors().remove(0);
        vector.content = "hello worle";
        let err = check_vector(&vector).unwrap_err();
        assert!(err.starts_with("commitment"), "{err}");
    }
}
