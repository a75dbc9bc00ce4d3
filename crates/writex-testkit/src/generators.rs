//! Proptest generators for property-based testing.

use proptest::prelude::*;

use writex_core::{Commitment, WriterAddress, COMMITMENT_LEN};

use crate::fixtures::writer_public_key;

/// Hex-encoded Ed25519 public key.
pub fn public_key() -> impl Strategy<Value = String> {
    any::<[u8; 32]>().prop_map(writer_public_key)
}

/// Arbitrary non-empty public key string, not necessarily a real key.
///
/// Never shaped like an address, so the service resolves it through the
/// registry.
pub fn raw_public_key() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{1,64}".prop_map(String::from)
}

/// A well-formed writer address.
pub fn address() -> impl Strategy<Value = WriterAddress> {
    any::<[u8; 32]>().prop_map(WriterAddress::from_digest)
}

/// Arbitrary commitment bytes.
pub fn commitment() -> impl Strategy<Value = Commitment> {
    (any::<[u8; 32]>(), any::<[u8; 32]>()).prop_map(|(a, b)| {
        let mut bytes = [0u8; COMMITMENT_LEN];
        bytes[..32].copy_from_slice(&a);
        bytes[32..].copy_from_slice(&b);
        Commitment::from_bytes(bytes)
    })
}

/// Non-empty document body, any Unicode.
pub fn content(max_chars: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 1..=max_chars).prop_map(|chars| chars.into_iter().collect())
}

/// Title that passes publish validation.
pub fn title() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ,.!?-]{0,63}".prop_map(String::from)
}

/// Inputs for one publish call.
#[derive(Debug, Clone)]
pub struct PublishParams {
    pub public_key: String,
    pub content: String,
    pub title: String,
}

impl Arbitrary for PublishParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (public_key(), content(512), title())
            .prop_map(|(public_key, content, title)| PublishParams {
                public_key,
                content,
                title,
            })
            .boxed()
    }
}

/// Flip one bit of `content`'s UTF-8 bytes, or `None` if the result is not
/// valid UTF-8.
pub fn flip_bit(content: &str, bit: usize) -> Option<String> {
    let mut bytes = content.as_bytes().to_vec();
    if bytes.is_empty() {
        return None;
    }
    let bit = bit % (bytes.len() * 8);
    bytes[bit / 8] ^= 1 << (bit % 8);
    String::from_utf8(bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_raw_keys_never_parse_as_addresses(key in raw_public_key()) {
            prop_assert!(WriterAddress::parse(&key).is_err());
        }

        #[test]
        fn test_generated_titles_are_not_blank(title in title()) {
            prop_assert!(!title.trim().is_empty());
        }

        #[test]
        fn test_flip_bit_changes_content(content in content(64), bit in any::<usize>()) {
            if let Some(flipped) = flip_bit(&content, bit) {
                prop_assert_ne!(flipped, content);
            }
        }
    }

    #[test]
    fn test_flip_bit_ascii() {
        assert_eq!(flip_bit("hello world", 0).as_deref(), Some("iello world"));
        assert_eq!(flip_bit("", 3), None);
    }
}
