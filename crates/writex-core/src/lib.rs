//! # WriteX Core
//!
//! Pure primitives for WriteX: writer addresses, content commitments and the
//! identifiers that tie them together.
//!
//! This crate contains no I/O, no storage, no networking. It is pure computation
//! over hashes and keyed hashes.
//!
//! ## Key Types
//!
//! - [`WriterAddress`] - `0x`-prefixed address derived from a writer's public key
//! - [`AddressDeriver`] - HMAC-SHA256 derivation under an injected [`DerivationSecret`]
//! - [`Commitment`] - 64-byte binding of content to an author address
//! - [`Locator`] - Opaque reference to content held by a storage gateway
//! - [`WriterIdentity`] - A registry record
//!
//! ## Commitments
//!
//! A commitment is `SHA-256(content) || SHA-256(author_address)`. It binds a
//! document to an author but hides neither; see [`commitment`].

pub mod address;
pub mod commitment;
pub mod error;
pub mod types;

pub use address::{derive_address, AddressDeriver, DerivationSecret};
pub use commitment::{generate_commitment, verify_commitment, Commitment, COMMITMENT_LEN};
pub use error::{CoreError, Result};
pub use types::{now_millis, Locator, WriterAddress, WriterId, WriterIdentity};
