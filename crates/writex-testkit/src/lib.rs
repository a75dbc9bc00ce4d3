//! # WriteX Testkit
//!
//! Testing utilities for WriteX.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: fixed inputs with expected addresses, commitments
//!   and locators for cross-implementation checks
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: a service wired to in-memory collaborators
//!
//! ## Golden Vectors
//!
//! ```rust
//! use writex_testkit::vectors::verify_all_vectors;
//!
//! for (name, passed, detail) in verify_all_vectors() {
//!     assert!(passed, "{name}: {detail}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use writex_testkit::generators::{content, public_key};
//!
//! proptest! {
//!     #[test]
//!     fn derivation_is_deterministic(pk in public_key()) {
//!         let deriver = writex_testkit::test_deriver();
//!         prop_assert_eq!(deriver.derive(&pk).unwrap(), deriver.derive(&pk).unwrap());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use writex_testkit::TestFixture;
//!
//! let fixture = TestFixture::with_ledger();
//! assert!(fixture.gateway.is_empty());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{
    multi_writer_keys, random_public_key, test_deriver, test_secret, writer_public_key,
    TestFixture, TestService, TEST_SECRET,
};
pub use generators::{flip_bit, PublishParams};
pub use vectors::{all_vectors, check_vector, verify_all_vectors, GoldenVector};
