//! # WriteX
//!
//! Pseudonymous writers publishing to content-addressed storage, with a
//! checkable binding between each document and its author.
//!
//! ## Overview
//!
//! - **Registry**: maps a writer's long-term public key to an address
//!   derived with a server-held HMAC key. Creating a writer is idempotent.
//! - **Publish**: commits the content to the author's address, uploads it
//!   through a [`StorageGateway`](gateway::StorageGateway) and optionally
//!   records the result in a [`Ledger`](gateway::Ledger).
//! - **Verify**: fetches the content at a locator and checks the commitment
//!   against a claimed author.
//!
//! A commitment is `SHA-256(content) || SHA-256(address)`. It proves
//! integrity and attribution to anyone holding the inputs. It is not a
//! zero-knowledge proof.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use writex::core::{AddressDeriver, DerivationSecret};
//! use writex::gateway::MemoryGateway;
//! use writex::store::SqliteStore;
//! use writex::{Registry, Writex};
//!
//! async fn example() -> writex::Result<()> {
//!     let secret = DerivationSecret::new("server-held-secret")?;
//!     let store = SqliteStore::open("writex.db")?;
//!     let registry = Registry::new(store, AddressDeriver::new(secret));
//!     let service = Writex::new(registry, Arc::new(MemoryGateway::new()));
//!
//!     let writer = service.create_writer("pub123").await?;
//!     let publication = service.publish("pub123", "hello world", "My Post").await?;
//!
//!     let verification = service
//!         .verify(
//!             publication.locator.as_str(),
//!             writer.address.as_str(),
//!             &publication.commitment.to_hex(),
//!         )
//!         .await?;
//!     assert!(verification.valid);
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `writex::core` - addresses, commitments, identifiers
//! - `writex::store` - registry persistence (SQLite, memory)
//! - `writex::gateway` - storage gateways and ledgers

pub mod config;
pub mod error;
pub mod registry;
pub mod service;

// Re-export component crates
pub use writex_core as core;
pub use writex_gateway as gateway;
pub use writex_store as store;

// Re-export main types for convenience
pub use config::{LedgerBackend, PublishLimits, StorageBackend, StorageConfig, WritexConfig};
pub use error::{Result, WritexError};
pub use registry::Registry;
pub use service::{Publication, Verification, Writex};

// Re-export commonly used core types
pub use writex_core::{
    Commitment, DerivationSecret, Locator, WriterAddress, WriterId, WriterIdentity,
};
