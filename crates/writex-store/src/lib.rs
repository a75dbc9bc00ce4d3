//! # WriteX Store
//!
//! Persistence for the writer registry. Provides a trait-based interface
//! with SQLite and in-memory implementations.
//!
//! ## Overview
//!
//! The registry only needs two things from a store: insert a record and find
//! one record by a filter. Both live on the [`WriterStore`] trait so the
//! registry is storage-agnostic. The primary implementation is
//! [`SqliteStore`], with [`MemoryStore`] for testing.
//!
//! ## Key Types
//!
//! - [`WriterStore`] - The async trait for registry persistence
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests
//! - [`InsertResult`] - Result of inserting a record
//! - [`WriterFilter`] - Lookup key for `find_writer`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use writex_store::{SqliteStore, WriterFilter, WriterStore};
//!
//! async fn example() {
//!     let store = SqliteStore::open("writex.db").unwrap();
//!
//!     let found = store
//!         .find_writer(&WriterFilter::PublicKey("pub123".into()))
//!         .await
//!         .unwrap();
//!     println!("{:?}", found);
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Unique public keys**: every backend enforces one record per public key
//!   at insert time, so concurrent creates cannot produce duplicates.
//! - **Idempotent inserts**: inserting a second record for a known public key
//!   returns `AlreadyExists` and leaves the first record untouched.

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{InsertResult, WriterFilter, WriterStore};
