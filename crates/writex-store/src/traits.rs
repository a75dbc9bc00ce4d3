//! WriterStore trait: the abstract interface for registry persistence.
//!
//! This trait allows the registry to be storage-agnostic. Implementations
//! include SQLite (primary) and in-memory (for tests).

use std::sync::Arc;

use async_trait::async_trait;
use writex_core::{WriterAddress, WriterId, WriterIdentity};

use crate::error::Result;

/// Result of inserting a writer record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertResult {
    /// Record was inserted.
    Inserted,
    /// A record for this public key already exists (idempotent - not an error).
    AlreadyExists,
}

/// Lookup key for [`WriterStore::find_writer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterFilter {
    PublicKey(String),
    Address(WriterAddress),
    Id(WriterId),
}

/// The WriterStore trait: async interface for registry persistence.
///
/// # Design Notes
///
/// - **Uniqueness**: implementations must reject a second record for the same
///   `public_key` atomically, returning `AlreadyExists`. The check and the
///   write happen under one lock or one statement, never as find-then-insert.
/// - **No lifecycle**: a store is opened by the caller and handed in; nothing
///   here reaches for a global connection.
#[async_trait]
pub trait WriterStore: Send + Sync {
    /// Insert a writer record.
    ///
    /// # Returns
    /// - `Inserted` if no record existed for `writer.public_key`.
    /// - `AlreadyExists` if one did; the stored record is left unchanged.
    async fn insert_writer(&self, writer: &WriterIdentity) -> Result<InsertResult>;

    /// Find a single record matching `filter`.
    async fn find_writer(&self, filter: &WriterFilter) -> Result<Option<WriterIdentity>>;

    /// Number of stored records.
    async fn count_writers(&self) -> Result<usize>;
}

#[async_trait]
impl<S: WriterStore + ?Sized> WriterStore for Arc<S> {
    async fn insert_writer(&self, writer: &WriterIdentity) -> Result<InsertResult> {
        (**self).insert_writer(writer).await
    }

    async fn find_writer(&self, filter: &WriterFilter) -> Result<Option<WriterIdentity>> {
        (**self).find_writer(filter).await
    }

    async fn count_writers(&self) -> Result<usize> {
        (**self).count_writers().await
    }
}
