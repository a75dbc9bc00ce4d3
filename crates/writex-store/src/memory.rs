//! In-memory implementation of the WriterStore trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use writex_core::{WriterAddress, WriterId, WriterIdentity};

use crate::error::{Result, StoreError};
use crate::traits::{InsertResult, WriterFilter, WriterStore};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock; the
/// uniqueness check and the insert share one write guard.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

#[derive(Default)]
struct MemoryStoreInner {
    /// Records indexed by id.
    writers: HashMap<WriterId, WriterIdentity>,

    /// public_key -> id.
    by_public_key: HashMap<String, WriterId>,

    /// address -> id.
    by_address: HashMap<WriterAddress, WriterId>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StoreError {
    StoreError::Poisoned(e.to_string())
}

#[async_trait]
impl WriterStore for MemoryStore {
    async fn insert_writer(&self, writer: &WriterIdentity) -> Result<InsertResult> {
        let mut inner = self.inner.write().map_err(poisoned)?;

        if inner.by_public_key.contains_key(&writer.public_key) {
            return Ok(InsertResult::AlreadyExists);
        }
        if inner.writers.contains_key(&writer.id) {
            return Err(StoreError::DuplicateId(writer.id.to_hex()));
        }

        inner
            .by_public_key
            .insert(writer.public_key.clone(), writer.id);
        inner.by_address.insert(writer.address.clone(), writer.id);
        inner.writers.insert(writer.id, writer.clone());

        Ok(InsertResult::Inserted)
    }

    async fn find_writer(&self, filter: &WriterFilter) -> Result<Option<WriterIdentity>> {
        let inner = self.inner.read().map_err(poisoned)?;

        let id = match filter {
            WriterFilter::Id(id) => Some(*id),
            WriterFilter::PublicKey(pk) => inner.by_public_key.get(pk).copied(),
            WriterFilter::Address(addr) => inner.by_address.get(addr).copied(),
        };

        Ok(id.and_then(|id| inner.writers.get(&id).cloned()))
    }

    async fn count_writers(&self) -> Result<usize> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.writers.len())
    }
}
