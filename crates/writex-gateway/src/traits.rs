//! Collaborator traits for content storage and the publication ledger.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use writex_core::{Commitment, Locator, WriterAddress};

use crate::error::{LedgerError, Result};

/// A content-addressable store reached through some gateway.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait StorageGateway: Send + Sync {
    /// Store `content` under a human-readable `title`, returning its locator.
    async fn put(&self, content: &str, title: &str) -> Result<Locator>;

    /// Fetch the content stored under `locator`.
    ///
    /// Returns `GatewayError::NotFound` when nothing is stored there.
    async fn get(&self, locator: &Locator) -> Result<String>;
}

#[async_trait]
impl<G: StorageGateway + ?Sized> StorageGateway for Arc<G> {
    async fn put(&self, content: &str, title: &str) -> Result<Locator> {
        (**self).put(content, title).await
    }

    async fn get(&self, locator: &Locator) -> Result<String> {
        (**self).get(locator).await
    }
}

/// One publication, as handed to a [`Ledger`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub locator: Locator,
    pub author: WriterAddress,
    pub commitment: Commitment,
    /// When the publish pipeline produced the entry (Unix ms).
    pub recorded_at: i64,
}

/// Acknowledgement from a ledger write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerAck {
    /// Position of the entry in the ledger, starting at 1.
    pub sequence: u64,
}

/// An append-only record of publications.
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn record(&self, entry: &LedgerEntry) -> std::result::Result<LedgerAck, LedgerError>;
}

#[async_trait]
impl<L: Ledger + ?Sized> Ledger for Arc<L> {
    async fn record(&self, entry: &LedgerEntry) -> std::result::Result<LedgerAck, LedgerError> {
        (**self).record(entry).await
    }
}
