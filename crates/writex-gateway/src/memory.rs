//! In-memory gateway and ledger.
//!
//! Primarily for testing. The gateway is content-addressed the same way a
//! CIDv0 is, so locators look like the `Qm...` strings IPFS hands out.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use writex_core::Locator;

use crate::error::{GatewayError, LedgerError, Result};
use crate::traits::{Ledger, LedgerAck, LedgerEntry, StorageGateway};

/// Multihash header for a 32-byte SHA-256 digest.
const SHA256_MULTIHASH_PREFIX: [u8; 2] = [0x12, 0x20];

/// Compute a CIDv0-style locator: `base58(0x12 0x20 || SHA-256(content))`.
///
/// IPFS itself chunks files into UnixFS blocks before hashing, so this will
/// not match the CID a real node assigns. It only has the same shape.
pub fn cid_v0(content: &[u8]) -> Result<Locator> {
    let mut multihash = Vec::with_capacity(34);
    multihash.extend_from_slice(&SHA256_MULTIHASH_PREFIX);
    multihash.extend_from_slice(&Sha256::digest(content));

    Ok(Locator::parse(&bs58::encode(multihash).into_string())?)
}

struct StoredDocument {
    content: String,
    title: String,
}

/// In-memory content-addressed gateway.
#[derive(Default)]
pub struct MemoryGateway {
    documents: RwLock<HashMap<Locator, StoredDocument>>,
    failing: AtomicBool,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `put` fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Title recorded for a locator.
    pub fn title(&self, locator: &Locator) -> Option<String> {
        let docs = self.documents.read().ok()?;
        docs.get(locator).map(|d| d.title.clone())
    }

    /// Replace stored content in place, simulating a tampering gateway.
    pub fn overwrite(&self, locator: &Locator, content: &str) -> bool {
        match self.documents.write() {
            Ok(mut docs) => match docs.get_mut(locator) {
                Some(doc) => {
                    doc.content = content.to_string();
                    true
                }
                None => false,
            },
            Err(_) => false,
        }
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl StorageGateway for MemoryGateway {
    async fn put(&self, content: &str, title: &str) -> Result<Locator> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(GatewayError::Unavailable("memory gateway set to fail".into()));
        }

        let locator = cid_v0(content.as_bytes())?;
        let mut docs = self
            .documents
            .write()
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;
        docs.entry(locator.clone()).or_insert_with(|| StoredDocument {
            content: content.to_string(),
            title: title.to_string(),
        });

        tracing::debug!(%locator, title, "stored document in memory");
        Ok(locator)
    }

    async fn get(&self, locator: &Locator) -> Result<String> {
        let docs = self
            .documents
            .read()
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;
        docs.get(locator)
            .map(|d| d.content.clone())
            .ok_or_else(|| GatewayError::NotFound(locator.to_string()))
    }
}

/// In-memory ledger.
#[derive(Default)]
pub struct MemoryLedger {
    entries: Mutex<Vec<LedgerEntry>>,
    failing: AtomicBool,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `record` fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of recorded entries, oldest first.
    pub fn entries(&self) -> Vec<LedgerEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn record(&self, entry: &LedgerEntry) -> std::result::Result<LedgerAck, LedgerError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(LedgerError::Unavailable("memory ledger set to fail".into()));
        }

        let mut entries = self
            .entries
            .lock()
            .map_err(|e| LedgerError::Unavailable(e.to_string()))?;
        entries.push(entry.clone());
        Ok(LedgerAck {
            sequence: entries.len() as u64,
        })
    }
}
