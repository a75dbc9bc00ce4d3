//! Filesystem-backed storage gateway.
//!
//! Documents are content-addressed like [`MemoryGateway`](crate::MemoryGateway)
//! and written to `{root}/{locator}.json` together with their title. Handy
//! for running the CLI without an IPFS pinning account.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use writex_core::Locator;

use crate::error::{GatewayError, Result};
use crate::memory::cid_v0;
use crate::traits::StorageGateway;

#[derive(Serialize, Deserialize)]
struct DocumentFile {
    title: String,
    content: String,
}

/// Stores documents as JSON files under a root directory.
#[derive(Debug, Clone)]
pub struct LocalGateway {
    root: PathBuf,
}

impl LocalGateway {
    /// Use `root` as the document directory. It is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, locator: &Locator) -> PathBuf {
        self.root.join(format!("{}.json", locator))
    }
}

fn io_error(e: std::io::Error) -> GatewayError {
    GatewayError::Unavailable(e.to_string())
}

#[async_trait]
impl StorageGateway for LocalGateway {
    async fn put(&self, content: &str, title: &str) -> Result<Locator> {
        let locator = cid_v0(content.as_bytes())?;
        let path = self.document_path(&locator);

        if tokio::fs::try_exists(&path).await.map_err(io_error)? {
            tracing::debug!(%locator, "document already stored, skipping");
            return Ok(locator);
        }

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(io_error)?;

        let file = DocumentFile {
            title: title.to_string(),
            content: content.to_string(),
        };
        let bytes = serde_json::to_vec(&file)
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        tokio::fs::write(&path, bytes).await.map_err(io_error)?;

        tracing::debug!(%locator, path = %path.display(), "stored document on disk");
        Ok(locator)
    }

    async fn get(&self, locator: &Locator) -> Result<String> {
        let path = self.document_path(locator);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(GatewayError::NotFound(locator.to_string()))
            }
            Err(e) => return Err(io_error(e)),
        };

        let file: DocumentFile = serde_json::from_slice(&bytes)
            .map_err(|e| GatewayError::InvalidResponse(format!("{}: {}", path.display(), e)))?;
        Ok(file.content)
    }
}
