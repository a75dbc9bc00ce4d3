//! Service configuration.
//!
//! Loaded from TOML. Every field has a default except the derivation secret,
//! which must be supplied either in the file or by the caller before the
//! registry is built.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use writex_core::DerivationSecret;
use writex_gateway::PinataConfig;

use crate::error::{Result, WritexError};

/// Which [`StorageGateway`](writex_gateway::StorageGateway) to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON files under [`StorageConfig::local_dir`].
    #[default]
    Local,
    /// Process memory. Nothing survives a restart.
    Memory,
    /// IPFS through the Pinata pinning API.
    Pinata,
}

/// Which [`Ledger`](writex_gateway::Ledger) publications are recorded to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerBackend {
    #[default]
    None,
    /// Structured log events on the `writex::ledger` target.
    Tracing,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("writex.db")
}

fn default_local_dir() -> PathBuf {
    PathBuf::from("writex-documents")
}

fn default_max_content_bytes() -> usize {
    1024 * 1024
}

fn default_max_title_len() -> usize {
    256
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_local_dir")]
    pub local_dir: PathBuf,
    /// Required when `backend = "pinata"`.
    #[serde(default)]
    pub pinata: Option<PinataConfig>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            local_dir: default_local_dir(),
            pinata: None,
        }
    }
}

/// Input limits enforced by the publish pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PublishLimits {
    #[serde(default = "default_max_content_bytes")]
    pub max_content_bytes: usize,
    /// Counted in characters, not bytes.
    #[serde(default = "default_max_title_len")]
    pub max_title_len: usize,
}

impl Default for PublishLimits {
    fn default() -> Self {
        Self {
            max_content_bytes: default_max_content_bytes(),
            max_title_len: default_max_title_len(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WritexConfig {
    #[serde(default)]
    pub address_secret: Option<DerivationSecret>,
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ledger: LedgerBackend,
    #[serde(default)]
    pub limits: PublishLimits,
}

impl Default for WritexConfig {
    fn default() -> Self {
        Self {
            address_secret: None,
            database_path: default_database_path(),
            storage: StorageConfig::default(),
            ledger: LedgerBackend::default(),
            limits: PublishLimits::default(),
        }
    }
}

impl WritexConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| WritexError::Config(e.to_string()))
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| WritexError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    /// The derivation secret, or a configuration error if none was given.
    pub fn derivation_secret(&self) -> Result<DerivationSecret> {
        self.address_secret
            .clone()
            .ok_or_else(|| WritexError::Config("address_secret is not set".into()))
    }

    /// Pinata settings, required when the Pinata backend is selected.
    pub fn pinata(&self) -> Result<&PinataConfig> {
        self.storage
            .pinata
            .as_ref()
            .ok_or_else(|| WritexError::Config("storage.pinata section is missing".into()))
    }
}
