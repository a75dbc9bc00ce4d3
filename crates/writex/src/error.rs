//! Error types for the WriteX service.

use thiserror::Error;
use writex_core::{CoreError, Locator};
use writex_gateway::{GatewayError, LedgerError};
use writex_store::StoreError;

/// Errors that can occur during registry and pipeline operations.
#[derive(Debug, Error)]
pub enum WritexError {
    /// Caller input was rejected before any side effect.
    #[error("validation error: {0}")]
    Validation(String),

    /// No writer is registered for a public key, or nothing is stored at a
    /// locator.
    #[error("not found: {0}")]
    NotFound(String),

    /// The address derivation primitive failed.
    #[error("address derivation failed: {0}")]
    Derivation(String),

    /// A concurrent create left the registry in a state we cannot resolve.
    #[error("registry conflict: {0}")]
    Conflict(String),

    /// The storage gateway rejected the upload.
    #[error("upload failed: {0}")]
    Upload(#[source] GatewayError),

    /// The upload succeeded but the ledger write did not. The content is
    /// stored at `locator` with no ledger record.
    #[error("ledger write failed for uploaded content {locator}: {source}")]
    Ledger {
        locator: Locator,
        #[source]
        source: LedgerError,
    },

    /// The storage gateway failed to return content for some reason other
    /// than it being absent.
    #[error("fetch failed: {0}")]
    Fetch(#[source] GatewayError),

    /// Stored content does not match the commitment for the claimed author.
    #[error("commitment does not match content and author")]
    ProofMismatch,

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Configuration could not be loaded or is incomplete.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<CoreError> for WritexError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Derivation(msg) => WritexError::Derivation(msg),
            other => WritexError::Validation(other.to_string()),
        }
    }
}

impl WritexError {
    /// Locator of content that was uploaded before the operation failed.
    pub fn orphaned_locator(&self) -> Option<&Locator> {
        match self {
            WritexError::Ledger { locator, .. } => Some(locator),
            _ => None,
        }
    }
}

/// Result type for WriteX operations.
pub type Result<T> = std::result::Result<T, WritexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_kinds() {
        assert!(matches!(
            WritexError::from(CoreError::Derivation("bad key".into())),
            WritexError::Derivation(_)
        ));
        assert!(matches!(
            WritexError::from(CoreError::EmptyPublicKey),
            WritexError::Validation(_)
        ));
        assert!(matches!(
            WritexError::from(CoreError::InvalidCommitment("short".into())),
            WritexError::Validation(_)
        ));
    }

    #[test]
    fn test_ledger_error_carries_locator() {
        let locator = Locator::parse("QmOrphan").unwrap();
        let err = WritexError::Ledger {
            locator: locator.clone(),
            source: LedgerError::Unavailable("down".into()),
        };
        assert_eq!(err.orphaned_locator(), Some(&locator));
        assert!(err.to_string().contains("QmOrphan"));
        assert!(WritexError::ProofMismatch.orphaned_locator().is_none());
    }
}
