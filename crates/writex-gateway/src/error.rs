//! Error types for gateway and ledger collaborators.

use thiserror::Error;
use writex_core::CoreError;

/// Errors raised by a [`StorageGateway`](crate::StorageGateway).
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Nothing is stored under the locator.
    #[error("content not found: {0}")]
    NotFound(String),

    /// Transport-level HTTP failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote answered with a non-success status.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The remote answered, but not with something we can use.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// API credentials were not configured.
    #[error("missing credentials: {0}")]
    MissingCredentials(String),

    /// The gateway is refusing work.
    #[error("gateway unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Errors raised by a [`Ledger`](crate::Ledger).
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    #[error("ledger rejected record: {0}")]
    Rejected(String),
}

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;
