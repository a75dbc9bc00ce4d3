//! Error types for WriteX Core.

use thiserror::Error;

/// Errors raised by the pure primitives.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("public key must not be empty")]
    EmptyPublicKey,

    #[error("derivation secret must not be empty")]
    EmptySecret,

    #[error("address derivation failed: {0}")]
    Derivation(String),

    #[error("invalid writer address: {0}")]
    InvalidAddress(String),

    #[error("invalid commitment: {0}")]
    InvalidCommitment(String),

    #[error("invalid locator: {0}")]
    InvalidLocator(String),

    #[error("invalid writer id: {0}")]
    InvalidWriterId(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
