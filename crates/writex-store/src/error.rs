//! Error types for the store module.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A record with the same id but a different public key exists.
    #[error("writer id {0} already taken")]
    DuplicateId(String),

    /// Invalid data in storage.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// A lock guarding the backend was poisoned by a panicking writer.
    #[error("store lock poisoned: {0}")]
    Poisoned(String),

    /// The blocking task running a query failed.
    #[error("blocking task failed: {0}")]
    Task(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
