//! CLI error types

use thiserror::Error;
use writex::gateway::GatewayError;
use writex::WritexError;

/// CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Writex(#[from] WritexError),

    #[error("gateway setup failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
