//! WriteX CLI
//!
//! Composition root for the service: reads the configuration, opens the
//! registry database, picks a storage gateway and runs one command.
//!
//! Secrets can come from the environment so they stay out of shell
//! history and config files:
//!
//! - `WRITEX_ADDRESS_SECRET` - address derivation key
//! - `PINATA_API_KEY` / `PINATA_API_SECRET` - Pinata credentials
//!
//! Exit status is 0 on success and 1 on any error. `verify` exits 2 when
//! the commitment does not match.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use writex::core::DerivationSecret;
use writex::gateway::PinataConfig;
use writex::{LedgerBackend, StorageBackend, WritexConfig, WritexError};

mod commands;
mod error;
mod output;

pub use commands::{build_service, execute, Command, Outcome, Service};
pub use error::{CliError, CliResult};
pub use output::OutputFormat;

/// Storage backend names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageArg {
    Local,
    Memory,
    Pinata,
}

impl From<StorageArg> for StorageBackend {
    fn from(arg: StorageArg) -> Self {
        match arg {
            StorageArg::Local => StorageBackend::Local,
            StorageArg::Memory => StorageBackend::Memory,
            StorageArg::Pinata => StorageBackend::Pinata,
        }
    }
}

/// WriteX CLI application
#[derive(Parser, Debug)]
#[command(name = "writex")]
#[command(about = "Register pseudonymous writers, publish documents and verify authorship", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file
    #[arg(long, env = "WRITEX_CONFIG", default_value = "writex.toml")]
    pub config: PathBuf,

    /// Address derivation secret
    #[arg(long, env = "WRITEX_ADDRESS_SECRET", hide_env_values = true)]
    pub secret: Option<String>,

    /// Registry database file
    #[arg(long, env = "WRITEX_DATABASE")]
    pub db: Option<PathBuf>,

    /// Storage backend
    #[arg(long, value_enum)]
    pub storage: Option<StorageArg>,

    /// Directory for the local storage backend
    #[arg(long, env = "WRITEX_DOCUMENTS")]
    pub documents: Option<PathBuf>,

    #[arg(long, env = "PINATA_API_KEY", hide_env_values = true)]
    pub pinata_api_key: Option<String>,

    #[arg(long, env = "PINATA_API_SECRET", hide_env_values = true)]
    pub pinata_api_secret: Option<String>,

    /// Log each publication as a ledger event
    #[arg(long)]
    pub ledger: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Load the configuration file and apply command-line overrides.
    pub fn resolve_config(&self) -> CliResult<WritexConfig> {
        let mut config = WritexConfig::load(&self.config)?;

        if let Some(secret) = &self.secret {
            config.address_secret =
                Some(DerivationSecret::new(secret.as_bytes()).map_err(WritexError::from)?);
        }
        if let Some(db) = &self.db {
            config.database_path = db.clone();
        }
        if let Some(storage) = self.storage {
            config.storage.backend = storage.into();
        }
        if let Some(dir) = &self.documents {
            config.storage.local_dir = dir.clone();
        }
        if self.pinata_api_key.is_some() || self.pinata_api_secret.is_some() {
            let pinata = config
                .storage
                .pinata
                .get_or_insert_with(|| PinataConfig::new("", ""));
            if let Some(key) = &self.pinata_api_key {
                pinata.api_key = key.clone();
            }
            if let Some(secret) = &self.pinata_api_secret {
                pinata.api_secret = secret.clone();
            }
        }
        if self.ledger {
            config.ledger = LedgerBackend::Tracing;
        }

        Ok(config)
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .try_init();
}

/// Run using the current process arguments.
pub async fn run() -> CliResult<Outcome> {
    run_with_args(std::env::args_os()).await
}

/// Run using the provided argument iterator.
pub async fn run_with_args<I, T>(args: I) -> CliResult<Outcome>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    init_tracing(cli.verbose);

    let config = cli.resolve_config()?;
    let service = build_service(&config)?;
    execute(&service, cli.command, cli.output).await
}
