//! Command implementations and service wiring.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Subcommand;
use colored::Colorize;
use serde::Serialize;
use writex::core::AddressDeriver;
use writex::gateway::{
    LocalGateway, MemoryGateway, PinataGateway, StorageGateway, TracingLedger,
};
use writex::store::SqliteStore;
use writex::{
    LedgerBackend, Registry, StorageBackend, Verification, WriterAddress, Writex, WritexConfig,
    WritexError,
};

use crate::error::{CliError, CliResult};
use crate::output::{print_field, print_header, print_json, OutputFormat};

/// The service as the CLI assembles it: SQLite registry, gateway chosen at
/// runtime.
pub type Service = Writex<SqliteStore, Arc<dyn StorageGateway>>;

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register a writer (or show the existing registration)
    CreateWriter {
        /// The writer's long-term public key
        public_key: String,
    },

    /// Show the address registered for a public key
    Address {
        public_key: String,
    },

    /// Upload a document and print its locator and commitment
    Publish {
        /// Writer address, or a registered public key
        #[arg(short, long)]
        author: String,

        #[arg(short, long)]
        title: String,

        /// Document body
        #[arg(short, long, conflicts_with = "file", required_unless_present = "file")]
        content: Option<String>,

        /// Read the document body from a file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Check a commitment against the stored document
    ///
    /// Exits 0 when the commitment matches, 2 when it does not and 1 on
    /// any error (bad input, missing document, unreachable storage).
    Verify {
        #[arg(short, long)]
        locator: String,

        /// Claimed writer address, or a registered public key
        #[arg(short, long)]
        author: String,

        /// 128 hex characters, as printed by `publish`
        #[arg(short, long)]
        commitment: String,
    },
}

/// How the process should exit after a command completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Verification ran and the commitment did not match.
    Mismatch,
}

impl Outcome {
    /// Process exit status. Errors exit 1, so a mismatch gets its own code.
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::Mismatch => 2,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome.exit_code())
    }
}

/// Open the registry and gateway described by `config`.
pub fn build_service(config: &WritexConfig) -> CliResult<Service> {
    let secret = config.derivation_secret()?;
    let store = SqliteStore::open(&config.database_path).map_err(WritexError::from)?;

    let gateway: Arc<dyn StorageGateway> = match config.storage.backend {
        StorageBackend::Local => Arc::new(LocalGateway::new(config.storage.local_dir.clone())),
        StorageBackend::Memory => {
            tracing::warn!("memory storage selected; documents are lost when the process exits");
            Arc::new(MemoryGateway::new())
        }
        StorageBackend::Pinata => Arc::new(PinataGateway::new(config.pinata()?.clone())?),
    };

    tracing::debug!(
        database = %config.database_path.display(),
        storage = ?config.storage.backend,
        ledger = ?config.ledger,
        "service configured"
    );

    let registry = Registry::new(store, AddressDeriver::new(secret));
    let mut service = Writex::new(registry, gateway).with_limits(config.limits);
    if config.ledger == LedgerBackend::Tracing {
        service = service.with_ledger(Arc::new(TracingLedger::new()));
    }
    Ok(service)
}

#[derive(Serialize)]
struct AddressInfo<'a> {
    public_key: &'a str,
    address: &'a WriterAddress,
}

/// Execute one command against `service`.
pub async fn execute(service: &Service, command: Command, format: OutputFormat) -> CliResult<Outcome> {
    match command {
        Command::CreateWriter { public_key } => {
            let writer = service.create_writer(&public_key).await?;
            match format {
                OutputFormat::Json => print_json(&writer)?,
                OutputFormat::Text => {
                    print_header("Writer registered");
                    print_field("address", &writer.address);
                    print_field("id", writer.id);
                    print_field("created_at", writer.created_at);
                }
            }
        }

        Command::Address { public_key } => {
            let address = service.fetch_address(&public_key).await?;
            match format {
                OutputFormat::Json => print_json(&AddressInfo {
                    public_key: &public_key,
                    address: &address,
                })?,
                OutputFormat::Text => println!("{}", address),
            }
        }

        Command::Publish {
            author,
            title,
            content,
            file,
        } => {
            let content = read_content(content, file).await?;
            let publication = service.publish(&author, &content, &title).await?;
            match format {
                OutputFormat::Json => print_json(&publication)?,
                OutputFormat::Text => {
                    print_header("Published");
                    print_field("locator", &publication.locator);
                    print_field("author", &publication.author);
                    print_field("commitment", &publication.commitment);
                    if let Some(sequence) = publication.ledger_sequence {
                        print_field("ledger_seq", sequence);
                    }
                }
            }
        }

        Command::Verify {
            locator,
            author,
            commitment,
        } => {
            let verification = service.verify(&locator, &author, &commitment).await?;
            print_verification(&verification, format)?;
            if !verification.valid {
                return Ok(Outcome::Mismatch);
            }
        }
    }

    Ok(Outcome::Success)
}

async fn read_content(content: Option<String>, file: Option<PathBuf>) -> CliResult<String> {
    match (content, file) {
        (Some(content), None) => Ok(content),
        (None, Some(path)) => Ok(tokio::fs::read_to_string(&path).await?),
        _ => Err(CliError::InvalidArgument(
            "exactly one of --content or --file is required".into(),
        )),
    }
}

fn print_verification(verification: &Verification, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(verification)?,
        OutputFormat::Text if verification.valid => {
            println!("{}", "valid: commitment matches content and author".green())
        }
        OutputFormat::Text => {
            println!("{}", "INVALID: commitment does not match".red().bold())
        }
    }
    Ok(())
}
