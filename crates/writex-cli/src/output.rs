//! Output formatting for CLI

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;

use crate::error::CliResult;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable labelled fields
    #[default]
    Text,
    /// JSON, one document per command
    Json,
}

pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_field(label: &str, value: impl std::fmt::Display) {
    println!("{:>12}  {}", label.bold(), value);
}

pub fn print_header(title: &str) {
    println!("{}", title.green().bold());
}
