use std::process::ExitCode;

use writex_cli::Outcome;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let outcome: Outcome = writex_cli::run().await?;
    Ok(outcome.into())
}
