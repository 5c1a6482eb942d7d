//! csvmodel CLI binary.

use anyhow::Result;
use csvmodel_cli::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the csvmodel CLI.
fn main() -> Result<()> {
    // Logs go to stderr so query output on stdout stays machine-readable.
    // Example: RUST_LOG=csvmodel=trace csvmodel people.csv
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("csvmodel=info,csvmodel_cli=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting csvmodel CLI");

    let cli = Cli::parse_args();
    let stdout = std::io::stdout();
    cli.execute(&mut stdout.lock())?;

    tracing::debug!("csvmodel CLI completed successfully");
    Ok(())
}
