//! # repfind CLI entry point
//!
//! Parses command-line arguments, assembles logging from the verbosity
//! flag, and dispatches to the lookup handler.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use repfind_cli::lookup::{run_lookup, LookupArgs};

/// Company lookup by INN against the reputation.ru business registry.
///
/// Reads identifiers from a comma-separated list or a workbook column,
/// resolves each one concurrently, and writes the nine result fields to
/// CSV and/or back into the source workbook.
#[derive(Parser, Debug)]
#[command(name = "repfind", version, about)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    lookup: LookupArgs,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Pick up REPUTATION_* variables from a local .env, when present.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run_lookup(&cli.lookup).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
