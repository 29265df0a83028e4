//! # SalesTrack CLI
//!
//! Prints sales analytics as JSON.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        salestrack <command>                             │
//! │                                                                         │
//! │  args ──► CliConfig::load ──► snapshot (db or --input) ──► aggregator  │
//! │                                                          │              │
//! │                                            stdout ◄── JSON             │
//! │                                                                         │
//! │  tracing ──► stderr  (RUST_LOG, default info)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod args;
mod commands;
mod config;

use anyhow::Context;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::args::{Command, USAGE};
use crate::commands::Source;
use crate::config::CliConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let command = match args::parse(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!();
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    if command == Command::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = CliConfig::load()?;
    debug!(
        db_path = %config.db_path.display(),
        utc_offset = %config.utc_offset,
        max_connections = config.max_connections,
        "Configuration loaded"
    );

    match command {
        Command::Report { range, input } => {
            let range = commands::resolve_range(range.as_deref());
            let snapshot = commands::load_snapshot(&Source::from_input(input), &config).await?;
            let report = commands::report(&snapshot, range, commands::store_now(&config));
            info!(
                range = %range,
                sales = report.metrics.sales_count,
                "Report ready"
            );
            print_json(&report)?;
        }
        Command::Dashboard { input } => {
            let snapshot = commands::load_snapshot(&Source::from_input(input), &config).await?;
            print_json(&commands::dashboard(&snapshot))?;
        }
        Command::Receipt { sale_id, input } => {
            let receipt = match Source::from_input(input) {
                Source::Database => commands::receipt_from_database(&config, &sale_id).await?,
                source => {
                    let snapshot = commands::load_snapshot(&source, &config).await?;
                    commands::receipt(&snapshot, &sale_id)?
                }
            };
            print_json(&receipt)?;
        }
        Command::Help => {}
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=salestrack_db=trace` - Trace the data layer only
/// - Default: INFO level
///
/// Logs go to stderr; stdout carries only JSON.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
