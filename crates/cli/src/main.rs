//! Allocations Report CLI - load checks, item queries and CSV exports.
//!
//! # Usage
//!
//! ```bash
//! # Validate the SOH export and print load counts
//! soh-cli check --data physical_soh.csv
//!
//! # Show the batches, title and totals for an item
//! soh-cli query --data physical_soh.csv --item 1001 --filter available
//!
//! # Export an item's batches as CSV (stdout without --output)
//! soh-cli export --data physical_soh.csv --item 1001 --output 1001.csv
//! ```
//!
//! `--data` falls back to `SOH_DATA_PATH` (also read from `.env`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use soh_allocations_core::AvailabilityFilter;

mod commands;

#[derive(Parser)]
#[command(name = "soh-cli")]
#[command(author, version, about = "Allocations Report CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Dataset location and load options shared by every command.
#[derive(Args)]
struct DataArgs {
    /// Path to the physical SOH CSV export
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Location code to exclude (repeatable); replaces the default set
    #[arg(long = "exclude", value_name = "LOCATION")]
    excluded_locations: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the dataset and report row counts and unknown BDC codes
    Check {
        #[command(flatten)]
        data: DataArgs,
    },
    /// Print the title, batch table and totals for an item
    Query {
        #[command(flatten)]
        data: DataArgs,

        /// Item number
        #[arg(short, long)]
        item: String,

        /// Availability filter (`all`, `available`, `unavailable`)
        #[arg(short, long, default_value = "all")]
        filter: AvailabilityFilter,
    },
    /// Write an item's batches as CSV
    Export {
        #[command(flatten)]
        data: DataArgs,

        /// Item number
        #[arg(short, long)]
        item: String,

        /// Availability filter (`all`, `available`, `unavailable`)
        #[arg(short, long, default_value = "all")]
        filter: AvailabilityFilter,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "soh_allocations_core=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    match cli.command {
        Commands::Check { data } => {
            let dataset = commands::load(data.data, data.excluded_locations)?;
            commands::check::run(&dataset, &mut std::io::stdout().lock())?;
        }
        Commands::Query { data, item, filter } => {
            let dataset = commands::load(data.data, data.excluded_locations)?;
            commands::query::run(dataset, &item, filter, &mut std::io::stdout().lock())?;
        }
        Commands::Export {
            data,
            item,
            filter,
            output,
        } => {
            let dataset = commands::load(data.data, data.excluded_locations)?;
            commands::export::run(dataset, &item, filter, output.as_deref())?;
        }
    }
    Ok(())
}
