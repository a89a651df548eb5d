//! Bankbridge CLI - bank account reporting and forwarding in your terminal

use std::process::ExitCode;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{accounts, daily, export, forward, summary};

/// Bankbridge - report, export, and forward bank transactions
#[derive(Parser)]
#[command(name = "bb", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print per-account transaction counts for a single day
    Daily {
        /// Report date (YYYY-MM-DD), defaults to yesterday
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a daily summary grouped by legal entity
    Summary {
        /// Report date (YYYY-MM-DD), defaults to yesterday
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export transactions to CSV files, one per account
    Export {
        /// Start of date range (YYYY-MM-DD), defaults to eight days ago
        #[arg(long)]
        from: Option<NaiveDate>,
        /// End of date range (YYYY-MM-DD), defaults to yesterday
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Post transactions to the downstream accounting system
    Forward {
        /// Start of date range (YYYY-MM-DD), defaults to the first of the month
        #[arg(long)]
        from: Option<NaiveDate>,
        /// End of date range (YYYY-MM-DD), defaults to today
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List accounts reported by the bank and their mapping status
    Accounts {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Daily { date, json } => daily::run(date, json),
        Commands::Summary { date, json } => summary::run(date, json),
        Commands::Export { from, to, json } => export::run(from, to, json),
        Commands::Forward { from, to, json } => forward::run(from, to, json),
        Commands::Accounts { json } => accounts::run(json),
    }
}
