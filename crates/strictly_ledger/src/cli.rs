//! Command-line interface for strictly_ledger.

use clap::{Parser, Subcommand};

/// Strictly Ledger - noughts and crosses on a validated ledger
#[derive(Parser, Debug)]
#[command(name = "strictly_ledger")]
#[command(about = "Replay and inspect noughts and crosses games", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a scripted game through the ledger
    Replay {
        /// Path to the scenario TOML file
        #[arg(short, long)]
        scenario: std::path::PathBuf,

        /// Print the committed states as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report the outcome of a board, e.g. "XOX OX. X.."
    Outcome {
        /// Board as nine cells, row by row (X, O, or . for blank)
        #[arg(short, long)]
        board: String,
    },
}
