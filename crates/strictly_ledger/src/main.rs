//! Strictly Ledger - CLI
//!
//! Replays scripted games through the ledger and reports board outcomes.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use strictly_ledger::{Ledger, ScenarioConfig, replay};
use strictly_noughts::{Board, blank_count, check_outcome};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Replay { scenario, json } => run_replay(&scenario, json),
        Command::Outcome { board } => run_outcome(&board),
    }
}

/// Replay a scenario file and print each committed state
#[instrument(skip_all, fields(scenario = %path.display()))]
fn run_replay(path: &Path, json: bool) -> Result<()> {
    let config = ScenarioConfig::from_file(path)?;
    let ledger = Ledger::new();
    let replay = replay(&config, &ledger)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&replay)?);
        return Ok(());
    }

    println!("Game {}", replay.created.id());
    for (n, step) in replay.steps.iter().enumerate() {
        println!("\nMove {}: {} plays {}", n + 1, step.mover, step.position);
        println!("{}", step.state.board().display());
    }
    println!("\nOutcome: {}", replay.final_state().outcome());
    if replay.ended {
        println!("Game ended");
    }

    info!(remaining = ledger.len(), "Replay finished");
    Ok(())
}

/// Print the outcome of a board given as text
#[instrument]
fn run_outcome(board: &str) -> Result<()> {
    let board: Board = board.parse()?;
    println!("{}", board.display());
    println!("Outcome: {}", check_outcome(&board));
    println!("Blank cells: {}", blank_count(&board));
    Ok(())
}
