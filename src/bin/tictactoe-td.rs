//! Tic-Tac-Toe TD CLI - Self-play value learning
//!
//! This CLI provides a unified interface for:
//! - Training a value table by self-play
//! - Inspecting the greedy line and per-board move values
//! - Playing against the learned table in the console

use anyhow::Result;
use clap::{Parser, Subcommand};
use flexi_logger::Logger;
use tictactoe_td::cli::commands::{best_line, play, train, weights};

#[derive(Parser)]
#[command(name = "tictactoe-td")]
#[command(version, about = "Temporal-difference self-play for Tic-Tac-Toe", long_about = None)]
struct Cli {
    /// Log debug output (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a value table by self-play
    Train(Box<train::TrainArgs>),

    /// Show the line the table plays against itself
    BestLine(best_line::BestLineArgs),

    /// Show move values for a board label
    Weights(weights::WeightsArgs),

    /// Play against the table
    Play(play::PlayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _logger = Logger::try_with_env_or_str(if cli.verbose { "debug" } else { "info" })?
        .format(flexi_logger::colored_default_format)
        .start()?;

    match cli.command {
        Commands::Train(args) => train::execute(*args),
        Commands::BestLine(args) => best_line::execute(args),
        Commands::Weights(args) => weights::execute(args),
        Commands::Play(args) => play::execute(args),
    }
}
