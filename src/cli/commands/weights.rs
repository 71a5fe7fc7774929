//! Weights command - Show learned move values for one board

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::{
        config::TableSource,
        output::{format_move_grid, print_kv, print_section},
    },
    learning::{best_move, ranked_moves},
    tictactoe::BoardState,
};

#[derive(Parser, Debug)]
#[command(about = "Show the value of every legal move on a board")]
pub struct WeightsArgs {
    /// Board label: nine cells of X, O or '.', then '_' and the player to move (e.g. X...O...._X)
    pub label: String,

    #[command(flatten)]
    pub source: TableSource,
}

pub fn execute(args: WeightsArgs) -> Result<()> {
    let state = BoardState::from_label(&args.label)
        .with_context(|| format!("Invalid board label '{}'", args.label))?;
    let table = args.source.load()?;

    print_section(&format!("{} to move", state.to_move));
    println!("{state}");

    if let Some(outcome) = state.winner() {
        println!("\nGame over: {outcome}");
        return Ok(());
    }

    let ranked = ranked_moves(&table, &state)?;
    println!("\nMove values:");
    println!("{}", format_move_grid(&state, &ranked));

    println!();
    for mv in &ranked {
        print_kv(&format!("cell {}", mv.position), &format!("{:.4}", mv.value));
    }
    if let Some(best) = best_move(&table, &state)? {
        print_kv("Best move", &best.to_string());
    }

    Ok(())
}
