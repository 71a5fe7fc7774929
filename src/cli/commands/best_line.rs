//! Best-line command - Show the greedy line the table plays against itself

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::{
        config::{TableSource, parse_player},
        output::{print_line, print_section},
    },
    learning::best_line,
    tictactoe::{BoardState, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Print the greedy self-play line with ranked move values")]
pub struct BestLineArgs {
    #[command(flatten)]
    pub source: TableSource,

    /// Player who opens; both lines are printed when omitted
    #[arg(long, value_parser = parse_player)]
    pub first_player: Option<Player>,

    /// Optional path for writing the line(s) as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,
}

pub fn execute(args: BestLineArgs) -> Result<()> {
    let table = args.source.load()?;
    let openers = match args.first_player {
        Some(player) => vec![player],
        None => Player::ALL.to_vec(),
    };

    let mut lines = Vec::with_capacity(openers.len());
    for first_player in openers {
        let line = best_line(&table, first_player)?;
        let mut final_state = BoardState::new(first_player);
        for step in &line {
            final_state = final_state.apply_move(step.chosen)?;
        }

        print_section(&format!("{first_player} moves first"));
        print_line(&line);
        match final_state.winner() {
            Some(outcome) => println!("\nResult: {outcome}"),
            None => println!("\nResult: unfinished"),
        }
        lines.push(line);
    }

    if let Some(path) = &args.json {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &lines)?;
        println!("\nLine written to {}", path.display());
    }

    Ok(())
}
