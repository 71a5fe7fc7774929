//! Play command - Interactive console game against a trained table

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::config::{TableSource, parse_player},
    learning::{ValueTable, best_move},
    tictactoe::{BoardState, GameOutcome, Player},
    types::Position,
};

#[derive(Parser, Debug)]
#[command(about = "Play against the learned table in the console")]
pub struct PlayArgs {
    #[command(flatten)]
    pub source: TableSource,

    /// Token you play (`x` or `o`)
    #[arg(long, default_value = "x", value_parser = parse_player)]
    pub human: Player,

    /// Token that makes the first move (`x` or `o`)
    #[arg(long, default_value = "x", value_parser = parse_player)]
    pub first_player: Player,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let table = args.source.load()?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    play_game(
        &table,
        args.human,
        args.first_player,
        &mut stdin.lock(),
        &mut stdout,
    )?;
    Ok(())
}

enum HumanInput {
    Move(Position),
    Quit,
}

fn read_move<R: BufRead, W: Write>(
    state: &BoardState,
    input: &mut R,
    output: &mut W,
) -> Result<HumanInput> {
    loop {
        write!(output, "Your move ({}), 1-9 or q to quit: ", state.to_move)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(HumanInput::Quit);
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Ok(HumanInput::Quit);
        }

        match line.parse::<Position>() {
            Ok(position) if state.is_empty(position) => return Ok(HumanInput::Move(position)),
            Ok(position) => writeln!(output, "Cell {position} is taken.")?,
            Err(e) => writeln!(output, "{e}")?,
        }
    }
}

/// Greedy reply for an unfinished board
fn computer_move(table: &ValueTable, state: &BoardState) -> crate::Result<Position> {
    best_move(table, state)?.ok_or_else(|| crate::Error::NoLegalMoves {
        state: state.encode(),
    })
}

/// Run one console game; `None` means the human quit before the end.
pub fn play_game<R: BufRead, W: Write>(
    table: &ValueTable,
    human: Player,
    first_player: Player,
    input: &mut R,
    output: &mut W,
) -> Result<Option<GameOutcome>> {
    let mut state = BoardState::new(first_player);

    let outcome = loop {
        writeln!(output, "\n{state}\n")?;
        if let Some(outcome) = state.winner() {
            break outcome;
        }

        let position = if state.to_move == human {
            match read_move(&state, input, output)? {
                HumanInput::Move(position) => position,
                HumanInput::Quit => {
                    writeln!(output, "Bye.")?;
                    return Ok(None);
                }
            }
        } else {
            let position = computer_move(table, &state)?;
            writeln!(output, "Computer ({}) plays {position}", state.to_move)?;
            position
        };
        state = state.apply_move(position)?;
    };

    match outcome {
        GameOutcome::Win(winner) if winner == human => writeln!(output, "You win!")?,
        GameOutcome::Win(_) => writeln!(output, "Computer wins.")?,
        GameOutcome::Tie => writeln!(output, "It's a tie.")?,
    }
    Ok(Some(outcome))
}
