//! Greedy move selection and move-value reporting over a learned table

use serde::{Deserialize, Serialize};

use super::value_table::ValueTable;
use crate::{
    Result,
    tictactoe::{BoardState, Player},
    types::Position,
};

/// A legal move together with its learned value for the player making it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveValue {
    pub position: Position,
    pub value: f64,
}

/// One step of a greedy line: the board, every move ranked, and the move played
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStep {
    pub state: BoardState,
    pub ranked: Vec<MoveValue>,
    pub chosen: Position,
}

/// Pick the legal move whose successor scores highest under `score`.
///
/// Moves are scanned in row-major order and only a strictly greater score
/// replaces the incumbent, so ties go to the earliest cell.
pub(crate) fn greedy_move<F>(state: &BoardState, mut score: F) -> Result<Option<Position>>
where
    F: FnMut(&BoardState) -> f64,
{
    let mut best: Option<(Position, f64)> = None;
    for position in state.legal_moves() {
        let value = score(&state.apply_move(position)?);
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((position, value)),
        }
    }
    Ok(best.map(|(position, _)| position))
}

/// The move the table recommends for the player to move in `state`.
///
/// Each candidate is rated by the value of its successor for the player who
/// made it (`1 - value_for_mover(successor)`). Returns `None` when no cell is
/// empty.
pub fn best_move(table: &ValueTable, state: &BoardState) -> Result<Option<Position>> {
    greedy_move(state, |successor| table.peek_opponent(successor))
}

/// Learned value of playing `position` in `state`, for the player making the move.
///
/// # Errors
///
/// Returns [`crate::Error::OccupiedCell`] if the cell is already marked.
pub fn move_value(table: &ValueTable, state: &BoardState, position: Position) -> Result<f64> {
    Ok(table.peek_opponent(&state.apply_move(position)?))
}

/// Every legal move with its value, in row-major order
pub fn move_values(table: &ValueTable, state: &BoardState) -> Result<Vec<MoveValue>> {
    state
        .legal_moves()
        .into_iter()
        .map(|position| {
            Ok(MoveValue {
                position,
                value: move_value(table, state, position)?,
            })
        })
        .collect()
}

/// Every legal move, best first; equal values keep row-major order
pub fn ranked_moves(table: &ValueTable, state: &BoardState) -> Result<Vec<MoveValue>> {
    let mut moves = move_values(table, state)?;
    moves.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| a.position.cmp(&b.position))
    });
    Ok(moves)
}

/// Values of the nine opening moves for `first_player`, in row-major order
pub fn opening_values(table: &ValueTable, first_player: Player) -> Result<Vec<MoveValue>> {
    move_values(table, &BoardState::new(first_player))
}

/// Play the table against itself greedily from an empty board
pub fn best_line(table: &ValueTable, first_player: Player) -> Result<Vec<LineStep>> {
    let mut steps = Vec::new();
    let mut state = BoardState::new(first_player);

    while !state.is_terminal() {
        let Some(chosen) = best_move(table, &state)? else {
            return Err(crate::Error::NoLegalMoves {
                state: state.encode(),
            });
        };
        steps.push(LineStep {
            state,
            ranked: ranked_moves(table, &state)?,
            chosen,
        });
        state = state.apply_move(chosen)?;
    }

    Ok(steps)
}
