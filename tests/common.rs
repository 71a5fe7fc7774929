//! Shared helpers for the integration tests.

#![allow(dead_code)]

use tictactoe_td::{
    BoardState, GameOutcome, Player, Position,
    learning::{ValueTable, best_move},
};

/// Board reached by playing cell indices (0-8) in order from an empty board
pub fn board(first: Player, moves: &[usize]) -> BoardState {
    moves.iter().fold(BoardState::new(first), |state, &m| {
        state.apply_move(Position::new(m).unwrap()).unwrap()
    })
}

/// Both sides follow the table greedily from an empty board
pub fn greedy_game(table: &ValueTable, first: Player) -> GameOutcome {
    let mut state = BoardState::new(first);
    loop {
        if let Some(outcome) = state.winner() {
            return outcome;
        }
        let position = best_move(table, &state).unwrap().unwrap();
        state = state.apply_move(position).unwrap();
    }
}
