//! Game outcomes and played-episode records

use serde::{Deserialize, Serialize};

use super::board::{BoardState, Player};
use crate::types::Position;

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Tie,
}

impl GameOutcome {
    /// The winning player, if the game was not tied
    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::Win(player) => Some(player),
            GameOutcome::Tie => None,
        }
    }
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::Win(player) => write!(f, "{player} wins"),
            GameOutcome::Tie => write!(f, "tie"),
        }
    }
}

/// A finished game: where it started, the moves played, and how it ended
///
/// `states[0]` is the starting board and `states[i + 1]` is the board after
/// `moves[i]`, so the last state is always terminal. [`Episode::replay`] is
/// the only constructor, which keeps `states` non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    moves: Vec<Position>,
    states: Vec<BoardState>,
    outcome: GameOutcome,
}

impl Episode {
    /// Replay `moves` from `initial` until the game ends.
    ///
    /// # Errors
    ///
    /// Returns an error if a move targets an occupied cell, if moves remain
    /// after the game is over, or if the moves run out before it is over.
    pub fn replay(initial: BoardState, moves: &[Position]) -> Result<Self, crate::Error> {
        let mut states = Vec::with_capacity(moves.len() + 1);
        states.push(initial);
        let mut state = initial;

        for &pos in moves {
            if state.is_terminal() {
                return Err(crate::Error::InvalidEpisode {
                    message: format!("move {pos} played after the game ended at {}", state.encode()),
                });
            }
            state = state.apply_move(pos)?;
            states.push(state);
        }

        let outcome = state.winner().ok_or_else(|| crate::Error::InvalidEpisode {
            message: format!("move list ends before the game is over at {}", state.encode()),
        })?;

        Ok(Episode {
            moves: moves.to_vec(),
            states,
            outcome,
        })
    }

    pub fn moves(&self) -> &[Position] {
        &self.moves
    }

    /// Every board of the game, starting board first
    pub fn states(&self) -> &[BoardState] {
        &self.states
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    /// The board the game started from
    pub fn initial_state(&self) -> BoardState {
        self.states[0]
    }

    /// The terminal board
    pub fn final_state(&self) -> BoardState {
        self.states[self.moves.len()]
    }

    /// Player who made the first move
    pub fn first_player(&self) -> Player {
        self.initial_state().to_move
    }

    /// Number of moves played
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Consecutive (state, successor) pairs, latest first
    pub fn transitions_reversed(&self) -> impl Iterator<Item = (&BoardState, &BoardState)> {
        self.states
            .windows(2)
            .rev()
            .map(|pair| (&pair[0], &pair[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(indices: &[usize]) -> Vec<Position> {
        indices.iter().map(|&i| Position::new(i).unwrap()).collect()
    }

    #[test]
    fn test_replay_records_states() {
        let episode =
            Episode::replay(BoardState::new(Player::X), &positions(&[0, 3, 1, 4, 2])).unwrap();
        assert_eq!(episode.len(), 5);
        assert_eq!(episode.states().len(), 6);
        assert_eq!(episode.outcome(), GameOutcome::Win(Player::X));
        assert_eq!(episode.first_player(), Player::X);
        assert_eq!(episode.final_state().to_move, Player::O);
    }

    #[test]
    fn test_replay_rejects_unfinished_game() {
        let result = Episode::replay(BoardState::new(Player::X), &positions(&[0, 1]));
        assert!(result.is_err());
    }

    #[test]
    fn test_replay_rejects_moves_after_end() {
        let result = Episode::replay(BoardState::new(Player::X), &positions(&[0, 3, 1, 4, 2, 5]));
        assert!(result.is_err());
    }

    #[test]
    fn test_replay_from_finished_board_has_one_state() {
        let finished = BoardState::from_label("XXXOO...._O").unwrap();
        let episode = Episode::replay(finished, &[]).unwrap();

        assert!(episode.is_empty());
        assert_eq!(episode.states(), &[finished]);
        assert_eq!(episode.initial_state(), finished);
        assert_eq!(episode.final_state(), finished);
        assert_eq!(episode.outcome(), GameOutcome::Win(Player::X));
        assert_eq!(episode.transitions_reversed().count(), 0);
    }

    #[test]
    fn test_replay_rejects_empty_move_list_on_open_board() {
        let result = Episode::replay(BoardState::new(Player::O), &[]);
        assert!(matches!(result, Err(crate::Error::InvalidEpisode { .. })));
    }

    #[test]
    fn test_transitions_reversed_order() {
        let episode =
            Episode::replay(BoardState::new(Player::O), &positions(&[0, 3, 1, 4, 2])).unwrap();
        let pairs: Vec<_> = episode.transitions_reversed().collect();
        assert_eq!(pairs.len(), 5);
        assert_eq!(*pairs[0].1, episode.final_state());
        assert_eq!(*pairs[4].0, episode.initial_state());
        for (state, next) in pairs {
            assert_eq!(next.to_move, state.to_move.opponent());
        }
    }

    #[test]
    fn test_outcome_helpers() {
        assert_eq!(GameOutcome::Win(Player::O).winner(), Some(Player::O));
        assert_eq!(GameOutcome::Tie.winner(), None);
        assert_eq!(GameOutcome::Win(Player::X).to_string(), "X wins");
        assert_eq!(GameOutcome::Tie.to_string(), "tie");
    }
}
