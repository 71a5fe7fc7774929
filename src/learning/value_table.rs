//! State-value table shared across board symmetries

use std::collections::{HashMap, hash_map};

use crate::tictactoe::BoardState;

/// Value assumed for a state that has never been written: no evidence either way.
pub const DEFAULT_VALUE: f64 = 0.5;

/// Estimated win probability for the player about to move, keyed by board state
///
/// Only the mover's perspective is stored. The value of a state for the
/// player who just moved is `1 - value_for_mover`.
///
/// Every write is fanned out to all symmetry images of the state, so a
/// position learned through one sequence of moves is immediately known in
/// all of its rotations and reflections.
#[derive(Debug, Clone, Default)]
pub struct ValueTable {
    values: HashMap<BoardState, f64>,
}

impl ValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `state` for the player to move, inserting [`DEFAULT_VALUE`] on first touch
    pub fn value_for_mover(&mut self, state: &BoardState) -> f64 {
        *self.values.entry(*state).or_insert(DEFAULT_VALUE)
    }

    /// Value of `state` for the player who just moved
    pub fn value_for_opponent(&mut self, state: &BoardState) -> f64 {
        1.0 - self.value_for_mover(state)
    }

    /// Read-only lookup; unseen states report [`DEFAULT_VALUE`] without being stored
    pub fn peek(&self, state: &BoardState) -> f64 {
        self.values.get(state).copied().unwrap_or(DEFAULT_VALUE)
    }

    /// Read-only counterpart of [`value_for_opponent`](Self::value_for_opponent)
    pub fn peek_opponent(&self, state: &BoardState) -> f64 {
        1.0 - self.peek(state)
    }

    /// Overwrite the mover's value for `state` and all of its symmetry images
    pub fn set_value_for_mover(&mut self, state: &BoardState, value: f64) {
        for equivalent in state.equivalent_states() {
            self.values.insert(equivalent, value);
        }
    }

    /// True if `state` has been read or written
    pub fn contains(&self, state: &BoardState) -> bool {
        self.values.contains_key(state)
    }

    /// Forget every stored value
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Number of stored states (symmetry images count separately)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, BoardState, f64> {
        self.values.iter()
    }

    /// Store a value for exactly one state, without symmetry fan-out.
    ///
    /// Used when restoring a saved table, which already holds every image.
    pub(crate) fn insert_raw(&mut self, state: BoardState, value: f64) {
        self.values.insert(state, value);
    }
}

impl<'a> IntoIterator for &'a ValueTable {
    type Item = (&'a BoardState, &'a f64);
    type IntoIter = hash_map::Iter<'a, BoardState, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
