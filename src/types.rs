//! Newtype wrappers for board coordinates.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Number of rows (and columns) on the board.
pub const BOARD_SIZE: usize = 3;

/// Number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// A cell coordinate on the board, stored as a row-major index (0-8).
///
/// Players see the 1-based "position number" (1-9), which is what
/// [`Display`](fmt::Display) and [`FromStr`] use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position(usize);

impl Position {
    /// Create a position from a row-major index.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPosition`] if the index is >= 9.
    pub fn new(index: usize) -> Result<Self, crate::Error> {
        if index < CELL_COUNT {
            Ok(Position(index))
        } else {
            Err(crate::Error::InvalidPosition { position: index })
        }
    }

    /// Create a position from its 1-based position number.
    pub fn from_number(number: usize) -> Result<Self, crate::Error> {
        if (1..=CELL_COUNT).contains(&number) {
            Ok(Position(number - 1))
        } else {
            Err(crate::Error::InvalidPositionInput {
                input: number.to_string(),
            })
        }
    }

    /// All nine positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..CELL_COUNT).map(Position)
    }

    pub fn index(&self) -> usize {
        self.0
    }

    /// The 1-based number shown to players.
    pub fn number(&self) -> usize {
        self.0 + 1
    }

    /// True for the middle cell.
    pub fn is_center(&self) -> bool {
        self.0 == 4
    }

    /// True for the four corner cells.
    pub fn is_corner(&self) -> bool {
        matches!(self.0, 0 | 2 | 6 | 8)
    }

    /// True for the four edge (side-middle) cells.
    pub fn is_edge(&self) -> bool {
        matches!(self.0, 1 | 3 | 5 | 7)
    }
}

impl From<Position> for usize {
    fn from(pos: Position) -> Self {
        pos.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl FromStr for Position {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number: usize = trimmed
            .parse()
            .map_err(|_| crate::Error::InvalidPositionInput {
                input: trimmed.to_string(),
            })?;
        Position::from_number(number).map_err(|_| crate::Error::InvalidPositionInput {
            input: trimmed.to_string(),
        })
    }
}
