//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{game::GameOutcome, lines::LineAnalyzer, symmetry::D4Transform};
use crate::types::{CELL_COUNT, Position};

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// The player owning this mark, if any
    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Both players, in a fixed order
    pub const ALL: [Player; 2] = [Player::X, Player::O];

    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to the mark it places
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    pub fn to_char(self) -> char {
        self.to_cell().to_char()
    }

    /// Parse "X"/"O" (case-insensitive)
    pub fn parse(s: &str, context: &str) -> Result<Player, crate::Error> {
        match s.trim() {
            "X" | "x" => Ok(Player::X),
            "O" | "o" => Ok(Player::O),
            other => Err(crate::Error::InvalidPlayerString {
                player: other.to_string(),
                context: context.to_string(),
            }),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Complete board state including cells and whose turn it is
///
/// Equality and hashing cover exactly the cells and the player to move.
/// Symmetric boards are distinct keys; see [`BoardState::equivalent_states`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    pub cells: [Cell; CELL_COUNT],
    pub to_move: Player,
}

impl BoardState {
    /// Create an empty board with the given player to move first
    ///
    /// # Examples
    ///
    /// ```
    /// use tictactoe_td::tictactoe::{BoardState, Player};
    ///
    /// let board = BoardState::new(Player::O);
    /// assert_eq!(board.to_move, Player::O);
    /// assert_eq!(board.legal_moves().len(), 9);
    /// ```
    pub fn new(first_player: Player) -> Self {
        BoardState {
            cells: [Cell::Empty; CELL_COUNT],
            to_move: first_player,
        }
    }

    /// Parse cells from a slice of characters.
    fn parse_cells(chars: &[char], context: &str) -> Result<[Cell; CELL_COUNT], crate::Error> {
        if chars.len() != CELL_COUNT {
            return Err(crate::Error::InvalidBoardLength {
                expected: CELL_COUNT,
                got: chars.len(),
                context: context.to_string(),
            });
        }

        let mut cells = [Cell::Empty; CELL_COUNT];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: context.to_string(),
            })?;
        }

        Ok(cells)
    }

    /// Create a board from label format "XO.......\_X" (cells, then the player to move).
    ///
    /// # Errors
    ///
    /// Returns error if the label is not `cells_player`, the cell part is not
    /// exactly 9 valid characters, or the player part is not X or O.
    pub fn from_label(label: &str) -> Result<Self, crate::Error> {
        let trimmed = label.trim();
        let Some((board, player)) = trimmed.split_once('_') else {
            return Err(crate::Error::InvalidLabelFormat {
                label: label.to_string(),
                expected: "XXXXXXXXX_P".to_string(),
            });
        };

        let chars: Vec<char> = board.chars().collect();
        let cells = Self::parse_cells(&chars, label)?;
        let to_move = Player::parse(player, label)?;

        Ok(BoardState { cells, to_move })
    }

    /// Label encoding used as a persistence key: cells then `_` then the player to move
    pub fn encode(&self) -> String {
        format!(
            "{}_{}",
            self.cells.iter().map(|&c| c.to_char()).collect::<String>(),
            self.to_move.to_char()
        )
    }

    /// Get the cell at a position
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.index()]
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// All empty cells in row-major order
    ///
    /// The order is stable so that greedy move selection breaks ties the
    /// same way on every run.
    pub fn legal_moves(&self) -> Vec<Position> {
        Position::all().filter(|&pos| self.is_empty(pos)).collect()
    }

    /// Place the mover's mark and pass the turn
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OccupiedCell`] if the position is already marked.
    #[must_use = "apply_move returns a new board state; the original is unchanged"]
    pub fn apply_move(&self, pos: Position) -> Result<BoardState, crate::Error> {
        if !self.is_empty(pos) {
            return Err(crate::Error::OccupiedCell {
                position: pos.index(),
            });
        }

        let mut next = *self;
        next.cells[pos.index()] = self.to_move.to_cell();
        next.to_move = self.to_move.opponent();
        Ok(next)
    }

    /// Terminal outcome, or `None` while the game is still in progress
    pub fn winner(&self) -> Option<GameOutcome> {
        if let Some(player) = LineAnalyzer::completed_line_owner(&self.cells) {
            Some(GameOutcome::Win(player))
        } else if self.cells.contains(&Cell::Empty) {
            None
        } else {
            Some(GameOutcome::Tie)
        }
    }

    /// Check if the game is over (win or tie)
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some()
    }

    /// Images of this board under the eight D4 transforms, without duplicates
    ///
    /// The board itself is always the first element. Boards that are
    /// invariant under some transforms (the empty board, a lone center mark)
    /// yield fewer than eight states.
    pub fn equivalent_states(&self) -> Vec<BoardState> {
        let mut states: Vec<BoardState> = Vec::with_capacity(8);
        for transform in D4Transform::all() {
            let image = self.transform(&transform);
            if !states.contains(&image) {
                states.push(image);
            }
        }
        states
    }
}

impl fmt::Display for BoardState {
    /// Renders the grid with position numbers on empty cells, as the console shows it
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            let line: Vec<String> = (0..3)
                .map(|col| {
                    let idx = row * 3 + col;
                    match self.cells[idx] {
                        Cell::Empty => (idx + 1).to_string(),
                        cell => cell.to_char().to_string(),
                    }
                })
                .collect();
            write!(f, "{}", line.join("|"))?;
            if row < 2 {
                writeln!(f)?;
                writeln!(f, "-|-|-")?;
            }
        }
        Ok(())
    }
}
