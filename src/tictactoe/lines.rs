//! Winning line analysis for Tic-Tac-Toe

use super::{Cell, Player};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Owner of the first uniform, non-empty line in row, column, diagonal order
    pub fn completed_line_owner(cells: &[Cell; 9]) -> Option<Player> {
        WINNING_LINES.iter().find_map(|&[a, b, c]| {
            if cells[a] != Cell::Empty && cells[a] == cells[b] && cells[b] == cells[c] {
                cells[a].to_player()
            } else {
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_and_column_owners() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::X;
        cells[1] = Cell::X;
        cells[2] = Cell::X;
        assert_eq!(LineAnalyzer::completed_line_owner(&cells), Some(Player::X));

        let mut cells = [Cell::Empty; 9];
        cells[1] = Cell::O;
        cells[4] = Cell::O;
        cells[7] = Cell::O;
        assert_eq!(LineAnalyzer::completed_line_owner(&cells), Some(Player::O));
    }

    #[test]
    fn test_completed_line_owner() {
        let mut cells = [Cell::Empty; 9];
        assert_eq!(LineAnalyzer::completed_line_owner(&cells), None);

        cells[2] = Cell::O;
        cells[4] = Cell::O;
        assert_eq!(LineAnalyzer::completed_line_owner(&cells), None);

        cells[6] = Cell::O;
        assert_eq!(LineAnalyzer::completed_line_owner(&cells), Some(Player::O));
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::X;
        cells[4] = Cell::O;
        cells[8] = Cell::X;

        assert_eq!(LineAnalyzer::completed_line_owner(&cells), None);
    }
}
