//! Draw detection logic for tic-tac-toe.

use tracing::instrument;

use super::win::winning_line;
use crate::types::Board;

/// Checks if the board is full (all cells occupied).
pub fn is_full(board: &Board) -> bool {
    board.is_full()
}

/// A full board with no completed line.
///
/// Win detection runs first; a board that fills up on a winning move is a
/// win, not a draw.
#[instrument(skip(board))]
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && winning_line(board).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cell, Player};

    const X: Cell = Cell::Occupied(Player::X);
    const O: Cell = Cell::Occupied(Player::O);
    const E: Cell = Cell::Empty;

    #[test]
    fn test_empty_board_not_draw() {
        assert!(!is_draw(&Board::new()));
    }

    #[test]
    fn test_partial_board_not_full() {
        let board = Board::from_cells([X, O, X, E, E, E, E, E, E]);
        assert!(!is_full(&board));
        assert!(!is_draw(&board));
    }

    #[test]
    fn test_draw_detection() {
        // X O X / X O O / O X X
        let board = Board::from_cells([X, O, X, X, O, O, O, X, X]);
        assert!(is_draw(&board));
    }

    #[test]
    fn test_full_board_with_line_is_not_draw() {
        // X X X / O O X / X O O
        let board = Board::from_cells([X, X, X, O, O, X, X, O, O]);
        assert!(is_full(&board));
        assert!(!is_draw(&board));
    }
}
