//! Win detection logic for tic-tac-toe.

use tracing::instrument;

use crate::lines::WinningLine;
use crate::types::{Board, Cell, Player};

/// Returns the first line, in [`WinningLine::ALL`] order, held entirely by
/// one player.
///
/// A single move can complete two lines at once; the earlier line in the
/// enumeration is reported so line highlighting stays deterministic.
#[instrument(skip(board))]
pub fn winning_line(board: &Board) -> Option<(Player, WinningLine)> {
    WinningLine::ALL
        .into_iter()
        .find_map(|line| line_owner(board, &line).map(|player| (player, line)))
}

/// Checks if there is a winner on the board.
pub fn check_winner(board: &Board) -> Option<Player> {
    winning_line(board).map(|(player, _)| player)
}

/// Every completed line on the board, in enumeration order.
pub fn matching_lines(board: &Board) -> Vec<(Player, WinningLine)> {
    WinningLine::ALL
        .into_iter()
        .filter_map(|line| line_owner(board, &line).map(|player| (player, line)))
        .collect()
}

fn line_owner(board: &Board, line: &WinningLine) -> Option<Player> {
    let [a, b, c] = line.positions();
    let cell = board.get(a);
    if cell != Cell::Empty && cell == board.get(b) && cell == board.get(c) {
        cell.player()
    } else {
        None
    }
}
