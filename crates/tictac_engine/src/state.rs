//! Round state: the phase of a single game.

use serde::{Deserialize, Serialize};

use crate::lines::WinningLine;
use crate::rules;
use crate::types::{Board, Player};

/// Phase of the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundState {
    /// Round is ongoing; the player is next to move.
    InProgress(Player),
    /// Player completed the line.
    Won(Player, WinningLine),
    /// Board filled with no completed line.
    Draw,
}

impl RoundState {
    /// Derives the state from board contents alone.
    ///
    /// The player to move is inferred from the mark counts (X moves when
    /// counts are equal), so this is only meaningful for balanced boards.
    pub fn derive(board: &Board) -> Self {
        if let Some((player, line)) = rules::winning_line(board) {
            RoundState::Won(player, line)
        } else if rules::is_full(board) {
            RoundState::Draw
        } else if board.count(Player::X) > board.count(Player::O) {
            RoundState::InProgress(Player::O)
        } else {
            RoundState::InProgress(Player::X)
        }
    }

    /// True once the round is won or drawn.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RoundState::InProgress(_))
    }

    /// Player to move, if the round is still open.
    pub fn to_move(&self) -> Option<Player> {
        match self {
            RoundState::InProgress(player) => Some(*player),
            _ => None,
        }
    }

    /// Winner, if the round was won.
    pub fn winner(&self) -> Option<Player> {
        match self {
            RoundState::Won(player, _) => Some(*player),
            _ => None,
        }
    }

    /// Completed line, if the round was won.
    pub fn winning_line(&self) -> Option<WinningLine> {
        match self {
            RoundState::Won(_, line) => Some(*line),
            _ => None,
        }
    }
}

impl std::fmt::Display for RoundState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundState::InProgress(player) => write!(f, "Player {}'s turn", player),
            RoundState::Won(player, _) => write!(f, "Player {} wins", player),
            RoundState::Draw => write!(f, "Draw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    const X: Cell = Cell::Occupied(Player::X);
    const O: Cell = Cell::Occupied(Player::O);
    const E: Cell = Cell::Empty;

    #[test]
    fn test_derive_empty_board() {
        assert_eq!(
            RoundState::derive(&Board::new()),
            RoundState::InProgress(Player::X)
        );
    }

    #[test]
    fn test_derive_infers_player_to_move() {
        let board = Board::from_cells([X, E, E, E, E, E, E, E, E]);
        assert_eq!(RoundState::derive(&board), RoundState::InProgress(Player::O));
        let board = Board::from_cells([X, O, E, E, E, E, E, E, E]);
        assert_eq!(RoundState::derive(&board), RoundState::InProgress(Player::X));
    }

    #[test]
    fn test_derive_terminal_states() {
        let won = Board::from_cells([O, X, X, E, O, X, E, E, O]);
        assert_eq!(
            RoundState::derive(&won),
            RoundState::Won(Player::O, WinningLine::DIAGONAL_0)
        );
        let drawn = Board::from_cells([X, O, X, X, O, O, O, X, X]);
        assert_eq!(RoundState::derive(&drawn), RoundState::Draw);
    }

    #[test]
    fn test_accessors() {
        let won = RoundState::Won(Player::X, WinningLine::ROW_2);
        assert!(won.is_terminal());
        assert_eq!(won.winner(), Some(Player::X));
        assert_eq!(won.winning_line(), Some(WinningLine::ROW_2));
        assert_eq!(won.to_move(), None);

        let open = RoundState::InProgress(Player::O);
        assert!(!open.is_terminal());
        assert_eq!(open.to_move(), Some(Player::O));
        assert_eq!(open.to_string(), "Player O's turn");
        assert!(RoundState::Draw.is_terminal());
    }
}
