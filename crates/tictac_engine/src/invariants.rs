//! First-class invariants over the engine state.
//!
//! Invariants are logical properties that must hold after every accepted
//! move. The engine checks them in debug builds; tests check them directly.

use tracing::warn;

use crate::engine::Engine;
use crate::state::RoundState;
use crate::types::{Board, Cell, Player};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples so sets compose as types.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: X has as many marks as O, or exactly one more.
pub struct BalancedMarks;

impl BalancedMarks {
    /// Checks the mark balance of a bare board.
    pub fn board_holds(board: &Board) -> bool {
        let x_count = board.count(Player::X);
        let o_count = board.count(Player::O);
        let valid = x_count == o_count || x_count == o_count + 1;
        if !valid {
            warn!(x_count, o_count, "Mark balance violated");
        }
        valid
    }
}

impl Invariant<Engine> for BalancedMarks {
    fn holds(engine: &Engine) -> bool {
        Self::board_holds(engine.board())
    }

    fn description() -> &'static str {
        "X has as many marks as O, or one more"
    }
}

/// Invariant: replaying the history from an empty board, X first and
/// alternating, reproduces the board. Cells are never overwritten.
pub struct HistoryMatchesBoard;

impl Invariant<Engine> for HistoryMatchesBoard {
    fn holds(engine: &Engine) -> bool {
        let mut cells = [Cell::Empty; 9];
        let mut player = Player::X;

        for pos in engine.history() {
            if cells[pos.index()] != Cell::Empty {
                return false;
            }
            cells[pos.index()] = Cell::Occupied(player);
            player = player.opponent();
        }

        Board::from_cells(cells) == *engine.board()
    }

    fn description() -> &'static str {
        "Move history replays to the current board"
    }
}

/// Invariant: the stored round state equals the one derived from the board,
/// and an open round names the engine's current player.
pub struct StateMatchesBoard;

impl Invariant<Engine> for StateMatchesBoard {
    fn holds(engine: &Engine) -> bool {
        let derived = RoundState::derive(engine.board());
        let stored = *engine.state();
        if derived != stored {
            warn!(?derived, ?stored, "Round state out of sync with board");
            return false;
        }
        match stored {
            RoundState::InProgress(player) => player == engine.current_player(),
            _ => true,
        }
    }

    fn description() -> &'static str {
        "Round state matches the board"
    }
}

/// All engine invariants as a composable set.
pub type EngineInvariants = (BalancedMarks, HistoryMatchesBoard, StateMatchesBoard);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn test_invariant_set_holds_for_new_engine() {
        assert!(EngineInvariants::check_all(&Engine::new()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let mut engine = Engine::new();
        for index in [0, 4, 8, 2] {
            engine.attempt_move(index).expect("legal move");
        }
        assert!(EngineInvariants::check_all(&engine).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_corrupted_board() {
        let mut engine = Engine::new();
        engine.attempt_move(4).expect("legal move");
        engine
            .board
            .set(Position::TopLeft, Cell::Occupied(Player::X));

        let violations = EngineInvariants::check_all(&engine).unwrap_err();
        let descriptions: Vec<_> = violations.iter().map(|v| v.description.as_str()).collect();
        assert!(descriptions.contains(&BalancedMarks::description()));
        assert!(descriptions.contains(&HistoryMatchesBoard::description()));
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (BalancedMarks, StateMatchesBoard);
        assert!(TwoInvariants::check_all(&Engine::new()).is_ok());
    }

    #[test]
    fn test_unbalanced_board_fails() {
        let board = Board::from_cells([
            Cell::Occupied(Player::O),
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
        ]);
        assert!(!BalancedMarks::board_holds(&board));
    }
}
