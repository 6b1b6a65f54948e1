//! Round engine for tic-tac-toe.
//!
//! The engine owns the board, the player to move and the round state, and
//! is the only writer of all three. Every accepted move updates them
//! together; a rejected move leaves them untouched.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::IllegalMove;
use crate::position::Position;
use crate::rules;
use crate::state::RoundState;
use crate::types::{Board, Cell, Player};

/// Tic-tac-toe round engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engine {
    pub(crate) board: Board,
    current_player: Player,
    state: RoundState,
    history: Vec<Position>,
}

impl Engine {
    /// Creates an engine with an empty board and X to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::X,
            state: RoundState::InProgress(Player::X),
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Player whose mark the next accepted move places.
    ///
    /// After a terminal move this stays on the player who made it.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the round state.
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// Positions played this round, in order.
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// True while the round accepts moves.
    pub fn is_active(&self) -> bool {
        !self.state.is_terminal()
    }

    /// Places the current player's mark at `index` (0-8).
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMove::GameAlreadyEnded`] once the round is won or
    /// drawn, [`IllegalMove::IndexOutOfRange`] for indices above 8, and
    /// [`IllegalMove::CellOccupied`] for a marked cell. Nothing changes on
    /// error.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn attempt_move(&mut self, index: usize) -> Result<RoundState, IllegalMove> {
        self.play(index).map(|(_, state)| state)
    }

    /// Validates and applies a move, returning the marked position too.
    pub(crate) fn play(&mut self, index: usize) -> Result<(Position, RoundState), IllegalMove> {
        if self.state.is_terminal() {
            debug!(state = ?self.state, "Move rejected: round is over");
            return Err(IllegalMove::GameAlreadyEnded);
        }

        let position = Position::from_index(index).ok_or_else(|| {
            debug!(index, "Move rejected: index out of range");
            IllegalMove::IndexOutOfRange { index }
        })?;

        self.place(position).map(|state| (position, state))
    }

    /// Typed variant of [`Engine::attempt_move`].
    ///
    /// # Errors
    ///
    /// Same as [`Engine::attempt_move`], minus the range check.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn attempt_move_at(&mut self, position: Position) -> Result<RoundState, IllegalMove> {
        if self.state.is_terminal() {
            debug!(state = ?self.state, "Move rejected: round is over");
            return Err(IllegalMove::GameAlreadyEnded);
        }
        self.place(position)
    }

    fn place(&mut self, position: Position) -> Result<RoundState, IllegalMove> {
        if !self.board.is_empty(position) {
            debug!(%position, "Move rejected: cell occupied");
            return Err(IllegalMove::CellOccupied { position });
        }

        let player = self.current_player;
        self.board.set(position, Cell::Occupied(player));
        self.history.push(position);

        self.state = if let Some((winner, line)) = rules::winning_line(&self.board) {
            info!(%winner, %line, moves = self.history.len(), "Round won");
            RoundState::Won(winner, line)
        } else if rules::is_full(&self.board) {
            info!(moves = self.history.len(), "Round drawn");
            RoundState::Draw
        } else {
            self.current_player = player.opponent();
            RoundState::InProgress(self.current_player)
        };

        debug!(%position, %player, state = ?self.state, "Move applied");

        #[cfg(debug_assertions)]
        self.debug_check_invariants();

        Ok(self.state)
    }

    /// Clears the board and starts a fresh round with X to move.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        debug!(moves = self.history.len(), "Resetting round");
        self.board = Board::new();
        self.current_player = Player::X;
        self.state = RoundState::InProgress(Player::X);
        self.history.clear();
    }

    #[cfg(debug_assertions)]
    fn debug_check_invariants(&self) {
        use crate::invariants::{EngineInvariants, InvariantSet};

        let checked = EngineInvariants::check_all(self);
        debug_assert!(checked.is_ok(), "Engine invariants violated: {:?}", checked);
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
