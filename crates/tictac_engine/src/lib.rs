//! Pure tic-tac-toe round engine and session tally.
//!
//! # Architecture
//!
//! - **Engine**: board, player to move and round state; validates moves and
//!   classifies each result as continue, win or draw.
//! - **Session**: one engine plus the running [`SessionStats`], optionally
//!   persisted through an injected [`StatsStore`].
//! - **Rules**: win and draw detection as pure functions over a [`Board`].
//!
//! Nothing here performs I/O. Presentation layers render from the
//! [`MoveReport`] returned by [`Session::submit_move`].
//!
//! # Example
//!
//! ```
//! use tictac_engine::{Player, RoundState, Session, WinningLine};
//!
//! let mut session = Session::new();
//! for index in [0, 3, 1, 4] {
//!     session.submit_move(index).unwrap();
//! }
//! let report = session.submit_move(2).unwrap();
//! assert_eq!(*report.state(), RoundState::Won(Player::X, WinningLine::ROW_0));
//! assert_eq!(session.current_stats().x_wins(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod error;
mod lines;
mod position;
mod session;
mod state;
mod stats;
mod store;
mod types;

pub mod invariants;
pub mod rules;

pub use engine::Engine;
pub use error::{IllegalMove, StoreError};
pub use lines::{Orientation, WinningLine};
pub use position::Position;
pub use session::{MoveReport, Session};
pub use state::RoundState;
pub use stats::SessionStats;
pub use store::{MemoryStatsStore, StatsStore};
pub use types::{Board, Cell, Player};
