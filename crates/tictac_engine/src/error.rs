//! Error types for the round engine and the stats storage seam.

use derive_more::Display;
use tracing::instrument;

use crate::position::Position;

/// A move the engine refused. Engine state is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum IllegalMove {
    /// The round is already won or drawn.
    #[display("Game is already over")]
    GameAlreadyEnded,

    /// Index outside 0-8.
    #[display("Index {index} is out of range (must be 0-8)")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
    },

    /// The cell already carries a mark.
    #[display("Cell {position} is already occupied")]
    CellOccupied {
        /// The occupied position.
        position: Position,
    },
}

impl std::error::Error for IllegalMove {}

/// Failure to load or save session statistics.
#[derive(Debug, Clone, Display, derive_more::Error)]
#[display("Stats store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
