//! The eight winning lines of a 3x3 board.

use serde::{Deserialize, Serialize};

use crate::position::Position;

/// Direction of a winning line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Orientation {
    /// Horizontal line.
    Row,
    /// Vertical line.
    Column,
    /// One of the two corner-to-corner lines.
    Diagonal,
}

/// One of the 8 fixed triples of positions that win a round.
///
/// The ordinal is 0-based within its orientation: rows count top to bottom,
/// columns left to right, and diagonal 0 runs from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinningLine {
    orientation: Orientation,
    ordinal: u8,
    positions: [Position; 3],
}

impl WinningLine {
    /// Top row.
    pub const ROW_0: Self = Self::new(
        Orientation::Row,
        0,
        [Position::TopLeft, Position::TopCenter, Position::TopRight],
    );
    /// Middle row.
    pub const ROW_1: Self = Self::new(
        Orientation::Row,
        1,
        [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    );
    /// Bottom row.
    pub const ROW_2: Self = Self::new(
        Orientation::Row,
        2,
        [
            Position::BottomLeft,
            Position::BottomCenter,
            Position::BottomRight,
        ],
    );
    /// Left column.
    pub const COLUMN_0: Self = Self::new(
        Orientation::Column,
        0,
        [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    );
    /// Center column.
    pub const COLUMN_1: Self = Self::new(
        Orientation::Column,
        1,
        [Position::TopCenter, Position::Center, Position::BottomCenter],
    );
    /// Right column.
    pub const COLUMN_2: Self = Self::new(
        Orientation::Column,
        2,
        [
            Position::TopRight,
            Position::MiddleRight,
            Position::BottomRight,
        ],
    );
    /// Top-left to bottom-right.
    pub const DIAGONAL_0: Self = Self::new(
        Orientation::Diagonal,
        0,
        [Position::TopLeft, Position::Center, Position::BottomRight],
    );
    /// Top-right to bottom-left.
    pub const DIAGONAL_1: Self = Self::new(
        Orientation::Diagonal,
        1,
        [Position::TopRight, Position::Center, Position::BottomLeft],
    );

    /// All lines in evaluation order. Win detection reports the first match.
    pub const ALL: [Self; 8] = [
        Self::ROW_0,
        Self::ROW_1,
        Self::ROW_2,
        Self::COLUMN_0,
        Self::COLUMN_1,
        Self::COLUMN_2,
        Self::DIAGONAL_0,
        Self::DIAGONAL_1,
    ];

    const fn new(orientation: Orientation, ordinal: u8, positions: [Position; 3]) -> Self {
        Self {
            orientation,
            ordinal,
            positions,
        }
    }

    /// Direction of the line.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// 0-based ordinal within the orientation.
    pub fn ordinal(&self) -> u8 {
        self.ordinal
    }

    /// The three positions on the line.
    pub fn positions(&self) -> [Position; 3] {
        self.positions
    }

    /// Whether `pos` lies on this line.
    pub fn contains(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }

    /// Stable short label, e.g. `row-0` or `diagonal-1`.
    pub fn label(&self) -> String {
        format!(
            "{}-{}",
            self.orientation.to_string().to_lowercase(),
            self.ordinal
        )
    }

    /// Parses a label produced by [`WinningLine::label`].
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|line| line.label() == label)
    }
}

impl std::fmt::Display for WinningLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.orientation, self.ordinal)
    }
}
