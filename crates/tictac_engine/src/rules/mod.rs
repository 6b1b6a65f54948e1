//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Rules are kept apart from
//! board storage so the engine, the invariant checks and tests share a
//! single definition of "won" and "drawn".

mod draw;
mod win;

pub use draw::{is_draw, is_full};
pub use win::{check_winner, matching_lines, winning_line};
