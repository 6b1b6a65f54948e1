//! Key bindings and cursor movement for keyboard navigation.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tictac_engine::Position;

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Place a mark at a cell chosen by digit.
    Place(Position),
    /// Place a mark under the cursor.
    PlaceAtCursor,
    /// Move the cursor one cell.
    Cursor(KeyCode),
    /// Abandon or replace the round with a fresh one.
    NewRound,
    /// Leave the app.
    Quit,
}

/// Maps a key press to an action. While the game-over dialog is open,
/// Enter and Space start the next round instead of placing a mark.
pub fn action_for(key: KeyEvent, dialog_open: bool) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::NewRound),
        KeyCode::Enter | KeyCode::Char(' ') if dialog_open => Some(Action::NewRound),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::PlaceAtCursor),
        KeyCode::Char(c) => Position::from_key(c).map(Action::Place),
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            Some(Action::Cursor(key.code))
        }
        _ => None,
    }
}

/// Moves cursor based on arrow keys. Stops at the board edge.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, column) = (cursor.row(), cursor.column());
    let (row, column) = match key {
        KeyCode::Up => (row.saturating_sub(1), column),
        KeyCode::Down => (row + 1, column),
        KeyCode::Left => (row, column.saturating_sub(1)),
        KeyCode::Right => (row, column + 1),
        _ => return cursor,
    };
    Position::from_row_column(row, column).unwrap_or(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_digits_map_to_cells() {
        assert_eq!(
            action_for(press(KeyCode::Char('1')), false),
            Some(Action::Place(Position::TopLeft))
        );
        assert_eq!(
            action_for(press(KeyCode::Char('9')), false),
            Some(Action::Place(Position::BottomRight))
        );
        assert_eq!(action_for(press(KeyCode::Char('0')), false), None);
    }

    #[test]
    fn test_enter_depends_on_dialog() {
        assert_eq!(
            action_for(press(KeyCode::Enter), false),
            Some(Action::PlaceAtCursor)
        );
        assert_eq!(action_for(press(KeyCode::Enter), true), Some(Action::NewRound));
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(action_for(press(KeyCode::Esc), false), Some(Action::Quit));
        assert_eq!(action_for(press(KeyCode::Char('q')), true), Some(Action::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action_for(ctrl_c, false), Some(Action::Quit));
    }

    #[test]
    fn test_cursor_moves_and_clamps() {
        assert_eq!(move_cursor(Position::Center, KeyCode::Up), Position::TopCenter);
        assert_eq!(move_cursor(Position::Center, KeyCode::Right), Position::MiddleRight);
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Up), Position::TopLeft);
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Left), Position::TopLeft);
        assert_eq!(
            move_cursor(Position::BottomRight, KeyCode::Down),
            Position::BottomRight
        );
        assert_eq!(move_cursor(Position::Center, KeyCode::Tab), Position::Center);
    }
}
