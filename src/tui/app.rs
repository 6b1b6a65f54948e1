//! Application state and logic.

use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tictac_engine::{MoveReport, Position, Session, SessionStats};
use tracing::{debug, info, instrument};

use crate::config::AppConfig;
use crate::tui::effects::Celebration;
use crate::tui::input::{self, Action};

/// A round that has just ended, and when.
#[derive(Debug, Clone)]
struct Finished {
    report: MoveReport,
    at: Instant,
    celebration: Option<Celebration>,
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    session: Session,
    cursor: Position,
    finished: Option<Finished>,
    reveal_delay: Duration,
    modal_delay: Duration,
    rng: StdRng,
    should_quit: bool,
}

impl App {
    /// Creates the app around a session.
    #[instrument(skip(session, config))]
    pub fn new(session: Session, config: &AppConfig) -> Self {
        Self {
            session,
            cursor: Position::Center,
            finished: None,
            reveal_delay: config.reveal_delay(),
            modal_delay: config.modal_delay(),
            rng: StdRng::from_entropy(),
            should_quit: false,
        }
    }

    /// Replaces the decoration RNG, for reproducible runs.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// The session being played.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Running tally.
    pub fn stats(&self) -> SessionStats {
        self.session.current_stats()
    }

    /// Cell under the keyboard cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// True once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Report of the move that ended the current round, if it has ended.
    pub fn final_report(&self) -> Option<&MoveReport> {
        self.finished.as_ref().map(|f| &f.report)
    }

    /// Decoration for the game-over dialog.
    pub fn celebration(&self) -> Option<&Celebration> {
        self.finished.as_ref().and_then(|f| f.celebration.as_ref())
    }

    /// Whether the winning line should be highlighted at `now`.
    pub fn line_revealed(&self, now: Instant) -> bool {
        self.elapsed_since_finish(now)
            .is_some_and(|elapsed| elapsed >= self.reveal_delay)
    }

    /// Whether the game-over dialog is showing at `now`.
    pub fn modal_visible(&self, now: Instant) -> bool {
        self.elapsed_since_finish(now)
            .is_some_and(|elapsed| elapsed >= self.modal_delay)
    }

    fn elapsed_since_finish(&self, now: Instant) -> Option<Duration> {
        self.finished
            .as_ref()
            .map(|f| now.saturating_duration_since(f.at))
    }

    /// Applies a key press received at `now`.
    #[instrument(skip(self, key), fields(code = ?key.code))]
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let Some(action) = input::action_for(key, self.modal_visible(now)) else {
            return;
        };
        debug!(?action, "Key mapped");

        match action {
            Action::Quit => {
                info!("User quit");
                self.should_quit = true;
            }
            Action::NewRound => self.new_round(),
            Action::Cursor(code) => self.cursor = input::move_cursor(self.cursor, code),
            Action::Place(position) => {
                self.cursor = position;
                self.submit(position, now);
            }
            Action::PlaceAtCursor => self.submit(self.cursor, now),
        }
    }

    /// Plays `position` for the current player. Illegal moves are ignored.
    #[instrument(skip(self, now))]
    pub fn submit(&mut self, position: Position, now: Instant) {
        let report = match self.session.submit_move(position.index()) {
            Ok(report) => report,
            Err(e) => {
                debug!(error = %e, "Ignoring illegal move");
                return;
            }
        };

        if report.is_terminal() {
            let celebration = Celebration::for_state(report.state(), &mut self.rng);
            self.finished = Some(Finished {
                report,
                at: now,
                celebration,
            });
        }
    }

    /// Starts a fresh round, keeping the tally.
    #[instrument(skip(self))]
    pub fn new_round(&mut self) {
        self.session.start_new_round();
        self.finished = None;
        self.cursor = Position::Center;
    }
}
