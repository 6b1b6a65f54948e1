//! Session coordinator: one engine, one running tally.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::engine::Engine;
use crate::error::IllegalMove;
use crate::position::Position;
use crate::state::RoundState;
use crate::stats::SessionStats;
use crate::store::StatsStore;
use crate::types::Player;

/// What happened on an accepted move.
///
/// This is the value presentation layers render from: the cell that was
/// marked, the resulting round state and the tally after the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct MoveReport {
    /// Player who moved.
    player: Player,
    /// Cell that was marked.
    position: Position,
    /// Round state after the move.
    state: RoundState,
    /// Statistics after the move.
    stats: SessionStats,
    /// Marks on the board after the move.
    moves: usize,
}

impl MoveReport {
    /// True when this move ended the round.
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}

/// Coordinates rounds and owns the session statistics.
#[derive(Debug)]
pub struct Session {
    engine: Engine,
    stats: SessionStats,
    store: Option<Box<dyn StatsStore>>,
}

impl Session {
    /// Starts a session with zeroed statistics and no persistence.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session");
        Self {
            engine: Engine::new(),
            stats: SessionStats::new(),
            store: None,
        }
    }

    /// Starts a session backed by `store`, restoring its statistics.
    ///
    /// A failed load is logged and the session starts from zero; later
    /// saves still go to the store.
    #[instrument(skip(store))]
    pub fn with_store(store: Box<dyn StatsStore>) -> Self {
        let stats = match store.load() {
            Ok(stats) => {
                info!(games_played = stats.games_played(), "Restored session stats");
                stats
            }
            Err(e) => {
                warn!(error = %e, "Could not load stats, starting from zero");
                SessionStats::new()
            }
        };
        Self {
            engine: Engine::new(),
            stats,
            store: Some(store),
        }
    }

    /// Read-only view of the engine.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Snapshot of the statistics.
    pub fn current_stats(&self) -> SessionStats {
        self.stats
    }

    /// Plays `index` for the current player.
    ///
    /// A move that ends the round bumps exactly one result counter and
    /// `games_played`, then saves once through [`StatsStore::save_round`].
    /// Save failures are logged; the in-memory tally stays authoritative.
    ///
    /// # Errors
    ///
    /// Returns the engine's [`IllegalMove`] unchanged; statistics are not
    /// touched.
    #[instrument(skip(self))]
    pub fn submit_move(&mut self, index: usize) -> Result<MoveReport, IllegalMove> {
        let player = self.engine.current_player();
        let (position, state) = self.engine.play(index)?;
        let counted = self.stats.record(&state);

        let report = MoveReport {
            player,
            position,
            state,
            stats: self.stats,
            moves: self.engine.history().len(),
        };

        if counted {
            info!(
                outcome = %state,
                games_played = self.stats.games_played(),
                x_wins = self.stats.x_wins(),
                o_wins = self.stats.o_wins(),
                draws = self.stats.draws(),
                "Round complete"
            );
            self.persist(&report);
        }

        Ok(report)
    }

    /// Abandons the current round and starts a new one. Statistics are
    /// left as they are.
    #[instrument(skip(self))]
    pub fn start_new_round(&mut self) {
        debug!(
            abandoned = self.engine.is_active() && !self.engine.history().is_empty(),
            "Starting new round"
        );
        self.engine.reset();
    }

    fn persist(&mut self, report: &MoveReport) {
        if let Some(store) = self.store.as_mut()
            && let Err(e) = store.save_round(&self.stats, report)
        {
            warn!(error = %e, "Could not save stats");
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::MemoryStatsStore;
    use crate::WinningLine;

    #[derive(Debug)]
    struct BrokenStore;

    impl StatsStore for BrokenStore {
        fn load(&self) -> Result<SessionStats, StoreError> {
            Err(StoreError::new("disk on fire"))
        }

        fn save(&mut self, _stats: &SessionStats) -> Result<(), StoreError> {
            Err(StoreError::new("disk on fire"))
        }
    }

    #[test]
    fn test_report_carries_mover_and_position() {
        let mut session = Session::new();
        let report = session.submit_move(4).expect("legal move");
        assert_eq!(*report.player(), Player::X);
        assert_eq!(*report.position(), Position::Center);
        assert_eq!(*report.state(), RoundState::InProgress(Player::O));
        assert!(!report.is_terminal());
    }

    #[test]
    fn test_win_counted_once() {
        let mut session = Session::new();
        for index in [0, 3, 1, 4] {
            session.submit_move(index).expect("legal move");
        }
        let report = session.submit_move(2).expect("legal move");
        assert_eq!(
            *report.state(),
            RoundState::Won(Player::X, WinningLine::ROW_0)
        );
        assert_eq!(*report.stats(), SessionStats::from_counts(1, 0, 0));

        assert_eq!(session.submit_move(8), Err(IllegalMove::GameAlreadyEnded));
        assert_eq!(session.current_stats(), SessionStats::from_counts(1, 0, 0));
    }

    #[test]
    fn test_store_stats_restored_and_extended() {
        let store = MemoryStatsStore::with_stats(SessionStats::from_counts(2, 1, 0));
        let mut session = Session::with_store(Box::new(store));
        assert_eq!(session.current_stats().games_played(), 3);

        for index in [0, 3, 1, 4, 2] {
            session.submit_move(index).expect("legal move");
        }
        assert_eq!(session.current_stats(), SessionStats::from_counts(3, 1, 0));
    }

    /// Store shared with the test after the session takes ownership.
    #[derive(Debug, Clone, Default)]
    struct SharedStore(std::rc::Rc<std::cell::RefCell<MemoryStatsStore>>);

    impl StatsStore for SharedStore {
        fn load(&self) -> Result<SessionStats, StoreError> {
            self.0.borrow().load()
        }

        fn save(&mut self, stats: &SessionStats) -> Result<(), StoreError> {
            self.0.borrow_mut().save(stats)
        }
    }

    #[test]
    fn test_store_saved_once_per_completed_round() {
        let store = SharedStore::default();
        let mut session = Session::with_store(Box::new(store.clone()));

        for index in [0, 3, 1, 4] {
            session.submit_move(index).expect("legal move");
        }
        assert_eq!(
            session.submit_move(0),
            Err(IllegalMove::CellOccupied {
                position: Position::TopLeft
            })
        );
        assert_eq!(store.0.borrow().saves(), 0);

        let report = session.submit_move(2).expect("legal move");
        assert!(report.is_terminal());
        assert_eq!(*report.moves(), 5);
        assert_eq!(session.submit_move(8), Err(IllegalMove::GameAlreadyEnded));
        session.start_new_round();
        session.submit_move(4).expect("legal move");

        let saved = store.0.borrow();
        assert_eq!(saved.saves(), 1);
        assert_eq!(saved.saved(), Some(session.current_stats()));
        assert_eq!(saved.saved(), Some(SessionStats::from_counts(1, 0, 0)));
    }

    #[test]
    fn test_broken_store_does_not_block_play() {
        let mut session = Session::with_store(Box::new(BrokenStore));
        assert_eq!(session.current_stats(), SessionStats::new());

        for index in [0, 3, 1, 4, 2] {
            session.submit_move(index).expect("legal move");
        }
        assert_eq!(session.current_stats(), SessionStats::from_counts(1, 0, 0));
    }
}
