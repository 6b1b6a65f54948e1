//! [`StatsStore`] backed by the SQLite repository.

use tictac_engine::{MoveReport, SessionStats, StatsStore, StoreError};
use tracing::instrument;

use crate::db::{NewRound, StatsRepository};

/// Persists the session tally in `session_stats` and logs each finished
/// round in `rounds`.
#[derive(Debug, Clone)]
pub struct SqliteStatsStore {
    repo: StatsRepository,
}

impl SqliteStatsStore {
    /// Wraps an open repository.
    pub fn new(repo: StatsRepository) -> Self {
        Self { repo }
    }
}

impl StatsStore for SqliteStatsStore {
    #[instrument(skip(self), fields(db_path = %self.repo.db_path()))]
    fn load(&self) -> Result<SessionStats, StoreError> {
        Ok(self.repo.load_totals()?)
    }

    #[instrument(skip(self, stats), fields(db_path = %self.repo.db_path()))]
    fn save(&mut self, stats: &SessionStats) -> Result<(), StoreError> {
        Ok(self.repo.save_totals(stats)?)
    }

    #[instrument(skip(self, stats, report), fields(db_path = %self.repo.db_path()))]
    fn save_round(&mut self, stats: &SessionStats, report: &MoveReport) -> Result<(), StoreError> {
        match NewRound::from_state(report.state(), *report.moves()) {
            Some(round) => {
                self.repo.save_round(stats, &round)?;
                Ok(())
            }
            None => self.save(stats),
        }
    }
}
