//! Persistence seam for session statistics.

use tracing::{debug, instrument};

use crate::error::StoreError;
use crate::session::MoveReport;
use crate::stats::SessionStats;

/// Load/save capability a [`Session`](crate::Session) can be built with.
///
/// Implementations live with the host application (a database, a file);
/// the engine only sees this trait.
pub trait StatsStore: std::fmt::Debug {
    /// Reads the last saved statistics. A store that has never been written
    /// returns zeroed statistics.
    fn load(&self) -> Result<SessionStats, StoreError>;

    /// Replaces the saved statistics.
    fn save(&mut self, stats: &SessionStats) -> Result<(), StoreError>;

    /// Persists the tally after the move in `report` finished a round.
    ///
    /// Stores that also log rounds override this to write the log entry and
    /// the tally together; the default only saves the tally.
    fn save_round(
        &mut self,
        stats: &SessionStats,
        _report: &MoveReport,
    ) -> Result<(), StoreError> {
        self.save(stats)
    }
}

/// In-memory store. Keeps the last saved value and a save counter.
#[derive(Debug, Clone, Default)]
pub struct MemoryStatsStore {
    saved: Option<SessionStats>,
    saves: usize,
}

impl MemoryStatsStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with `stats`.
    pub fn with_stats(stats: SessionStats) -> Self {
        Self {
            saved: Some(stats),
            saves: 0,
        }
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves
    }

    /// The last saved value.
    pub fn saved(&self) -> Option<SessionStats> {
        self.saved
    }
}

impl StatsStore for MemoryStatsStore {
    #[instrument(skip(self))]
    fn load(&self) -> Result<SessionStats, StoreError> {
        Ok(self.saved.unwrap_or_default())
    }

    #[instrument(skip(self))]
    fn save(&mut self, stats: &SessionStats) -> Result<(), StoreError> {
        self.saved = Some(*stats);
        self.saves += 1;
        debug!(saves = self.saves, "Stats saved in memory");
        Ok(())
    }
}
