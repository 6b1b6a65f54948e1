//! Database repository for the session tally and the round log.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tictac_engine::SessionStats;
use tracing::{debug, info, instrument};

use crate::db::models::{StatsRow, TALLY_ROW_ID};
use crate::db::{DbError, NewRound, RoundRecord, StoredStats, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database repository for tally and round operations.
///
/// Each operation opens its own connection, so the path must name a file;
/// `":memory:"` would give every call a fresh, empty database.
#[derive(Debug, Clone)]
pub struct StatsRepository {
    db_path: String,
}

impl StatsRepository {
    /// Opens the database at `db_path`, creating it and applying pending
    /// migrations as needed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the file cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path.as_ref()))]
    pub fn open(db_path: impl AsRef<str>) -> Result<Self, DbError> {
        let repo = Self {
            db_path: db_path.as_ref().to_string(),
        };
        let mut conn = repo.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migrations failed: {}", e)))?;
        info!(path = %repo.db_path, migrations = applied.len(), "Stats database ready");
        Ok(repo)
    }

    /// Path of the database file.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Loads the saved tally. A database that has never been written
    /// yields zeroed statistics.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs or a stored counter
    /// is negative.
    #[instrument(skip(self))]
    pub fn load_totals(&self) -> Result<SessionStats, DbError> {
        let mut conn = self.connection()?;

        let stored = schema::session_stats::table
            .find(TALLY_ROW_ID)
            .select(StoredStats::as_select())
            .first(&mut conn)
            .optional()?;

        match stored {
            Some(row) => {
                let stats = row.to_session_stats()?;
                debug!(games_played = stats.games_played(), "Tally loaded");
                Ok(stats)
            }
            None => {
                debug!("No tally stored yet");
                Ok(SessionStats::new())
            }
        }
    }

    /// Overwrites the saved tally.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, stats), fields(games_played = stats.games_played()))]
    pub fn save_totals(&self, stats: &SessionStats) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        upsert_totals(&mut conn, stats)
    }

    /// Appends a finished round to the log.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, round), fields(outcome = %round.outcome(), moves = round.moves_count()))]
    pub fn record_round(&self, round: &NewRound) -> Result<RoundRecord, DbError> {
        let mut conn = self.connection()?;
        insert_round(&mut conn, round)
    }

    /// Appends a finished round and overwrites the tally in one
    /// transaction, so `rounds` and `session_stats` never drift apart.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if either write fails; neither is kept then.
    #[instrument(
        skip(self, stats, round),
        fields(games_played = stats.games_played(), outcome = %round.outcome())
    )]
    pub fn save_round(
        &self,
        stats: &SessionStats,
        round: &NewRound,
    ) -> Result<RoundRecord, DbError> {
        let mut conn = self.connection()?;
        conn.transaction::<_, DbError, _>(|conn| {
            let record = insert_round(conn, round)?;
            upsert_totals(conn, stats)?;
            Ok(record)
        })
    }

    /// Most recent rounds, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn recent_rounds(&self, limit: i64) -> Result<Vec<RoundRecord>, DbError> {
        let mut conn = self.connection()?;

        let rounds = schema::rounds::table
            .order(schema::rounds::id.desc())
            .limit(limit)
            .select(RoundRecord::as_select())
            .load(&mut conn)?;

        debug!(count = rounds.len(), "Recent rounds loaded");
        Ok(rounds)
    }

    /// Total number of logged rounds.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn round_count(&self) -> Result<i64, DbError> {
        let mut conn = self.connection()?;
        let count: i64 = schema::rounds::table.count().get_result(&mut conn)?;
        Ok(count)
    }

    /// Deletes the tally and the round log.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs; nothing is deleted
    /// in that case.
    #[instrument(skip(self))]
    pub fn clear(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;

        let (tallies, rounds) = conn.transaction::<_, DbError, _>(|conn| {
            let tallies = diesel::delete(schema::session_stats::table).execute(conn)?;
            let rounds = diesel::delete(schema::rounds::table).execute(conn)?;
            Ok((tallies, rounds))
        })?;

        info!(tallies, rounds, "Stats cleared");
        Ok(())
    }
}

fn upsert_totals(conn: &mut SqliteConnection, stats: &SessionStats) -> Result<(), DbError> {
    let row = StatsRow::from_stats(stats, chrono::Utc::now().naive_utc())?;

    diesel::insert_into(schema::session_stats::table)
        .values(&row)
        .on_conflict(schema::session_stats::id)
        .do_update()
        .set(&row)
        .execute(conn)?;

    debug!(
        x_wins = stats.x_wins(),
        o_wins = stats.o_wins(),
        draws = stats.draws(),
        "Tally saved"
    );
    Ok(())
}

fn insert_round(conn: &mut SqliteConnection, round: &NewRound) -> Result<RoundRecord, DbError> {
    let record = diesel::insert_into(schema::rounds::table)
        .values(round)
        .returning(RoundRecord::as_returning())
        .get_result(conn)?;

    info!(round_id = record.id(), outcome = %record.outcome(), "Round recorded");
    Ok(record)
}
