//! Database models and domain conversions.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use serde::Serialize;
use tictac_engine::{Player, RoundState, SessionStats, WinningLine};
use tracing::instrument;

use crate::db::{DbError, schema};

/// Primary key of the single tally row.
pub(crate) const TALLY_ROW_ID: i32 = 1;

/// The persisted tally row.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::session_stats)]
pub struct StoredStats {
    id: i32,
    games_played: i32,
    x_wins: i32,
    o_wins: i32,
    draws: i32,
    updated_at: NaiveDateTime,
}

impl StoredStats {
    /// Converts the row into engine statistics.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a stored counter is negative or the counters
    /// sum past `u32::MAX`.
    #[instrument(skip(self), fields(games_played = self.games_played))]
    pub fn to_session_stats(&self) -> Result<SessionStats, DbError> {
        SessionStats::restore(
            counter(self.games_played, "games_played")?,
            counter(self.x_wins, "x_wins")?,
            counter(self.o_wins, "o_wins")?,
            counter(self.draws, "draws")?,
        )
        .map_err(|e| DbError::new(e.message))
    }
}

fn counter(value: i32, column: &str) -> Result<u32, DbError> {
    u32::try_from(value).map_err(|_| DbError::new(format!("Negative {}: {}", column, value)))
}

fn column(value: u32, column: &str) -> Result<i32, DbError> {
    i32::try_from(value).map_err(|_| DbError::new(format!("{} too large: {}", column, value)))
}

/// Insert/update form of the tally row.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = schema::session_stats)]
pub(crate) struct StatsRow {
    id: i32,
    games_played: i32,
    x_wins: i32,
    o_wins: i32,
    draws: i32,
    updated_at: NaiveDateTime,
}

impl StatsRow {
    #[instrument(skip(stats))]
    pub(crate) fn from_stats(
        stats: &SessionStats,
        updated_at: NaiveDateTime,
    ) -> Result<Self, DbError> {
        Ok(Self {
            id: TALLY_ROW_ID,
            games_played: column(stats.games_played(), "games_played")?,
            x_wins: column(stats.x_wins(), "x_wins")?,
            o_wins: column(stats.o_wins(), "o_wins")?,
            draws: column(stats.draws(), "draws")?,
            updated_at,
        })
    }
}

/// A logged round.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters, Serialize)]
#[diesel(table_name = schema::rounds)]
pub struct RoundRecord {
    id: i32,
    outcome: String,
    winning_line: Option<String>,
    moves_count: i32,
    played_at: NaiveDateTime,
}

impl RoundRecord {
    /// Parses the stored outcome string into a [`RoundOutcome`].
    #[instrument(skip(self), fields(outcome = %self.outcome))]
    pub fn parse_outcome(&self) -> Result<RoundOutcome, DbError> {
        RoundOutcome::from_db_string(self.outcome())
    }

    /// Parses the stored line label, if any.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] for a label that names no line.
    #[instrument(skip(self))]
    pub fn parse_winning_line(&self) -> Result<Option<WinningLine>, DbError> {
        self.winning_line
            .as_deref()
            .map(|label| {
                WinningLine::from_label(label)
                    .ok_or_else(|| DbError::new(format!("Invalid winning line: '{}'", label)))
            })
            .transpose()
    }
}

/// Insertable round log entry.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::rounds)]
pub struct NewRound {
    outcome: String,
    winning_line: Option<String>,
    moves_count: i32,
}

impl NewRound {
    /// Builds the log entry for a finished round. Returns `None` while the
    /// round is still in progress.
    #[instrument]
    pub fn from_state(state: &RoundState, moves_count: usize) -> Option<Self> {
        let outcome = RoundOutcome::from_state(state)?;
        Some(Self::new(
            outcome.to_db_string().to_string(),
            state.winning_line().map(|line| line.label()),
            i32::try_from(moves_count).unwrap_or(i32::MAX),
        ))
    }
}

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundOutcome {
    /// X completed a line.
    XWin,
    /// O completed a line.
    OWin,
    /// Full board, no line.
    Draw,
}

impl RoundOutcome {
    /// Outcome of a terminal state.
    pub fn from_state(state: &RoundState) -> Option<Self> {
        match state {
            RoundState::InProgress(_) => None,
            RoundState::Won(Player::X, _) => Some(Self::XWin),
            RoundState::Won(Player::O, _) => Some(Self::OWin),
            RoundState::Draw => Some(Self::Draw),
        }
    }

    /// Converts outcome to the string stored in the database.
    #[instrument]
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::XWin => "x_win",
            Self::OWin => "o_win",
            Self::Draw => "draw",
        }
    }

    /// Parses outcome from the string stored in the database.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the string is not a valid outcome value.
    #[instrument(skip(s), fields(s = %s))]
    pub fn from_db_string(s: &str) -> Result<Self, DbError> {
        match s {
            "x_win" => Ok(Self::XWin),
            "o_win" => Ok(Self::OWin),
            "draw" => Ok(Self::Draw),
            _ => Err(DbError::new(format!("Invalid outcome: '{}'", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_db_string_round_trip() {
        for outcome in [RoundOutcome::XWin, RoundOutcome::OWin, RoundOutcome::Draw] {
            let parsed = RoundOutcome::from_db_string(outcome.to_db_string()).expect("parse");
            assert_eq!(parsed, outcome);
        }
        assert!(RoundOutcome::from_db_string("loss").is_err());
    }

    #[test]
    fn test_new_round_only_for_finished_rounds() {
        assert!(NewRound::from_state(&RoundState::InProgress(Player::O), 1).is_none());

        let won = RoundState::Won(Player::O, WinningLine::DIAGONAL_1);
        let round = NewRound::from_state(&won, 6).expect("finished round");
        assert_eq!(round.outcome(), "o_win");
        assert_eq!(round.winning_line().as_deref(), Some("diagonal-1"));
        assert_eq!(*round.moves_count(), 6);

        let draw = NewRound::from_state(&RoundState::Draw, 9).expect("finished round");
        assert_eq!(draw.outcome(), "draw");
        assert!(draw.winning_line().is_none());
    }

    fn stored(games_played: i32, x_wins: i32, o_wins: i32, draws: i32) -> StoredStats {
        StoredStats {
            id: TALLY_ROW_ID,
            games_played,
            x_wins,
            o_wins,
            draws,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[test]
    fn test_stored_counters_convert() {
        let stats = stored(4, 2, 1, 1).to_session_stats().expect("valid row");
        assert_eq!(stats, SessionStats::from_counts(2, 1, 1));
        assert!(stored(0, -1, 0, 0).to_session_stats().is_err());
    }

    #[test]
    fn test_stored_counters_summing_past_u32_are_rejected() {
        let m = i32::MAX;
        let err = stored(m, m, m, m).to_session_stats().unwrap_err();
        assert!(err.message.contains("overflow"));
    }

    #[test]
    fn test_stats_row_rejects_overflow() {
        let stats = SessionStats::from_counts(u32::MAX, 0, 0);
        let now = chrono::Utc::now().naive_utc();
        assert!(StatsRow::from_stats(&stats, now).is_err());
    }
}
