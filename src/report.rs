//! Saved-tally summary printed by the `stats` command.

use derive_getters::Getters;
use serde::Serialize;
use tictac_engine::{Player, SessionStats};
use tracing::{instrument, warn};

use crate::db::{DbError, RoundOutcome, RoundRecord, StatsRepository};

/// Totals plus the most recent rounds.
#[derive(Debug, Clone, Serialize, Getters)]
pub struct StatsReport {
    totals: SessionStats,
    rounds_logged: i64,
    recent: Vec<RoundRecord>,
}

impl StatsReport {
    /// Reads the report from the database.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a query fails.
    #[instrument(skip(repo), fields(db_path = %repo.db_path()))]
    pub fn load(repo: &StatsRepository, recent: i64) -> Result<Self, DbError> {
        Ok(Self {
            totals: repo.load_totals()?,
            rounds_logged: repo.round_count()?,
            recent: repo.recent_rounds(recent.max(0))?,
        })
    }

    /// Plain-text rendering.
    pub fn render_text(&self) -> String {
        let t = &self.totals;
        let mut out = format!(
            "Games played: {}\nX wins: {} ({:.1}%)\nO wins: {} ({:.1}%)\nDraws: {}\n",
            t.games_played(),
            t.x_wins(),
            t.win_rate(Player::X),
            t.o_wins(),
            t.win_rate(Player::O),
            t.draws(),
        );

        if self.recent.is_empty() {
            out.push_str("\nNo rounds logged.\n");
            return out;
        }

        out.push_str(&format!(
            "\nRecent rounds ({} of {}):\n",
            self.recent.len(),
            self.rounds_logged
        ));
        for round in &self.recent {
            out.push_str(&format!(
                "  {}  {:<7} {:<11} {} moves\n",
                round.played_at().format("%Y-%m-%d %H:%M"),
                describe(round),
                round.winning_line().as_deref().unwrap_or("-"),
                round.moves_count(),
            ));
        }
        out
    }
}

fn describe(round: &RoundRecord) -> &'static str {
    match round.parse_outcome() {
        Ok(RoundOutcome::XWin) => "X won",
        Ok(RoundOutcome::OWin) => "O won",
        Ok(RoundOutcome::Draw) => "Draw",
        Err(e) => {
            warn!(error = %e, round_id = round.id(), "Unreadable round outcome");
            "?"
        }
    }
}
