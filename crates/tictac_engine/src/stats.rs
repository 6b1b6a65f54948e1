//! Cumulative results across the rounds of one session.

use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::error::StoreError;
use crate::state::RoundState;
use crate::types::Player;

/// Running tally of completed rounds.
///
/// Counters only grow, and `games_played` always equals
/// `x_wins + o_wins + draws`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SessionStats {
    games_played: u32,
    x_wins: u32,
    o_wins: u32,
    draws: u32,
}

impl SessionStats {
    /// Zeroed statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds statistics from per-result counts.
    ///
    /// # Panics
    ///
    /// Panics if the counts sum past `u32::MAX`; use
    /// [`SessionStats::try_from_counts`] for untrusted input.
    pub fn from_counts(x_wins: u32, o_wins: u32, draws: u32) -> Self {
        match Self::try_from_counts(x_wins, o_wins, draws) {
            Some(stats) => stats,
            None => panic!("result counts overflow games_played"),
        }
    }

    /// Builds statistics from per-result counts, or `None` if their sum
    /// does not fit in `u32`.
    pub fn try_from_counts(x_wins: u32, o_wins: u32, draws: u32) -> Option<Self> {
        let games_played = x_wins.checked_add(o_wins)?.checked_add(draws)?;
        Some(Self {
            games_played,
            x_wins,
            o_wins,
            draws,
        })
    }

    /// Rebuilds statistics from stored columns, normalising a stored
    /// `games_played` that disagrees with the per-result counts.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the counts sum past `u32::MAX`.
    #[instrument]
    pub fn restore(
        games_played: u32,
        x_wins: u32,
        o_wins: u32,
        draws: u32,
    ) -> Result<Self, StoreError> {
        let stats = Self::try_from_counts(x_wins, o_wins, draws).ok_or_else(|| {
            StoreError::new(format!(
                "Stored counts overflow: x_wins={}, o_wins={}, draws={}",
                x_wins, o_wins, draws
            ))
        })?;
        if stats.games_played != games_played {
            warn!(
                stored = games_played,
                recomputed = stats.games_played,
                "Stored games_played disagrees with result counts"
            );
        }
        Ok(stats)
    }

    /// Completed rounds.
    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Rounds won by X.
    pub fn x_wins(&self) -> u32 {
        self.x_wins
    }

    /// Rounds won by O.
    pub fn o_wins(&self) -> u32 {
        self.o_wins
    }

    /// Drawn rounds.
    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Wins for one player.
    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x_wins,
            Player::O => self.o_wins,
        }
    }

    /// Counts a finished round. Returns `false`, leaving the tally alone,
    /// for a round still in progress or a tally already at `u32::MAX`.
    pub fn record(&mut self, state: &RoundState) -> bool {
        let Some(games_played) = self.games_played.checked_add(1) else {
            warn!(state = %state, "Tally is full, round not counted");
            return false;
        };
        // Each counter is at most games_played, so none of these overflow.
        match state {
            RoundState::InProgress(_) => return false,
            RoundState::Won(Player::X, _) => self.x_wins += 1,
            RoundState::Won(Player::O, _) => self.o_wins += 1,
            RoundState::Draw => self.draws += 1,
        }
        self.games_played = games_played;
        true
    }

    /// Share of completed rounds won by `player`, as a percentage.
    pub fn win_rate(&self, player: Player) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            f64::from(self.wins(player)) / f64::from(self.games_played) * 100.0
        }
    }
}
