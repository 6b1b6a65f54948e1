//! End-of-round decoration: mascot, speech bubble and banner.

use derive_getters::Getters;
use rand::Rng;
use rand::seq::SliceRandom;
use tictac_engine::{Player, RoundState};
use tracing::{debug, instrument};

const WIN_MESSAGES: [&str; 4] = ["Awesome!", "Great job!", "Well done!", "Fantastic!"];
const DRAW_MESSAGES: [&str; 4] = ["Good game!", "Nice try!", "Play again?", "So close!"];

const CAT: [&str; 4] = [r" /\_/\ ", r"( o.o )", r" > ^ < ", r"/|   |\"];
const DOG: [&str; 4] = [r" / \__ ", r"(    @\___", r" /         O", r"/   (_____/"];
const FROG: [&str; 4] = [r"  @..@  ", r" (----) ", r"( >__< )", r"^^ ~~ ^^"];

/// Character shown in the game-over dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Mascot {
    /// Celebrates an X win.
    Cat,
    /// Celebrates an O win.
    Dog,
    /// Consoles a draw.
    Frog,
}

impl Mascot {
    /// Mascot for a finished round; `None` while the round is in progress.
    pub fn for_state(state: &RoundState) -> Option<Self> {
        match state {
            RoundState::InProgress(_) => None,
            RoundState::Won(Player::X, _) => Some(Self::Cat),
            RoundState::Won(Player::O, _) => Some(Self::Dog),
            RoundState::Draw => Some(Self::Frog),
        }
    }

    /// ASCII art, one entry per line.
    pub fn art(&self) -> &'static [&'static str] {
        match self {
            Self::Cat => &CAT,
            Self::Dog => &DOG,
            Self::Frog => &FROG,
        }
    }
}

/// Decoration picked once when a round ends.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Celebration {
    mascot: Mascot,
    #[getter(skip)]
    message: &'static str,
    #[getter(skip)]
    banner: &'static str,
    title: String,
}

impl Celebration {
    /// Get field `message` from instance of `Celebration`.
    pub fn message(&self) -> &&'static str {
        &self.message
    }

    /// Get field `banner` from instance of `Celebration`.
    pub fn banner(&self) -> &&'static str {
        &self.banner
    }

    /// Picks the decoration for a finished round. Returns `None` while the
    /// round is in progress.
    #[instrument(skip(rng))]
    pub fn for_state(state: &RoundState, rng: &mut impl Rng) -> Option<Self> {
        let mascot = Mascot::for_state(state)?;
        let (pool, banner) = match state {
            RoundState::Draw => (&DRAW_MESSAGES, "DRAW!"),
            _ => (&WIN_MESSAGES, "YAYY!"),
        };
        let message = pool.choose(rng).copied().unwrap_or(pool[0]);
        let title = modal_title(state)?;
        debug!(%mascot, message, "Celebration chosen");
        Some(Self {
            mascot,
            message,
            banner,
            title,
        })
    }
}

/// Heading of the game-over dialog.
pub fn modal_title(state: &RoundState) -> Option<String> {
    match state {
        RoundState::InProgress(_) => None,
        RoundState::Won(winner, _) => Some(format!("Player {} Wins!", winner)),
        RoundState::Draw => Some("It's a Draw!".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tictac_engine::WinningLine;

    #[test]
    fn test_mascot_follows_outcome() {
        let x = RoundState::Won(Player::X, WinningLine::ROW_0);
        let o = RoundState::Won(Player::O, WinningLine::DIAGONAL_0);
        assert_eq!(Mascot::for_state(&x), Some(Mascot::Cat));
        assert_eq!(Mascot::for_state(&o), Some(Mascot::Dog));
        assert_eq!(Mascot::for_state(&RoundState::Draw), Some(Mascot::Frog));
        assert_eq!(Mascot::for_state(&RoundState::InProgress(Player::X)), None);
    }

    #[test]
    fn test_messages_drawn_from_matching_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        let win = RoundState::Won(Player::O, WinningLine::COLUMN_1);
        for _ in 0..20 {
            let c = Celebration::for_state(&win, &mut rng).expect("finished");
            assert!(WIN_MESSAGES.contains(c.message()));
            assert_eq!(*c.banner(), "YAYY!");
            assert_eq!(c.title(), "Player O Wins!");

            let d = Celebration::for_state(&RoundState::Draw, &mut rng).expect("finished");
            assert!(DRAW_MESSAGES.contains(d.message()));
            assert_eq!(*d.banner(), "DRAW!");
            assert_eq!(d.title(), "It's a Draw!");
        }
    }

    #[test]
    fn test_no_celebration_mid_round() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(Celebration::for_state(&RoundState::InProgress(Player::O), &mut rng).is_none());
    }
}
