//! SQLite persistence for the session tally and the round log.

mod error;
mod models;
mod repository;
mod schema;
mod store;

pub use error::DbError;
pub use models::{NewRound, RoundOutcome, RoundRecord, StoredStats};
pub use repository::StatsRepository;
pub use store::SqliteStatsStore;
