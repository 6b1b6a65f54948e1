//! Tictac Tally - two-player terminal tic-tac-toe that keeps score
//!
//! The game rules and the session tally live in the `tictac_engine` crate.
//! This crate adds everything around them.
//!
//! # Architecture
//!
//! - **Config**: TOML file, environment and CLI layering
//! - **Db**: SQLite tally and round log via Diesel, plus the
//!   [`SqliteStatsStore`] the session persists through
//! - **Tui**: ratatui front end driving a [`tictac_engine::Session`]
//! - **Report**: the `stats` command's text and JSON output
//!
//! # Example
//!
//! ```no_run
//! use tictac_tally::{SqliteStatsStore, StatsRepository};
//! use tictac_engine::Session;
//!
//! # fn example() -> anyhow::Result<()> {
//! let repo = StatsRepository::open("tictac_tally.db")?;
//! let mut session = Session::with_store(Box::new(SqliteStatsStore::new(repo)));
//! session.submit_move(4)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod db;
mod report;

pub mod tui;

// Crate-level exports - CLI
pub use cli::{Cli, Command};

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, DB_PATH_ENV, DEFAULT_CONFIG_FILE};

// Crate-level exports - Persistence
pub use db::{
    DbError, NewRound, RoundOutcome, RoundRecord, SqliteStatsStore, StatsRepository, StoredStats,
};

// Crate-level exports - Reporting
pub use report::StatsReport;
