//! Command-line interface for tictac_tally.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tictac Tally - two-player tic-tac-toe that keeps score
#[derive(Parser, Debug)]
#[command(name = "tictac_tally")]
#[command(about = "Two-player terminal tic-tac-toe with a running tally", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./tictac_tally.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run; plays a game when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// The requested command, with `play` as the default.
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Play {
            db_path: None,
            no_persist: false,
        })
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Stats database file (overrides config and TICTAC_DB_PATH)
        #[arg(long)]
        db_path: Option<String>,

        /// Keep the tally in memory only
        #[arg(long)]
        no_persist: bool,
    },

    /// Print the saved tally and recent rounds
    Stats {
        /// Stats database file (overrides config and TICTAC_DB_PATH)
        #[arg(long)]
        db_path: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Number of recent rounds to list
        #[arg(long, default_value = "10")]
        recent: i64,
    },

    /// Delete the saved tally and round log
    ResetStats {
        /// Stats database file (overrides config and TICTAC_DB_PATH)
        #[arg(long)]
        db_path: Option<String>,
    },
}
