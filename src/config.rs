//! Application configuration.
//!
//! Settings come from an optional TOML file, then the `TICTAC_DB_PATH`
//! environment variable, then command-line flags, each layer overriding
//! the one before.

use std::path::{Path, PathBuf};
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// File read when no `--config` path is given, if present.
pub const DEFAULT_CONFIG_FILE: &str = "tictac_tally.toml";

/// Environment variable overriding [`AppConfig::db_path`].
pub const DB_PATH_ENV: &str = "TICTAC_DB_PATH";

/// Runtime settings for the game and its stats database.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite file holding the tally and round log.
    #[serde(default = "default_db_path")]
    db_path: String,

    /// Whether the tally survives restarts.
    #[serde(default = "default_persist_stats")]
    persist_stats: bool,

    /// Delay before the winning line is highlighted.
    #[serde(default = "default_reveal_delay_ms")]
    reveal_delay_ms: u64,

    /// Delay before the end-of-round modal appears.
    #[serde(default = "default_modal_delay_ms")]
    modal_delay_ms: u64,

    /// Log destination while the terminal UI owns the screen.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,

    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

#[instrument]
fn default_db_path() -> String {
    "tictac_tally.db".to_string()
}

#[instrument]
fn default_persist_stats() -> bool {
    true
}

#[instrument]
fn default_reveal_delay_ms() -> u64 {
    300
}

#[instrument]
fn default_modal_delay_ms() -> u64 {
    1000
}

#[instrument]
fn default_log_file() -> PathBuf {
    PathBuf::from("tictac_tally.log")
}

#[instrument]
fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            persist_stats: default_persist_stats(),
            reveal_delay_ms: default_reveal_delay_ms(),
            modal_delay_ms: default_modal_delay_ms(),
            log_file: default_log_file(),
            log_filter: default_log_filter(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        info!(db_path = %config.db_path, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text. Missing keys take defaults.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads `path` if given, else [`DEFAULT_CONFIG_FILE`] if it exists,
    /// else defaults. The environment override is applied on top.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an explicit path is unreadable, or if
    /// any config file fails to parse.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => {
                debug!("No config file, using defaults");
                Self::default()
            }
        };
        Ok(config.with_env_overrides())
    }

    /// Applies [`DB_PATH_ENV`] if it is set and non-empty.
    #[instrument(skip(self))]
    pub fn with_env_overrides(self) -> Self {
        match std::env::var(DB_PATH_ENV) {
            Ok(db_path) if !db_path.is_empty() => {
                debug!(db_path = %db_path, "Database path taken from environment");
                self.with_db_path(db_path)
            }
            _ => self,
        }
    }

    /// Replaces the database path.
    pub fn with_db_path(mut self, db_path: impl Into<String>) -> Self {
        self.db_path = db_path.into();
        self
    }

    /// Turns tally persistence on or off.
    pub fn with_persist_stats(mut self, persist_stats: bool) -> Self {
        self.persist_stats = persist_stats;
        self
    }

    /// Winning-line reveal delay as a [`Duration`].
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    /// End-of-round modal delay as a [`Duration`].
    pub fn modal_delay(&self) -> Duration {
        Duration::from_millis(self.modal_delay_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
