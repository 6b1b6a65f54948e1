//! Tictac Tally - CLI entry point
//!
//! Plays in the terminal by default; `stats` and `reset-stats` work on the
//! saved tally.

#![warn(missing_docs)]

use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tictac_tally::{AppConfig, Cli, Command, StatsReport, StatsRepository, tui};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.resolved_command() {
        Command::Play {
            db_path,
            no_persist,
        } => {
            let config = apply_overrides(config, db_path);
            let config = if no_persist {
                config.with_persist_stats(false)
            } else {
                config
            };
            init_file_logging(&config)?;
            tui::run(&config)
        }
        Command::Stats {
            db_path,
            json,
            recent,
        } => {
            let config = apply_overrides(config, db_path);
            init_stderr_logging(&config);
            show_stats(&config, json, recent)
        }
        Command::ResetStats { db_path } => {
            let config = apply_overrides(config, db_path);
            init_stderr_logging(&config);
            reset_stats(&config)
        }
    }
}

fn apply_overrides(config: AppConfig, db_path: Option<String>) -> AppConfig {
    match db_path {
        Some(path) => config.with_db_path(path),
        None => config,
    }
}

fn env_filter(config: &AppConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()))
}

/// Logs to the configured file so the alternate screen stays clean.
fn init_file_logging(config: &AppConfig) -> Result<()> {
    let log_file = File::create(config.log_file()).with_context(|| {
        format!(
            "Failed to create log file '{}'",
            config.log_file().display()
        )
    })?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn init_stderr_logging(config: &AppConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Print the saved tally
#[instrument(skip(config), fields(db_path = %config.db_path()))]
fn show_stats(config: &AppConfig, json: bool, recent: i64) -> Result<()> {
    let repo = StatsRepository::open(config.db_path())?;
    let report = StatsReport::load(&repo, recent)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}

/// Delete the saved tally
#[instrument(skip(config), fields(db_path = %config.db_path()))]
fn reset_stats(config: &AppConfig) -> Result<()> {
    let repo = StatsRepository::open(config.db_path())?;
    repo.clear()?;
    info!("Stats reset");
    println!("Stats cleared in {}", config.db_path());
    Ok(())
}
