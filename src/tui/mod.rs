//! Terminal UI for Tictac Tally.

mod app;
mod effects;
mod input;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tictac_engine::{MemoryStatsStore, Session};
use tracing::{error, info, instrument, warn};

pub use app::App;
pub use effects::{Celebration, Mascot, modal_title};
pub use input::{Action, action_for, move_cursor};

use crate::config::AppConfig;
use crate::db::{SqliteStatsStore, StatsRepository};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Builds the session for `config`. When persistence is on and the
/// database opens, the tally is restored from it and each finished round
/// is logged; otherwise play continues in memory.
#[instrument(skip(config), fields(db_path = %config.db_path(), persist = config.persist_stats()))]
pub fn build_app(config: &AppConfig) -> App {
    if !*config.persist_stats() {
        info!("Stats persistence disabled");
        return in_memory(config);
    }

    match StatsRepository::open(config.db_path()) {
        Ok(repo) => {
            let store = SqliteStatsStore::new(repo);
            App::new(Session::with_store(Box::new(store)), config)
        }
        Err(e) => {
            warn!(error = %e, "Could not open stats database, keeping stats in memory");
            in_memory(config)
        }
    }
}

fn in_memory(config: &AppConfig) -> App {
    let session = Session::with_store(Box::new(MemoryStatsStore::new()));
    App::new(session, config)
}

/// Runs the game until the user quits.
pub fn run(config: &AppConfig) -> Result<()> {
    info!("Starting Tictac Tally TUI");
    let mut app = build_app(config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!(
        games_played = app.stats().games_played(),
        "Tictac Tally TUI exiting"
    );
    res
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while !app.should_quit() {
        let now = Instant::now();
        terminal.draw(|f| ui::draw(f, app, now))?;

        if event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key, Instant::now());
        }
    }
    Ok(())
}
