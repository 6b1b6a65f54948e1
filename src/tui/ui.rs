//! Stateless UI rendering for the game screen.

use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tictac_engine::{Cell, Player, Position, RoundState};

use crate::tui::app::App;

/// Draws the whole screen for `now`.
pub fn draw(frame: &mut Frame, app: &App, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Players
            Constraint::Min(13),   // Board and stats
            Constraint::Length(3), // Status
            Constraint::Length(3), // Help
        ])
        .split(frame.area());

    let title = Paragraph::new("Tictac Tally")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    draw_players(frame, chunks[1], app);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(28)])
        .split(chunks[2]);
    draw_board(frame, middle[0], app, now);
    draw_stats(frame, middle[1], app);

    let state = *app.session().engine().state();
    let status = Paragraph::new(state.to_string())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status, chunks[3]);

    let help = Paragraph::new("1-9 / Arrows+Enter: Move | R: New Round | Q: Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[4]);

    if app.modal_visible(now) {
        draw_dialog(frame, app);
    }
}

fn player_style(player: Player) -> Style {
    match player {
        Player::X => Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        Player::O => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

fn draw_players(frame: &mut Frame, area: Rect, app: &App) {
    let to_move = app.session().engine().state().to_move();
    let indicator = |player: Player| {
        let label = format!(" Player {} ", player);
        if to_move == Some(player) {
            Span::styled(label, player_style(player).add_modifier(Modifier::REVERSED))
        } else {
            Span::styled(label, Style::default().fg(Color::DarkGray))
        }
    };

    let line = Line::from(vec![indicator(Player::X), Span::raw("   vs   "), indicator(Player::O)]);
    let players = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(players, area);
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    let highlight = match app.session().engine().state() {
        RoundState::Won(_, line) if app.line_revealed(now) => Some(*line),
        _ => None,
    };

    for (row, chunk) in [rows[0], rows[2], rows[4]].into_iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(12),
                Constraint::Length(1),
                Constraint::Length(12),
                Constraint::Length(1),
                Constraint::Length(12),
            ])
            .split(chunk);

        for (column, cell_area) in [cols[0], cols[2], cols[4]].into_iter().enumerate() {
            if let Some(pos) = Position::from_row_column(row, column) {
                let winning = highlight.is_some_and(|line| line.contains(pos));
                draw_cell(frame, cell_area, app, pos, winning);
            }
        }
        draw_separator_vertical(frame, cols[1]);
        draw_separator_vertical(frame, cols[3]);
    }
    draw_separator(frame, rows[1]);
    draw_separator(frame, rows[3]);
}

fn draw_cell(frame: &mut Frame, area: Rect, app: &App, pos: Position, winning: bool) {
    let (symbol, base_style) = match app.session().engine().board().get(pos) {
        Cell::Empty => (
            format!(" {} ", pos.key()),
            Style::default().fg(Color::DarkGray),
        ),
        Cell::Occupied(player) => (format!(" {} ", player), player_style(player)),
    };

    let style = if winning {
        base_style.bg(Color::Green).fg(Color::Black)
    } else if pos == app.cursor() && app.session().engine().is_active() {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(symbol, style)))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(area.width as usize))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("│\n│\n│").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_stats(frame: &mut Frame, area: Rect, app: &App) {
    let stats = app.stats();
    let lines = vec![
        Line::from(format!("Games played: {}", stats.games_played())),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "X wins: {} ({:.0}%)",
                stats.x_wins(),
                stats.win_rate(Player::X)
            ),
            player_style(Player::X),
        )),
        Line::from(Span::styled(
            format!(
                "O wins: {} ({:.0}%)",
                stats.o_wins(),
                stats.win_rate(Player::O)
            ),
            player_style(Player::O),
        )),
        Line::from(Span::styled(
            format!("Draws:  {}", stats.draws()),
            Style::default().fg(Color::Yellow),
        )),
    ];

    let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Stats"));
    frame.render_widget(panel, area);
}

fn draw_dialog(frame: &mut Frame, app: &App) {
    let Some(celebration) = app.celebration() else {
        return;
    };

    let accent = match app.session().engine().state().winner() {
        Some(player) => player_style(player),
        None => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    };

    let mut lines = vec![
        Line::from(Span::styled(*celebration.banner(), accent)),
        Line::from(""),
    ];
    lines.extend(celebration.mascot().art().iter().map(|row| Line::from(*row)));
    lines.push(Line::from(""));
    lines.push(Line::from(format!("\"{}\"", celebration.message())));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter: Play Again | Q: Quit",
        Style::default().fg(Color::DarkGray),
    )));

    let area = center_rect(frame.area(), 36, lines.len() as u16 + 2);
    let dialog = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(celebration.title().as_str())
                .title_style(accent),
        );
    frame.render_widget(Clear, area);
    frame.render_widget(dialog, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
