//! Tests for database repository operations.

use diesel::prelude::*;
use tempfile::NamedTempFile;
use tictac_engine::{Player, RoundState, SessionStats, WinningLine};
use tictac_tally::{NewRound, RoundOutcome, StatsRepository};

/// Creates a temporary database file with schema applied, returns the file
/// handle (must stay in scope to keep the file alive) and a ready repository.
fn setup_test_db() -> (NamedTempFile, StatsRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let repo = StatsRepository::open(db_path).expect("Failed to open repository");
    (db_file, repo)
}

fn finished(state: RoundState, moves: usize) -> NewRound {
    NewRound::from_state(&state, moves).expect("finished round")
}

#[test]
fn test_fresh_database_has_zero_totals() {
    let (_db, repo) = setup_test_db();
    let totals = repo.load_totals().expect("Load failed");
    assert_eq!(totals, SessionStats::new());
}

#[test]
fn test_save_then_load_totals() {
    let (_db, repo) = setup_test_db();
    let stats = SessionStats::from_counts(3, 2, 1);
    repo.save_totals(&stats).expect("Save failed");
    assert_eq!(repo.load_totals().expect("Load failed"), stats);
}

#[test]
fn test_save_overwrites_single_row() {
    let (_db, repo) = setup_test_db();
    repo.save_totals(&SessionStats::from_counts(1, 0, 0))
        .expect("Save failed");
    repo.save_totals(&SessionStats::from_counts(1, 1, 4))
        .expect("Save failed");
    let totals = repo.load_totals().expect("Load failed");
    assert_eq!(totals.games_played(), 6);
    assert_eq!(totals.draws(), 4);
}

#[test]
fn test_reopen_keeps_data() {
    let (db, repo) = setup_test_db();
    repo.save_totals(&SessionStats::from_counts(0, 2, 0))
        .expect("Save failed");
    drop(repo);

    let reopened = StatsRepository::open(db.path().to_str().expect("Invalid path"))
        .expect("Reopen failed");
    assert_eq!(reopened.load_totals().expect("Load failed").o_wins(), 2);
}

#[test]
fn test_record_round() {
    let (_db, repo) = setup_test_db();
    let record = repo
        .record_round(&finished(
            RoundState::Won(Player::X, WinningLine::DIAGONAL_0),
            7,
        ))
        .expect("Record failed");
    assert!(*record.id() > 0);
    assert_eq!(record.parse_outcome().expect("outcome"), RoundOutcome::XWin);
    assert_eq!(
        record.parse_winning_line().expect("line"),
        Some(WinningLine::DIAGONAL_0)
    );
    assert_eq!(*record.moves_count(), 7);
}

#[test]
fn test_recent_rounds_newest_first_and_limited() {
    let (_db, repo) = setup_test_db();
    repo.record_round(&finished(RoundState::Draw, 9))
        .expect("Record failed");
    repo.record_round(&finished(RoundState::Won(Player::O, WinningLine::ROW_2), 6))
        .expect("Record failed");
    repo.record_round(&finished(RoundState::Won(Player::X, WinningLine::ROW_0), 5))
        .expect("Record failed");

    let recent = repo.recent_rounds(2).expect("Query failed");
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].outcome(), "x_win");
    assert_eq!(recent[1].outcome(), "o_win");
    assert_eq!(repo.round_count().expect("Count failed"), 3);
}

#[test]
fn test_draw_round_has_no_line() {
    let (_db, repo) = setup_test_db();
    let record = repo
        .record_round(&finished(RoundState::Draw, 9))
        .expect("Record failed");
    assert_eq!(record.parse_winning_line().expect("line"), None);
}

#[test]
fn test_save_round_writes_log_and_totals() {
    let (_db, repo) = setup_test_db();
    let stats = SessionStats::from_counts(0, 0, 1);
    let record = repo
        .save_round(&stats, &finished(RoundState::Draw, 9))
        .expect("Save failed");
    assert_eq!(record.outcome(), "draw");
    assert_eq!(repo.round_count().expect("Count failed"), 1);
    assert_eq!(repo.load_totals().expect("Load failed"), stats);
}

#[test]
fn test_save_round_keeps_neither_when_totals_fail() {
    let (_db, repo) = setup_test_db();
    let too_large = SessionStats::from_counts(u32::MAX, 0, 0);
    let result = repo.save_round(
        &too_large,
        &finished(RoundState::Won(Player::X, WinningLine::ROW_0), 5),
    );
    assert!(result.is_err());
    assert_eq!(repo.round_count().expect("Count failed"), 0);
    assert_eq!(repo.load_totals().expect("Load failed"), SessionStats::new());
}

#[test]
fn test_load_rejects_counters_summing_past_u32() {
    let (db, repo) = setup_test_db();
    let mut conn = SqliteConnection::establish(db.path().to_str().expect("Invalid path"))
        .expect("Connect failed");
    diesel::sql_query(
        "INSERT INTO session_stats (id, games_played, x_wins, o_wins, draws) \
         VALUES (1, 2147483647, 2147483647, 2147483647, 2147483647)",
    )
    .execute(&mut conn)
    .expect("Insert failed");

    let err = repo.load_totals().unwrap_err();
    assert!(err.message.contains("overflow"));
}

#[test]
fn test_clear_removes_everything() {
    let (_db, repo) = setup_test_db();
    repo.save_totals(&SessionStats::from_counts(1, 1, 1))
        .expect("Save failed");
    repo.record_round(&finished(RoundState::Draw, 9))
        .expect("Record failed");

    repo.clear().expect("Clear failed");
    assert_eq!(repo.load_totals().expect("Load failed"), SessionStats::new());
    assert!(repo.recent_rounds(10).expect("Query failed").is_empty());
}

#[test]
fn test_open_bad_path_fails() {
    let result = StatsRepository::open("/nonexistent-dir/for/tictac.db");
    assert!(result.is_err());
}
