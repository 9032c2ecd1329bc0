//! Session tests - swaps, reverts, timing and observation through the public API

use std::sync::{Arc, Mutex};

use match_three::core::{find_matches, Board, ImmediateSync, RecordingSync};
use match_three::engine::{
    revert_swap, try_swap, EngineConfig, EngineError, Session, SwapOutcome, SwapRejected,
};
use match_three::types::{Coord, EngineEvent, Phase};

fn c(x: i16, y: i16) -> Coord {
    Coord::new(x, y)
}

/// Swapping (1,1) with (1,2) lines up three A's on the middle row.
const MIDDLE_ROW: [&str; 3] = ["BAC", "ACA", "CBB"];

#[test]
fn test_non_adjacent_swap_leaves_board_unchanged() {
    let mut board = Board::from_pattern(&MIDDLE_ROW).unwrap();
    let before = board.clone();
    let mut sync = RecordingSync::default();

    for (a, b) in [(c(0, 0), c(2, 0)), (c(0, 0), c(1, 1)), (c(1, 1), c(1, 1))] {
        assert!(try_swap(&mut board, a, b, &mut sync).is_err());
    }
    assert_eq!(board, before);
    assert!(sync.moves().is_empty());
}

#[test]
fn test_swap_then_revert_restores_board() {
    let mut board = Board::from_pattern(&["AB", "CD"]).unwrap();
    let before = board.clone();
    let mut sync = RecordingSync::default();

    let attempt = try_swap(&mut board, c(0, 0), c(1, 0), &mut sync).unwrap();
    assert!(!attempt.is_productive());
    assert_eq!(board.to_pattern(), vec!["AB", "DC"]);

    revert_swap(&mut board, &attempt, &mut sync);
    assert_eq!(board, before);
    // two moves out, two moves back
    assert_eq!(sync.moves().len(), 4);
}

#[test]
fn test_productive_swap_reports_matches() {
    let mut board = Board::from_pattern(&MIDDLE_ROW).unwrap();
    let attempt = try_swap(&mut board, c(1, 1), c(1, 2), &mut ImmediateSync).unwrap();

    assert!(attempt.is_productive());
    assert_eq!(attempt.matches, find_matches(&board));
    assert!(attempt.matches.contains(c(0, 1)));
    assert!(attempt.matches.contains(c(1, 1)));
    assert!(attempt.matches.contains(c(2, 1)));
}

#[test]
fn test_unproductive_session_swap_is_identity() {
    let board = Board::from_pattern(&MIDDLE_ROW).unwrap();
    let mut session = Session::with_board(EngineConfig::immediate(), board.clone()).unwrap();
    let rx = session.event_channel();

    let outcome = session.try_swap(c(0, 0), c(1, 0)).unwrap();
    session.settle().unwrap();

    assert_eq!(outcome, SwapOutcome::NoMatch);
    assert_eq!(session.board(), &board);
    assert!(session.is_idle());
    assert_eq!(session.score(), 0);
    let events: Vec<_> = rx.try_iter().collect();
    assert_eq!(
        events,
        vec![
            EngineEvent::Swapped { a: c(0, 0), b: c(1, 0) },
            EngineEvent::SwapReverted { a: c(0, 0), b: c(1, 0) },
        ]
    );
}

#[test]
fn test_timed_swap_runs_to_stable_board() {
    let board = Board::from_pattern(&MIDDLE_ROW).unwrap();
    let mut session = Session::with_board(EngineConfig::default(), board).unwrap();

    let outcome = session.try_swap(c(1, 1), c(1, 2)).unwrap();
    assert!(outcome.is_match());
    assert!(!session.is_idle());
    assert_eq!(session.phase(), Phase::Idle);

    // Nothing resolves until the swap animation finishes
    assert!(!session.tick(400).unwrap());
    assert_eq!(session.score(), 0);
    assert!(session.tick(100).unwrap());
    assert!(matches!(session.phase(), Phase::Resolving { round: 1 }));
    assert_eq!(session.score(), 300);

    let mut guard = 0;
    while !session.is_idle() {
        session.tick(50).unwrap();
        guard += 1;
        assert!(guard < 1000, "cascade never settled");
    }

    assert!(session.board().is_full());
    assert!(find_matches(session.board()).is_empty());
    assert_eq!(session.scoreboard().swaps(), 1);
    assert!(session.score() >= 300);
}

#[test]
fn test_removed_tile_stays_gone_after_cascade() {
    let mut board = Board::from_pattern(&MIDDLE_ROW).unwrap();
    let gone = board.remove(c(2, 2)).unwrap();
    let mut session = Session::with_board(EngineConfig::immediate(), board).unwrap();
    let rx = session.event_channel();

    session.try_swap(c(1, 1), c(1, 2)).unwrap();
    session.settle().unwrap();

    let events: Vec<_> = rx.try_iter().collect();
    let mut removed = 0;
    for event in &events {
        if let EngineEvent::TileRemoved { tile, .. } = event {
            assert_ne!(tile.id, gone.id, "removed tile reported again");
            removed += 1;
        }
    }
    let queued = events
        .iter()
        .filter(|e| matches!(e, EngineEvent::TileQueued { .. }))
        .count();
    assert_eq!(removed, queued);
    assert_eq!(queued as u32, session.snapshot().tiles_cleared);
    assert!(session
        .board()
        .cells()
        .iter()
        .flatten()
        .all(|t| t.id != gone.id));
}

#[test]
fn test_busy_session_rejects_input() {
    let board = Board::from_pattern(&MIDDLE_ROW).unwrap();
    let mut session = Session::with_board(EngineConfig::default(), board).unwrap();
    session.try_swap(c(1, 1), c(1, 2)).unwrap();
    let before = session.board().clone();

    let err = session.try_swap(c(0, 0), c(1, 0)).unwrap_err();
    assert_eq!(err, EngineError::Rejected(SwapRejected::Busy));
    assert_eq!(err.code(), "busy");
    assert_eq!(session.click(c(0, 0)), Err(EngineError::Rejected(SwapRejected::Busy)));
    assert_eq!(session.board(), &before);
}

#[test]
fn test_subscriber_sees_score_changes() {
    let board = Board::from_pattern(&MIDDLE_ROW).unwrap();
    let mut session = Session::with_board(EngineConfig::immediate(), board).unwrap();
    let scores = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&scores);
    session.subscribe(move |event| {
        if let EngineEvent::ScoreChanged { score } = event {
            sink.lock().unwrap().push(*score);
        }
    });

    session.try_swap(c(1, 1), c(1, 2)).unwrap();
    session.settle().unwrap();

    let scores = scores.lock().unwrap();
    assert_eq!(scores.first(), Some(&300));
    assert_eq!(scores.last(), Some(&session.score()));
    assert!(scores.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_click_pairs_drive_swaps() {
    let board = Board::from_pattern(&MIDDLE_ROW).unwrap();
    let mut session = Session::with_board(EngineConfig::immediate(), board).unwrap();

    assert_eq!(session.click(c(1, 1)).unwrap(), None);
    assert_eq!(session.snapshot().selected, Some(c(1, 1)));
    let outcome = session.click(c(1, 2)).unwrap().unwrap();
    assert!(outcome.is_match());
    assert_eq!(session.snapshot().selected, None);
}

#[test]
fn test_same_seed_same_board() {
    let a = Session::new(EngineConfig::immediate().with_seed(21)).unwrap();
    let b = Session::new(EngineConfig::immediate().with_seed(21)).unwrap();
    let other = Session::new(EngineConfig::immediate().with_seed(22)).unwrap();

    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(a.snapshot().board.board_hash, b.snapshot().board.board_hash);
    assert_ne!(a.board().to_pattern(), other.board().to_pattern());
}

#[test]
fn test_restart_resets_counters() {
    let mut session = Session::new(EngineConfig::immediate().with_seed(8)).unwrap();
    if let Some((a, b)) = session.hint() {
        session.try_swap(a, b).unwrap();
        session.settle().unwrap();
        assert!(session.score() > 0);
    }

    session.restart();
    let snap = session.snapshot();
    assert_eq!(snap.episode_id, 1);
    assert_eq!((snap.score, snap.swaps, snap.tiles_cleared), (0, 0, 0));
    assert!(session.board().is_full());
    assert!(find_matches(session.board()).is_empty());
}
