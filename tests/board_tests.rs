//! Board tests - slot access, spawn queue, and removal notifications

use match_three::core::{Board, BoardError, RecordingSync};
use match_three::types::{Coord, Tile, TileId, TileKind};

fn tile(id: u32, kind: u8) -> Tile {
    Tile::new(TileId(id), TileKind::new(kind))
}

#[test]
fn test_board_new_empty() {
    let board = Board::new(4, 3).unwrap();
    assert_eq!(board.size(), (4, 3));
    assert_eq!(board.total_height(), 6);

    for x in 0..4 {
        for y in 0..6 {
            let c = Coord::new(x, y);
            assert!(board.contains(c), "{} should be stored", c);
            assert!(!board.has(c));
            assert_eq!(board.get(c), None);
        }
    }
    assert!(!board.is_full());
}

#[test]
fn test_board_out_of_bounds_is_absent() {
    let mut board = Board::new(3, 3).unwrap();

    for c in [
        Coord::new(-1, 0),
        Coord::new(0, -1),
        Coord::new(3, 0),
        Coord::new(0, 6),
    ] {
        assert!(!board.contains(c));
        assert_eq!(board.get(c), None);
        assert!(!board.has(c));
        assert_eq!(board.remove(c), None);
        assert!(!board.put(c, tile(0, 0)));
    }
    assert!(board.take_removals().is_empty());
}

#[test]
fn test_board_rejects_bad_sizes() {
    assert!(matches!(Board::new(0, 4), Err(BoardError::InvalidSize { .. })));
    assert!(matches!(Board::new(4, 0), Err(BoardError::InvalidSize { .. })));
}

#[test]
fn test_set_notifies_sync_once_per_placement() {
    let mut board = Board::new(3, 3).unwrap();
    let mut sync = RecordingSync::default();

    board.set(Coord::new(1, 1), tile(7, 2), &mut sync);
    board.set(Coord::new(2, 0), tile(8, 1), &mut sync);

    assert_eq!(
        sync.moves(),
        &[(TileId(7), Coord::new(1, 1)), (TileId(8), Coord::new(2, 0))]
    );
    assert_eq!(board.kind_at(Coord::new(1, 1)), Some(TileKind::new(2)));
}

#[test]
fn test_remove_records_notifications_in_order() {
    let mut board = Board::from_pattern(&["AB", "CD"]).unwrap();

    let first = board.remove(Coord::new(0, 0)).unwrap();
    let second = board.remove(Coord::new(1, 1)).unwrap();
    assert_eq!(board.remove(Coord::new(0, 0)), None);

    let removals = board.take_removals();
    assert_eq!(removals.len(), 2);
    assert_eq!((removals[0].tile, removals[0].coord), (first, Coord::new(0, 0)));
    assert_eq!((removals[1].tile, removals[1].coord), (second, Coord::new(1, 1)));
    assert!(board.take_removals().is_empty());
}

#[test]
fn test_spawn_queue_fills_bottom_up_until_full() {
    let mut board = Board::new(2, 2).unwrap();

    assert_eq!(board.enqueue(1, tile(1, 0)), Ok(Coord::new(1, 2)));
    assert_eq!(board.enqueue(1, tile(2, 0)), Ok(Coord::new(1, 3)));
    assert_eq!(board.queued_in_column(1), 2);
    assert_eq!(board.queued_in_column(0), 0);

    assert_eq!(
        board.enqueue(1, tile(3, 0)),
        Err(BoardError::SpawnQueueFull { column: 1 })
    );
    // queued tiles are stored but not visible
    assert!(!board.is_visible(Coord::new(1, 2)));
    assert!(board.has(Coord::new(1, 2)));
}

#[test]
fn test_pattern_round_trip() {
    let rows = ["AB.C", "DDAB", "CABD"];
    let board = Board::from_pattern(&rows).unwrap();
    assert_eq!(board.to_pattern(), rows.to_vec());
    assert_eq!(board.kind_at(Coord::new(0, 0)), TileKind::from_symbol('C'));
    assert_eq!(board.kind_at(Coord::new(2, 2)), None);
}
