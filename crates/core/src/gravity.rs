//! Gravity - compacts columns after matched tiles are removed
//!
//! For a column, the lowest contiguous run of empty visible slots is found and
//! every tile above it (spawn queue included) moves down by the run length,
//! keeping its order. This repeats until the column has no gap that a tile
//! above could fill.

use crate::board::Board;
use crate::sync::{MoveSync, MoveToken};
use crate::types::Coord;

/// Lowest run of empty visible slots in a column as `(first_row, length)`
pub fn lowest_gap(board: &Board, x: i16) -> Option<(i16, i16)> {
    let height = board.visible_height() as i16;
    let start = (0..height).find(|&y| !board.has(Coord::new(x, y)))?;
    let len = (start..height)
        .take_while(|&y| !board.has(Coord::new(x, y)))
        .count() as i16;
    Some((start, len))
}

/// Compact one column; returns the number of tile moves performed.
///
/// Every move goes through `Board::set`, so the sync collaborator sees each
/// fall. Tokens of pending moves are appended to `tokens`.
pub fn collapse_column(
    board: &mut Board,
    x: i16,
    sync: &mut dyn MoveSync,
    tokens: &mut Vec<MoveToken>,
) -> u32 {
    let total = board.total_height() as i16;
    let mut moves = 0u32;

    while let Some((start, len)) = lowest_gap(board, x) {
        let mut moved = false;
        for y in (start + len)..total {
            let from = Coord::new(x, y);
            let Some(tile) = board.take(from) else {
                continue;
            };
            if let Some(token) = board.set(Coord::new(x, y - len), tile, sync) {
                if token != MoveToken::Done {
                    tokens.push(token);
                }
            }
            moves += 1;
            moved = true;
        }
        if !moved {
            break;
        }
    }

    moves
}

/// Compact every column; returns the total number of tile moves
pub fn collapse(board: &mut Board, sync: &mut dyn MoveSync, tokens: &mut Vec<MoveToken>) -> u32 {
    (0..board.width() as i16)
        .map(|x| collapse_column(board, x, sync, tokens))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::{ImmediateSync, RecordingSync};
    use crate::types::{Tile, TileId, TileKind};

    fn column(board: &Board, x: i16) -> Vec<Option<u32>> {
        (0..board.total_height() as i16)
            .map(|y| board.get(Coord::new(x, y)).map(|t| t.id.0))
            .collect()
    }

    #[test]
    fn test_lowest_gap() {
        let board = Board::from_pattern(&["A", ".", ".", "B", "."]).unwrap();
        assert_eq!(lowest_gap(&board, 0), Some((0, 1)));

        let board = Board::from_pattern(&["A", ".", ".", "B"]).unwrap();
        assert_eq!(lowest_gap(&board, 0), Some((1, 2)));

        let board = Board::from_pattern(&["A", "B"]).unwrap();
        assert_eq!(lowest_gap(&board, 0), None);
    }

    #[test]
    fn test_column_falls_and_keeps_order() {
        // ids in reading order: top A=0, B=1, C=2 at the bottom
        let mut board = Board::from_pattern(&["A", ".", "B", ".", "C"]).unwrap();
        let mut tokens = Vec::new();

        let moves = collapse_column(&mut board, 0, &mut ImmediateSync, &mut tokens);

        assert_eq!(moves, 3);
        assert_eq!(
            column(&board, 0),
            vec![Some(2), Some(1), Some(0), None, None, None, None, None, None, None]
        );
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_queue_tiles_fill_the_play_area() {
        let mut board = Board::from_pattern(&[".", ".", "C"]).unwrap();
        board
            .enqueue(0, Tile::new(TileId(10), TileKind::new(0)))
            .unwrap();
        board
            .enqueue(0, Tile::new(TileId(11), TileKind::new(1)))
            .unwrap();
        let mut sync = RecordingSync::default();
        let mut tokens = Vec::new();

        collapse(&mut board, &mut sync, &mut tokens);

        assert_eq!(
            column(&board, 0),
            vec![Some(0), Some(10), Some(11), None, None, None]
        );
        assert_eq!(
            sync.moves(),
            &[(TileId(10), Coord::new(0, 1)), (TileId(11), Coord::new(0, 2))]
        );
    }

    #[test]
    fn test_gap_without_tiles_above_stays_open() {
        let mut board = Board::from_pattern(&[".", "A"]).unwrap();
        let moves = collapse(&mut board, &mut ImmediateSync, &mut Vec::new());
        assert_eq!(moves, 0);
        assert!(!board.has(Coord::new(0, 1)));
    }
}
