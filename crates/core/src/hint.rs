//! Hints - find a swap that would produce a match
//!
//! Brute force over every right and up neighbour pair of the play area, trying
//! the swap on a scratch copy of the board.

use crate::board::Board;
use crate::matches::has_match;
use crate::types::Coord;

/// Exchange the tiles at `a` and `b` without notifying anyone.
///
/// Returns false (and leaves the board alone) unless both slots hold a tile.
pub(crate) fn exchange(board: &mut Board, a: Coord, b: Coord) -> bool {
    let (Some(ta), Some(tb)) = (board.get(a), board.get(b)) else {
        return false;
    };
    board.put(a, tb);
    board.put(b, ta);
    true
}

/// First swap in scan order (column by column, bottom to top) that creates a match
pub fn find_swap(board: &Board) -> Option<(Coord, Coord)> {
    let mut scratch = board.clone();
    for a in board.visible_coords() {
        for b in [a.offset(1, 0), a.offset(0, 1)] {
            if !board.is_visible(b) {
                continue;
            }
            if !exchange(&mut scratch, a, b) {
                continue;
            }
            let found = has_match(&scratch);
            exchange(&mut scratch, a, b);
            if found {
                return Some((a, b));
            }
        }
    }
    None
}

/// Check whether any legal swap exists
pub fn has_moves(board: &Board) -> bool {
    find_swap(board).is_some()
}
