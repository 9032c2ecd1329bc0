//! Kind assignment - picks kinds for new tiles without completing a run
//!
//! Only the two already-placed neighbours to the left and the two below are
//! consulted. Filling a board column by column, bottom to top, therefore
//! never creates a match, because every neighbour looked at already exists.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::matches::{down_pair_kind, left_pair_kind};
use crate::rng::SimpleRng;
use crate::types::{Coord, TileKind, MAX_KINDS};

/// Chooses kinds for freshly placed and recycled tiles
#[derive(Debug, Clone)]
pub struct TypeAssigner {
    kinds: ArrayVec<TileKind, MAX_KINDS>,
    rng: SimpleRng,
}

impl TypeAssigner {
    /// Assigner over kinds `0..count` (clamped to `1..=MAX_KINDS`)
    pub fn new(count: u8, seed: u32) -> Self {
        let count = (count as usize).clamp(1, MAX_KINDS);
        Self {
            kinds: (0..count as u8).map(TileKind::new).collect(),
            rng: SimpleRng::new(seed),
        }
    }

    /// Assigner over an explicit candidate list (duplicates and overflow dropped)
    pub fn with_kinds(kinds: &[TileKind], seed: u32) -> Self {
        let mut unique: ArrayVec<TileKind, MAX_KINDS> = ArrayVec::new();
        for &kind in kinds {
            if !unique.contains(&kind) && !unique.is_full() {
                unique.push(kind);
            }
        }
        if unique.is_empty() {
            unique.push(TileKind::new(0));
        }
        Self {
            kinds: unique,
            rng: SimpleRng::new(seed),
        }
    }

    pub fn kinds(&self) -> &[TileKind] {
        &self.kinds
    }

    /// Candidate kinds for `coord`: every kind minus the left pair's and the down pair's
    pub fn candidates(&self, board: &Board, coord: Coord) -> ArrayVec<TileKind, MAX_KINDS> {
        let left = left_pair_kind(board, coord);
        let down = down_pair_kind(board, coord);
        self.kinds
            .iter()
            .copied()
            .filter(|&kind| Some(kind) != left && Some(kind) != down)
            .collect()
    }

    /// Pick a kind for `coord` uniformly among the candidates.
    ///
    /// With fewer than three kinds both filters can exclude everything; the
    /// full kind list is used then.
    pub fn choose(&mut self, board: &Board, coord: Coord) -> TileKind {
        let candidates = self.candidates(board, coord);
        let pool: &[TileKind] = if candidates.is_empty() {
            &self.kinds
        } else {
            &candidates
        };
        self.rng
            .pick(pool)
            .copied()
            .unwrap_or_else(|| TileKind::new(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matches::has_match;
    use crate::types::{Tile, TileId};

    #[test]
    fn test_left_pair_kind_is_excluded() {
        let board = Board::from_pattern(&["....", "AA.."]).unwrap();
        let assigner = TypeAssigner::new(3, 1);
        let candidates = assigner.candidates(&board, Coord::new(2, 0));
        assert!(!candidates.contains(&TileKind::new(0)));
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn test_both_filters_apply_independently() {
        let board = Board::from_pattern(&["...", "B..", "BAA", "..."]).unwrap();
        // Column 0 bottom-to-top: ., B, B, .
        let assigner = TypeAssigner::new(4, 1);
        let at = Coord::new(0, 3);
        let candidates = assigner.candidates(&board, at);
        assert!(!candidates.contains(&TileKind::new(1)));
        assert_eq!(candidates.len(), 3);

        let board = Board::from_pattern(&["BAA.", "...B", "...B"]).unwrap();
        let candidates = assigner.candidates(&board, Coord::new(3, 2));
        assert!(!candidates.contains(&TileKind::new(0)));
        assert!(!candidates.contains(&TileKind::new(1)));
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn test_choose_never_returns_excluded_kind() {
        let board = Board::from_pattern(&["...", "AA."]).unwrap();
        let mut assigner = TypeAssigner::new(3, 99);
        for _ in 0..200 {
            assert_ne!(assigner.choose(&board, Coord::new(2, 0)), TileKind::new(0));
        }
    }

    #[test]
    fn test_two_kinds_fall_back_to_full_set() {
        let board = Board::from_pattern(&["AA.", "..B", "..B"]).unwrap();
        let mut assigner = TypeAssigner::new(2, 5);
        let at = Coord::new(2, 2);
        assert!(assigner.candidates(&board, at).is_empty());
        let kind = assigner.choose(&board, at);
        assert!(kind.id() < 2);
    }

    #[test]
    fn test_fill_order_produces_match_free_board() {
        for seed in 1..50 {
            let mut board = Board::new(8, 8).unwrap();
            let mut assigner = TypeAssigner::new(3, seed);
            let mut id = 0;
            for x in 0..8 {
                for y in 0..8 {
                    let coord = Coord::new(x, y);
                    let kind = assigner.choose(&board, coord);
                    board.put(coord, Tile::new(TileId(id), kind));
                    id += 1;
                }
            }
            assert!(!has_match(&board), "seed {} produced a match", seed);
        }
    }

    #[test]
    fn test_with_kinds_dedups() {
        let kinds = [TileKind::new(4), TileKind::new(4), TileKind::new(2)];
        let assigner = TypeAssigner::with_kinds(&kinds, 1);
        assert_eq!(assigner.kinds(), &[TileKind::new(4), TileKind::new(2)]);
        assert_eq!(TypeAssigner::with_kinds(&[], 1).kinds().len(), 1);
    }
}
