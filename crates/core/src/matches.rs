//! Match detection - finds every tile that belongs to a run of three or more
//!
//! One pass over the play area: each tile looks two slots to the left and two
//! slots down. A run of length n is reported by each of its n-2 rightmost (or
//! topmost) tiles, so every member of a longer run ends up in the set.

use std::collections::BTreeSet;

use crate::board::Board;
use crate::types::{Coord, TileKind};

/// Set of matched coordinates, ordered by column then row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    coords: BTreeSet<Coord>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, coord: Coord) -> bool {
        self.coords.insert(coord)
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.coords.contains(&coord)
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coords.iter().copied()
    }

    /// Merge another set into this one
    pub fn extend(&mut self, other: &MatchSet) {
        self.coords.extend(other.iter());
    }
}

impl FromIterator<Coord> for MatchSet {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        Self {
            coords: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for MatchSet {
    type Item = Coord;
    type IntoIter = std::collections::btree_set::IntoIter<Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.coords.into_iter()
    }
}

/// Kind shared by the tiles at `a` and `b`, if both exist and agree
#[inline]
fn pair_kind(board: &Board, a: Coord, b: Coord) -> Option<TileKind> {
    let ka = board.kind_at(a)?;
    let kb = board.kind_at(b)?;
    (ka == kb).then_some(ka)
}

/// Kind shared by the two tiles left of `coord`, if any
pub fn left_pair_kind(board: &Board, coord: Coord) -> Option<TileKind> {
    pair_kind(board, coord.offset(-1, 0), coord.offset(-2, 0))
}

/// Kind shared by the two tiles below `coord`, if any
pub fn down_pair_kind(board: &Board, coord: Coord) -> Option<TileKind> {
    pair_kind(board, coord.offset(0, -1), coord.offset(0, -2))
}

/// Scan the play area and return every coordinate that belongs to a run
pub fn find_matches(board: &Board) -> MatchSet {
    let mut matched = MatchSet::new();

    for coord in board.visible_coords() {
        let Some(kind) = board.kind_at(coord) else {
            continue;
        };

        if left_pair_kind(board, coord) == Some(kind) {
            matched.insert(coord);
            matched.insert(coord.offset(-1, 0));
            matched.insert(coord.offset(-2, 0));
        }
        if down_pair_kind(board, coord) == Some(kind) {
            matched.insert(coord);
            matched.insert(coord.offset(0, -1));
            matched.insert(coord.offset(0, -2));
        }
    }

    matched
}

/// Check whether the play area holds any run, stopping at the first one
pub fn has_match(board: &Board) -> bool {
    board.visible_coords().any(|coord| {
        board.kind_at(coord).is_some_and(|kind| {
            left_pair_kind(board, coord) == Some(kind) || down_pair_kind(board, coord) == Some(kind)
        })
    })
}
