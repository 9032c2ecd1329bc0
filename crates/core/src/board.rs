//! Board module - manages the tile grid
//!
//! The board is `width` columns by `2 * visible_height` rows stored as a flat array.
//! Coordinates: (x, y) where x runs left to right and y runs bottom to top.
//! Rows below `visible_height` are the play area; the rows above form the spawn
//! queue that feeds each column from the top.

use thiserror::Error;

use crate::sync::{MoveSync, MoveToken};
use crate::types::{Cell, Coord, Tile, TileId, TileKind, MAX_DIMENSION};

/// Board-level failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board dimensions {width}x{height} are out of range")]
    InvalidSize { width: u16, height: u16 },
    #[error("coordinate {0} is outside the board")]
    OutOfBounds(Coord),
    #[error("spawn queue of column {column} is full")]
    SpawnQueueFull { column: i16 },
    #[error("pattern is empty or has rows of different widths")]
    RaggedPattern,
    #[error("unknown tile symbol {0:?} in pattern")]
    InvalidSymbol(char),
}

impl BoardError {
    pub fn code(self) -> &'static str {
        match self {
            BoardError::InvalidSize { .. } => "invalid_size",
            BoardError::OutOfBounds(_) => "out_of_bounds",
            BoardError::SpawnQueueFull { .. } => "spawn_queue_full",
            BoardError::RaggedPattern | BoardError::InvalidSymbol(_) => "invalid_pattern",
        }
    }
}

/// A removal notification: the tile that left and where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removal {
    pub tile: Tile,
    pub coord: Coord,
}

/// The tile grid, play area plus spawn queue, using flat row-major storage
#[derive(Debug, Clone)]
pub struct Board {
    width: u16,
    visible_height: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
    /// Removal notifications not yet taken by subscribers
    removals: Vec<Removal>,
}

impl Board {
    /// Create an empty board with `width` columns and `visible_height` visible rows
    pub fn new(width: u16, visible_height: u16) -> Result<Self, BoardError> {
        if width == 0
            || visible_height == 0
            || width > MAX_DIMENSION
            || visible_height > MAX_DIMENSION
        {
            return Err(BoardError::InvalidSize {
                width,
                height: visible_height,
            });
        }
        let len = width as usize * visible_height as usize * 2;
        Ok(Self {
            width,
            visible_height,
            cells: vec![None; len],
            removals: Vec::new(),
        })
    }

    /// Calculate flat index from a coordinate
    #[inline(always)]
    fn index(&self, coord: Coord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        Some(coord.y as usize * self.width as usize + coord.x as usize)
    }

    /// (width, visible height)
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.visible_height)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn visible_height(&self) -> u16 {
        self.visible_height
    }

    /// Total stored rows including the spawn queue
    pub fn total_height(&self) -> u16 {
        self.visible_height * 2
    }

    /// Check if a coordinate is stored by this board (play area or spawn queue)
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as u16) < self.width
            && (coord.y as u16) < self.total_height()
    }

    /// Check if a coordinate lies in the visible play area
    pub fn is_visible(&self, coord: Coord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as u16) < self.width
            && (coord.y as u16) < self.visible_height
    }

    /// Tile at `coord`; `None` for empty slots and out-of-range coordinates
    pub fn get(&self, coord: Coord) -> Option<Tile> {
        self.index(coord).and_then(|idx| self.cells[idx])
    }

    /// Kind of the tile at `coord`, if any
    pub fn kind_at(&self, coord: Coord) -> Option<TileKind> {
        self.get(coord).map(|tile| tile.kind)
    }

    /// Check if a slot is in bounds and occupied
    pub fn has(&self, coord: Coord) -> bool {
        self.get(coord).is_some()
    }

    /// Store `tile` at `coord` and let the move-sync collaborator animate it.
    ///
    /// The callback runs exactly once per successful placement and its token is
    /// returned. Out-of-bounds coordinates are a caller bug: debug builds assert,
    /// release builds ignore the write and return `None`.
    pub fn set(&mut self, coord: Coord, tile: Tile, sync: &mut dyn MoveSync) -> Option<MoveToken> {
        debug_assert!(self.contains(coord), "set outside the board at {coord}");
        let idx = self.index(coord)?;
        self.cells[idx] = Some(tile);
        Some(sync.on_place(tile, coord))
    }

    /// Store `tile` at `coord` without invoking any move-sync collaborator.
    ///
    /// Used for staging tiles in the spawn queue, where nothing is visible.
    /// Returns false if out of bounds.
    pub fn put(&mut self, coord: Coord, tile: Tile) -> bool {
        match self.index(coord) {
            Some(idx) => {
                self.cells[idx] = Some(tile);
                true
            }
            None => false,
        }
    }

    /// Clear a slot and record a removal notification for subscribers
    pub fn remove(&mut self, coord: Coord) -> Option<Tile> {
        let tile = self.take(coord)?;
        self.removals.push(Removal { tile, coord });
        Some(tile)
    }

    /// Clear a slot silently; used when a tile is relocated rather than removed
    pub(crate) fn take(&mut self, coord: Coord) -> Option<Tile> {
        let idx = self.index(coord)?;
        self.cells[idx].take()
    }

    /// Drain the pending removal notifications in removal order
    pub fn take_removals(&mut self) -> Vec<Removal> {
        std::mem::take(&mut self.removals)
    }

    /// Take back the most recent removal notification
    pub fn pop_removal(&mut self) -> Option<Removal> {
        self.removals.pop()
    }

    pub fn pending_removals(&self) -> usize {
        self.removals.len()
    }

    /// First free spawn queue slot of a column (lowest queue row first)
    pub fn queue_slot(&self, column: i16) -> Option<Coord> {
        (self.visible_height..self.total_height())
            .map(|y| Coord::new(column, y as i16))
            .find(|&coord| self.contains(coord) && !self.has(coord))
    }

    /// Stage `tile` in the column's spawn queue and return the slot used
    pub fn enqueue(&mut self, column: i16, tile: Tile) -> Result<Coord, BoardError> {
        if column < 0 || column as u16 >= self.width {
            return Err(BoardError::OutOfBounds(Coord::new(column, self.visible_height as i16)));
        }
        let slot = self
            .queue_slot(column)
            .ok_or(BoardError::SpawnQueueFull { column })?;
        self.put(slot, tile);
        Ok(slot)
    }

    /// Number of tiles waiting in a column's spawn queue
    pub fn queued_in_column(&self, column: i16) -> usize {
        (self.visible_height..self.total_height())
            .filter(|&y| self.has(Coord::new(column, y as i16)))
            .count()
    }

    /// Every visible coordinate, column by column, bottom to top
    pub fn visible_coords(&self) -> impl Iterator<Item = Coord> + '_ {
        let height = self.visible_height as i16;
        (0..self.width as i16).flat_map(move |x| (0..height).map(move |y| Coord::new(x, y)))
    }

    /// Check if every visible slot holds a tile
    pub fn is_full(&self) -> bool {
        self.visible_coords().all(|coord| self.has(coord))
    }

    /// Get a reference to the internal cells array (row-major, bottom row first)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Build a board from a text layout of the visible area.
    ///
    /// Rows are given top first, as they read on screen; `A`..`P` are kinds and
    /// `.` is an empty slot. Tile ids are handed out in reading order.
    ///
    /// # Examples
    ///
    /// ```
    /// use match_three_core::{Board, types::{Coord, TileKind}};
    ///
    /// let board = Board::from_pattern(&["B.", "AC"]).unwrap();
    /// assert_eq!(board.size(), (2, 2));
    /// assert_eq!(board.kind_at(Coord::new(0, 1)), Some(TileKind::new(1)));
    /// assert_eq!(board.kind_at(Coord::new(1, 0)), Some(TileKind::new(2)));
    /// assert!(!board.has(Coord::new(1, 1)));
    /// ```
    pub fn from_pattern(rows: &[&str]) -> Result<Self, BoardError> {
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if width == 0 || rows.iter().any(|r| r.chars().count() != width) {
            return Err(BoardError::RaggedPattern);
        }
        let height = u16::try_from(rows.len()).unwrap_or(u16::MAX);
        let mut board = Self::new(u16::try_from(width).unwrap_or(u16::MAX), height)?;

        let mut next_id = 0u32;
        for (row_idx, row) in rows.iter().enumerate() {
            let y = (rows.len() - 1 - row_idx) as i16;
            for (x, c) in row.chars().enumerate() {
                if c == '.' {
                    continue;
                }
                let kind = TileKind::from_symbol(c).ok_or(BoardError::InvalidSymbol(c))?;
                board.put(Coord::new(x as i16, y), Tile::new(TileId(next_id), kind));
                next_id += 1;
            }
        }
        Ok(board)
    }

    /// Render the visible area as text rows, top row first (inverse of `from_pattern`)
    pub fn to_pattern(&self) -> Vec<String> {
        (0..self.visible_height as i16)
            .rev()
            .map(|y| {
                (0..self.width as i16)
                    .map(|x| {
                        self.kind_at(Coord::new(x, y))
                            .map(|k| k.symbol())
                            .unwrap_or('.')
                    })
                    .collect()
            })
            .collect()
    }

    /// Clear the entire board, play area and spawn queue, without notifications
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
        self.removals.clear();
    }
}

/// Boards are equal when they have the same geometry and hold the same tiles;
/// pending removal notifications are not part of the board state.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.visible_height == other.visible_height
            && self.cells == other.cells
    }
}

impl Eq for Board {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::RecordingSync;

    fn tile(id: u32, kind: u8) -> Tile {
        Tile::new(TileId(id), TileKind::new(kind))
    }

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(4, 3).unwrap();
        assert_eq!(board.index(Coord::new(0, 0)), Some(0));
        assert_eq!(board.index(Coord::new(3, 0)), Some(3));
        assert_eq!(board.index(Coord::new(0, 1)), Some(4));
        assert_eq!(board.index(Coord::new(3, 5)), Some(23));
        assert_eq!(board.index(Coord::new(-1, 0)), None);
        assert_eq!(board.index(Coord::new(4, 0)), None);
        assert_eq!(board.index(Coord::new(0, 6)), None);
    }

    #[test]
    fn test_board_rejects_bad_sizes() {
        assert!(Board::new(0, 4).is_err());
        assert!(Board::new(4, 0).is_err());
        assert!(Board::new(MAX_DIMENSION + 1, 4).is_err());
    }

    #[test]
    fn test_set_invokes_sync_once() {
        let mut board = Board::new(3, 3).unwrap();
        let mut sync = RecordingSync::default();

        let token = board.set(Coord::new(1, 2), tile(7, 0), &mut sync);

        assert_eq!(token, Some(MoveToken::Done));
        assert_eq!(sync.moves(), &[(TileId(7), Coord::new(1, 2))]);
        assert_eq!(board.get(Coord::new(1, 2)), Some(tile(7, 0)));
    }

    #[test]
    fn test_put_skips_sync() {
        let mut board = Board::new(3, 3).unwrap();
        assert!(board.put(Coord::new(0, 4), tile(1, 1)));
        assert!(!board.put(Coord::new(0, 6), tile(2, 1)));
        assert!(board.has(Coord::new(0, 4)));
    }

    #[test]
    fn test_remove_records_notification() {
        let mut board = Board::new(3, 3).unwrap();
        board.put(Coord::new(2, 0), tile(3, 2));

        assert_eq!(board.remove(Coord::new(2, 0)), Some(tile(3, 2)));
        assert_eq!(board.remove(Coord::new(2, 0)), None);
        assert_eq!(board.remove(Coord::new(9, 9)), None);

        let removals = board.take_removals();
        assert_eq!(
            removals,
            vec![Removal {
                tile: tile(3, 2),
                coord: Coord::new(2, 0)
            }]
        );
        assert!(board.take_removals().is_empty());
    }

    #[test]
    fn test_enqueue_fills_queue_bottom_up() {
        let mut board = Board::new(2, 2).unwrap();
        assert_eq!(board.enqueue(1, tile(0, 0)), Ok(Coord::new(1, 2)));
        assert_eq!(board.enqueue(1, tile(1, 0)), Ok(Coord::new(1, 3)));
        assert_eq!(
            board.enqueue(1, tile(2, 0)),
            Err(BoardError::SpawnQueueFull { column: 1 })
        );
        assert_eq!(board.queued_in_column(1), 2);
        assert_eq!(board.queued_in_column(0), 0);
    }

    #[test]
    fn test_pattern_roundtrip() {
        let rows = ["AB.", "CAB", "BCA"];
        let board = Board::from_pattern(&rows).unwrap();
        assert_eq!(board.to_pattern(), rows.to_vec());
    }

    #[test]
    fn test_pattern_rejects_ragged_rows() {
        assert_eq!(Board::from_pattern(&["AB", "A"]), Err(BoardError::RaggedPattern));
        assert_eq!(Board::from_pattern(&[]), Err(BoardError::RaggedPattern));
        assert_eq!(Board::from_pattern(&["A?"]), Err(BoardError::InvalidSymbol('?')));
    }

    #[test]
    fn test_equality_ignores_pending_removals() {
        let mut a = Board::from_pattern(&["AB"]).unwrap();
        let b = a.clone();
        let removed = a.remove(Coord::new(0, 0)).unwrap();
        a.put(Coord::new(0, 0), removed);
        assert_eq!(a, b);
    }

    #[test]
    fn test_pop_removal_leaves_earlier_notifications() {
        let mut board = Board::from_pattern(&["ABC"]).unwrap();
        let first = board.remove(Coord::new(0, 0)).unwrap();
        let second = board.remove(Coord::new(2, 0)).unwrap();

        let popped = board.pop_removal().unwrap();
        assert_eq!((popped.tile, popped.coord), (second, Coord::new(2, 0)));
        assert_eq!(board.pending_removals(), 1);
        assert_eq!(board.take_removals()[0].tile, first);
        assert_eq!(board.pop_removal(), None);
    }
}
