use crate::board::Board;
use crate::types::Coord;

/// FNV-1a 64-bit over a byte stream.
pub fn fnv1a64(bytes: impl IntoIterator<Item = u8>) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}

/// Plain-data copy of the visible play area.
///
/// `cells` is row-major with the bottom row first: `0` is an empty slot and
/// `kind + 1` an occupied one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BoardSnapshot {
    pub width: u16,
    pub height: u16,
    pub cells: Vec<u8>,
    /// Tiles waiting in each column's spawn queue.
    pub queued: Vec<u8>,
    pub board_hash: u64,
}

impl BoardSnapshot {
    pub fn capture(board: &Board) -> Self {
        let mut s = Self::default();
        s.capture_into(board);
        s
    }

    /// Overwrite this snapshot, reusing its buffers
    pub fn capture_into(&mut self, board: &Board) {
        let (width, height) = board.size();
        self.width = width;
        self.height = height;

        self.cells.clear();
        for y in 0..height as i16 {
            for x in 0..width as i16 {
                let v = board
                    .kind_at(Coord::new(x, y))
                    .map(|k| k.id().saturating_add(1))
                    .unwrap_or(0);
                self.cells.push(v);
            }
        }

        self.queued.clear();
        for x in 0..width as i16 {
            self.queued
                .push(u8::try_from(board.queued_in_column(x)).unwrap_or(u8::MAX));
        }

        self.board_hash = fnv1a64(self.cells.iter().copied());
    }

    /// Cell value at `(x, y)`, `None` outside the snapshot
    pub fn cell(&self, x: u16, y: u16) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Text rows, top first, as `Board::to_pattern` renders them
    pub fn rows(&self) -> Vec<String> {
        (0..self.height)
            .rev()
            .map(|y| {
                (0..self.width)
                    .map(|x| match self.cell(x, y) {
                        Some(0) | None => '.',
                        Some(v) => char::from(b'A'.saturating_add(v - 1)),
                    })
                    .collect()
            })
            .collect()
    }
}
