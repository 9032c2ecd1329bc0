//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core rules, async adapter, host applications).
//!
//! # Board Geometry
//!
//! A board is `width` columns by `2 * visible_height` rows:
//!
//! - Row 0 is the bottom of the play area; rows grow upward.
//! - Rows `[0, visible_height)` are the visible play area.
//! - Rows `[visible_height, 2 * visible_height)` are the hidden spawn queue that
//!   feeds each column from above.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Suggested host tick interval (~60 FPS) |
//! | `SETTLE_DELAY_MS` | 500 | Pause between cascade rounds |
//! | `MOVE_DURATION_MS` | 500 | Default duration of one animated tile move |
//!
//! # Examples
//!
//! ```
//! use match_three_types::{Coord, TileKind, DEFAULT_WIDTH};
//!
//! let kind = TileKind::from_symbol('c').unwrap();
//! assert_eq!(kind, TileKind::new(2));
//! assert_eq!(kind.symbol(), 'C');
//!
//! let c = Coord::new(2, 3);
//! assert_eq!(c.offset(-1, 0), Coord::new(1, 3));
//! assert!(c.is_adjacent(Coord::new(2, 4)));
//!
//! assert_eq!(DEFAULT_WIDTH, 8);
//! ```

/// Default board width in columns
pub const DEFAULT_WIDTH: u16 = 8;

/// Default visible board height in rows (the spawn queue doubles the storage)
pub const DEFAULT_VISIBLE_HEIGHT: u16 = 8;

/// Default number of tile kinds in play
pub const DEFAULT_KIND_COUNT: u8 = 5;

/// Minimum number of kinds that keeps a fresh fill match-free
pub const MIN_KIND_COUNT: u8 = 3;

/// Maximum number of tile kinds (one symbol per kind, `A` through `P`)
pub const MAX_KINDS: usize = 16;

/// Largest width or visible height a board may have
pub const MAX_DIMENSION: u16 = 64;

/// Suggested host tick interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Pause between cascade rounds so falling tiles can finish visually
pub const SETTLE_DELAY_MS: u32 = 500;

/// Default duration of one animated tile move
pub const MOVE_DURATION_MS: u32 = 500;

/// Points awarded per tile queued for refill
pub const SCORE_PER_TILE: u32 = 100;


/// A board coordinate: `x` is the column, `y` the row (row 0 at the bottom).
///
/// Components are signed so that neighbour arithmetic such as `x - 2` never
/// underflows; negative coordinates are simply absent from every board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Coord {
    pub x: i16,
    pub y: i16,
}

impl Coord {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// Coordinate shifted by `(dx, dy)`
    pub const fn offset(self, dx: i16, dy: i16) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Manhattan distance between two coordinates
    pub fn distance(self, other: Coord) -> u32 {
        u32::from(self.x.abs_diff(other.x)) + u32::from(self.y.abs_diff(other.y))
    }

    /// True when the two coordinates share an edge.
    ///
    /// A coordinate is not adjacent to itself.
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.distance(other) == 1
    }
}

impl From<(i16, i16)> for Coord {
    fn from((x, y): (i16, i16)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Opaque tile kind identifier.
///
/// Only identity matters to the rules; hosts map kinds to sprites or colours.
/// Each kind has a one-letter symbol used by text layouts (`A` is kind 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileKind(u8);

impl TileKind {
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u8 {
        self.0
    }

    /// Upper-case letter for this kind (`A` for kind 0)
    pub fn symbol(self) -> char {
        char::from(b'A'.saturating_add(self.0))
    }

    /// Parse a kind from its symbol (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use match_three_types::TileKind;
    ///
    /// assert_eq!(TileKind::from_symbol('a'), Some(TileKind::new(0)));
    /// assert_eq!(TileKind::from_symbol('P'), Some(TileKind::new(15)));
    /// assert_eq!(TileKind::from_symbol('z'), None);
    /// ```
    pub fn from_symbol(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        if !upper.is_ascii_uppercase() {
            return None;
        }
        let id = upper as u8 - b'A';
        if (id as usize) < MAX_KINDS {
            Some(Self(id))
        } else {
            None
        }
    }
}

/// Stable identity of a tile object, kept across relocations and recycling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(pub u32);

/// A placed tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub id: TileId,
    pub kind: TileKind,
}

impl Tile {
    pub const fn new(id: TileId, kind: TileKind) -> Self {
        Self { id, kind }
    }
}

/// A board slot: `None` when empty.
pub type Cell = Option<Tile>;

/// Why a tile left the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemovalReason {
    /// Cleared by a match; the tile object re-enters the spawn queue.
    Recycled,
    /// Removed for good (board reset).
    Destroyed,
}

impl RemovalReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemovalReason::Recycled => "recycled",
            RemovalReason::Destroyed => "destroyed",
        }
    }
}

/// Cascade phase as seen by input collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Board is stable; swaps may start.
    #[default]
    Idle,
    /// A cascade is running; `round` counts from 1.
    Resolving { round: u32 },
}

impl Phase {
    pub fn is_idle(&self) -> bool {
        matches!(self, Phase::Idle)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Resolving { .. } => "resolving",
        }
    }
}

/// Engine-side notification delivered to subscribers.
///
/// Payloads are plain data; subscribers observe and never feed back into the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// A tile left the board.
    TileRemoved {
        tile: Tile,
        coord: Coord,
        reason: RemovalReason,
    },
    /// A removed tile was re-kinded and staged in a spawn queue slot.
    TileQueued { tile: Tile, slot: Coord },
    /// Two tiles exchanged places.
    Swapped { a: Coord, b: Coord },
    /// A swap that produced no match was put back.
    SwapReverted { a: Coord, b: Coord },
    /// One remove/fall/refill round finished.
    RoundResolved { round: u32, cleared: u32, fallen: u32 },
    /// The cascade ended with a match-free board.
    Settled { rounds: u32, cleared: u32 },
    /// Score changed after a round.
    ScoreChanged { score: u32 },
}
