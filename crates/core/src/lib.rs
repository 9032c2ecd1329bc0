//! Core rules module - pure, deterministic, and testable
//!
//! This crate contains the board and every rule that reads or rewrites it.
//! It has **no dependencies** on timing, rendering, or I/O, which makes it:
//!
//! - **Deterministic**: the same seed and swaps always produce the same boards
//! - **Testable**: every rule works on plain boards built from text layouts
//! - **Portable**: usable from a synchronous game loop or an async actor
//!
//! # Module Structure
//!
//! - [`board`]: play area plus hidden spawn queue, bounds-checked access
//! - [`matches`]: full-board scan for runs of three or more
//! - [`gravity`]: column compaction that pulls queued tiles into view
//! - [`assign`]: kind selection that never completes a run with placed neighbours
//! - [`sync`]: the animation seam invoked on every placement
//! - [`hint`]: legal-swap search
//! - [`rng`]: seeded LCG
//! - [`scoring`]: per-tile points and session counters
//! - [`snapshot`]: plain-data board copies with a content hash
//!
//! # Example
//!
//! ```
//! use match_three_core::{find_matches, gravity, Board, ImmediateSync};
//! use match_three_core::types::Coord;
//!
//! // Column 0 bottom-to-top: A, A, A, B
//! let mut board = Board::from_pattern(&["BCDC", "ADCD", "ACDC", "ADCD"]).unwrap();
//! let matched = find_matches(&board);
//! assert_eq!(matched.len(), 3);
//!
//! for coord in matched.iter() {
//!     board.remove(coord);
//! }
//! gravity::collapse(&mut board, &mut ImmediateSync, &mut Vec::new());
//! assert_eq!(board.to_pattern()[3], "BDCD");
//! ```

pub mod assign;
pub mod board;
pub mod gravity;
pub mod hint;
pub mod matches;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod sync;

pub use match_three_types as types;

// Re-export commonly used types for convenience
pub use assign::TypeAssigner;
pub use board::{Board, BoardError, Removal};
pub use hint::{find_swap, has_moves};
pub use matches::{find_matches, has_match, MatchSet};
pub use rng::SimpleRng;
pub use scoring::{calculate_clear_score, ScoreBoard, ScoreResult};
pub use snapshot::BoardSnapshot;
pub use sync::{ImmediateSync, MoveSync, MoveToken, RecordingSync};
