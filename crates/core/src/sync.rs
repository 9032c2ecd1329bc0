//! Move synchronization - the seam to whatever animates tiles
//!
//! The board updates its slots immediately; only the visual position of a tile
//! lags behind. Every `Board::set` hands the placement to a [`MoveSync`]
//! collaborator, which answers with a [`MoveToken`] the engine can poll before
//! reading state that depends on the move having finished.

use crate::types::{Coord, Tile, TileId};

/// Handle for one relocation's animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveToken {
    /// Nothing to wait for.
    Done,
    /// Animation in flight; poll [`MoveSync::is_complete`].
    Pending(u32),
}

/// Animation collaborator invoked once per placement.
pub trait MoveSync {
    /// Called after `tile` has been stored at `to`.
    fn on_place(&mut self, tile: Tile, to: Coord) -> MoveToken;

    /// Whether the move behind `token` has finished.
    fn is_complete(&self, token: MoveToken) -> bool {
        matches!(token, MoveToken::Done)
    }

    /// True when no move is in flight.
    fn all_complete(&self) -> bool {
        true
    }

    /// Let host time pass.
    fn advance(&mut self, _elapsed_ms: u32) {}

    /// Finish every move in flight at once.
    fn finish_all(&mut self) {}
}

/// Snaps tiles into place; every token is already complete.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateSync;

impl MoveSync for ImmediateSync {
    fn on_place(&mut self, _tile: Tile, _to: Coord) -> MoveToken {
        MoveToken::Done
    }
}

/// Records every placement in order; handy for tests and replays.
#[derive(Debug, Clone, Default)]
pub struct RecordingSync {
    moves: Vec<(TileId, Coord)>,
}

impl RecordingSync {
    pub fn moves(&self) -> &[(TileId, Coord)] {
        &self.moves
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }
}

impl MoveSync for RecordingSync {
    fn on_place(&mut self, tile: Tile, to: Coord) -> MoveToken {
        self.moves.push((tile.id, to));
        MoveToken::Done
    }
}

impl<S: MoveSync + ?Sized> MoveSync for Box<S> {
    fn on_place(&mut self, tile: Tile, to: Coord) -> MoveToken {
        (**self).on_place(tile, to)
    }

    fn is_complete(&self, token: MoveToken) -> bool {
        (**self).is_complete(token)
    }

    fn all_complete(&self) -> bool {
        (**self).all_complete()
    }

    fn advance(&mut self, elapsed_ms: u32) {
        (**self).advance(elapsed_ms)
    }
}
