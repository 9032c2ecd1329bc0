use crate::core::BoardSnapshot;
use crate::types::{Coord, Phase};

/// Plain-data view of a session for renderers and remote observers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub board: BoardSnapshot,
    pub phase: Phase,
    /// A swap is animating or a cascade is running.
    pub busy: bool,
    pub selected: Option<Coord>,
    pub episode_id: u32,
    pub seed: u32,
    pub score: u32,
    pub tiles_cleared: u32,
    pub swaps: u32,
    pub best_chain: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        !self.busy
    }
}
