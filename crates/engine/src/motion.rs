use crate::core::{MoveSync, MoveToken};
use crate::types::{Coord, Tile};

/// Fixed-duration move tracker driven by host ticks.
///
/// Every placement starts a move lasting `duration_ms`; a duration of zero
/// completes moves on the spot.
#[derive(Debug, Clone, Default)]
pub struct TimedSync {
    duration_ms: u32,
    next_handle: u32,
    /// (handle, remaining ms)
    in_flight: Vec<(u32, u32)>,
}

impl TimedSync {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            ..Self::default()
        }
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Longest remaining move, 0 when nothing is moving
    pub fn remaining_ms(&self) -> u32 {
        self.in_flight.iter().map(|&(_, ms)| ms).max().unwrap_or(0)
    }
}

impl MoveSync for TimedSync {
    fn on_place(&mut self, _tile: Tile, _to: Coord) -> MoveToken {
        if self.duration_ms == 0 {
            return MoveToken::Done;
        }
        let handle = self.next_handle;
        self.next_handle = self.next_handle.wrapping_add(1);
        self.in_flight.push((handle, self.duration_ms));
        MoveToken::Pending(handle)
    }

    fn is_complete(&self, token: MoveToken) -> bool {
        match token {
            MoveToken::Done => true,
            MoveToken::Pending(handle) => !self.in_flight.iter().any(|&(h, _)| h == handle),
        }
    }

    fn all_complete(&self) -> bool {
        self.in_flight.is_empty()
    }

    fn advance(&mut self, elapsed_ms: u32) {
        for (_, remaining) in self.in_flight.iter_mut() {
            *remaining = remaining.saturating_sub(elapsed_ms);
        }
        self.in_flight.retain(|&(_, remaining)| remaining > 0);
    }

    fn finish_all(&mut self) {
        self.in_flight.clear();
    }
}
