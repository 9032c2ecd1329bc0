//! Scoring module - points for cleared tiles and session counters
//!
//! Every tile removed by a cascade and queued for refill is worth a flat amount
//! (`SCORE_PER_TILE` by default). Chain length is tracked for display only;
//! it does not multiply the score.

use crate::types::SCORE_PER_TILE;

/// Score calculation result for one cascade round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Tiles credited this round.
    pub tiles: u32,
    pub total: u32,
}

/// Points for `tiles` cleared tiles at `per_tile` points each
pub fn calculate_clear_score(tiles: u32, per_tile: u32) -> ScoreResult {
    ScoreResult {
        tiles,
        total: tiles.saturating_mul(per_tile),
    }
}

/// Running totals for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBoard {
    per_tile: u32,
    score: u32,
    tiles_cleared: u32,
    swaps: u32,
    rounds: u32,
    best_chain: u32,
}

impl ScoreBoard {
    pub fn new(per_tile: u32) -> Self {
        Self {
            per_tile,
            score: 0,
            tiles_cleared: 0,
            swaps: 0,
            rounds: 0,
            best_chain: 0,
        }
    }

    /// Credit one cascade round; `chain` is the round number within its cascade
    pub fn record_round(&mut self, tiles: u32, chain: u32) -> ScoreResult {
        let result = calculate_clear_score(tiles, self.per_tile);
        self.score = self.score.saturating_add(result.total);
        self.tiles_cleared = self.tiles_cleared.saturating_add(tiles);
        self.rounds += 1;
        self.best_chain = self.best_chain.max(chain);
        result
    }

    /// Count a committed swap
    pub fn record_swap(&mut self) {
        self.swaps += 1;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn tiles_cleared(&self) -> u32 {
        self.tiles_cleared
    }

    pub fn swaps(&self) -> u32 {
        self.swaps
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn best_chain(&self) -> u32 {
        self.best_chain
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new(SCORE_PER_TILE)
    }
}
