//! Engine configuration
//!
//! Defaults come from the shared constants; `from_env` lets a host override
//! any of them without recompiling:
//!
//! - `MATCH3_WIDTH`, `MATCH3_HEIGHT`: board size (visible rows)
//! - `MATCH3_KINDS`: number of tile kinds
//! - `MATCH3_SEED`: RNG seed
//! - `MATCH3_SETTLE_MS`: pause between cascade rounds
//! - `MATCH3_MOVE_MS`: duration of one animated move

use thiserror::Error;

use crate::types::{
    DEFAULT_KIND_COUNT, DEFAULT_VISIBLE_HEIGHT, DEFAULT_WIDTH, MAX_DIMENSION, MAX_KINDS,
    MIN_KIND_COUNT, MOVE_DURATION_MS, SCORE_PER_TILE, SETTLE_DELAY_MS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board size {width}x{height} must be between 1 and {max}")]
    BadSize { width: u16, height: u16, max: u16 },
    #[error("{got} tile kinds configured, need {min} to {max}")]
    BadKindCount { got: u8, min: u8, max: u8 },
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub width: u16,
    pub visible_height: u16,
    pub kinds: u8,
    pub seed: u32,
    pub settle_delay_ms: u32,
    pub move_duration_ms: u32,
    pub score_per_tile: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            visible_height: DEFAULT_VISIBLE_HEIGHT,
            kinds: DEFAULT_KIND_COUNT,
            seed: 1,
            settle_delay_ms: SETTLE_DELAY_MS,
            move_duration_ms: MOVE_DURATION_MS,
            score_per_tile: SCORE_PER_TILE,
        }
    }
}

impl EngineConfig {
    /// Defaults with every delay removed: swaps settle before returning.
    pub fn immediate() -> Self {
        Self {
            settle_delay_ms: 0,
            move_duration_ms: 0,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_size(mut self, width: u16, visible_height: u16) -> Self {
        self.width = width;
        self.visible_height = visible_height;
        self
    }

    pub fn with_kinds(mut self, kinds: u8) -> Self {
        self.kinds = kinds;
        self
    }

    /// Create from environment variables, falling back to the defaults
    pub fn from_env() -> Self {
        use std::env;

        fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
            env::var(key).ok().and_then(|s| s.trim().parse().ok())
        }

        let d = Self::default();
        Self {
            width: parsed("MATCH3_WIDTH").unwrap_or(d.width),
            visible_height: parsed("MATCH3_HEIGHT").unwrap_or(d.visible_height),
            kinds: parsed("MATCH3_KINDS").unwrap_or(d.kinds),
            seed: parsed("MATCH3_SEED").unwrap_or(d.seed),
            settle_delay_ms: parsed("MATCH3_SETTLE_MS").unwrap_or(d.settle_delay_ms),
            move_duration_ms: parsed("MATCH3_MOVE_MS").unwrap_or(d.move_duration_ms),
            score_per_tile: d.score_per_tile,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let size_ok = |v: u16| (1..=MAX_DIMENSION).contains(&v);
        if !size_ok(self.width) || !size_ok(self.visible_height) {
            return Err(ConfigError::BadSize {
                width: self.width,
                height: self.visible_height,
                max: MAX_DIMENSION,
            });
        }
        if self.kinds < MIN_KIND_COUNT || self.kinds as usize > MAX_KINDS {
            return Err(ConfigError::BadKindCount {
                got: self.kinds,
                min: MIN_KIND_COUNT,
                max: MAX_KINDS as u8,
            });
        }
        Ok(())
    }
}
