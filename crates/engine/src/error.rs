use thiserror::Error;

use crate::config::ConfigError;
use crate::core::BoardError;

/// Why a swap request was turned down. Rejected swaps never touch the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SwapRejected {
    #[error("cannot swap a tile with itself")]
    SameCell,
    #[error("tiles are not orthogonally adjacent")]
    NotAdjacent,
    #[error("coordinate is outside the play area")]
    OutsidePlayArea,
    #[error("slot is empty")]
    EmptyCell,
    #[error("board is busy resolving a move")]
    Busy,
}

impl SwapRejected {
    pub fn code(self) -> &'static str {
        match self {
            SwapRejected::Busy => "busy",
            SwapRejected::SameCell
            | SwapRejected::NotAdjacent
            | SwapRejected::OutsidePlayArea
            | SwapRejected::EmptyCell => "invalid_swap",
        }
    }
}

/// Engine failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Rejected(#[from] SwapRejected),
    #[error("a cascade is already resolving")]
    CascadeInProgress,
    #[error("match set is empty")]
    NothingToResolve,
}

impl EngineError {
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::Board(e) => e.code(),
            EngineError::Config(_) => "invalid_config",
            EngineError::Rejected(e) => e.code(),
            EngineError::CascadeInProgress => "busy",
            EngineError::NothingToResolve => "no_match",
        }
    }
}
