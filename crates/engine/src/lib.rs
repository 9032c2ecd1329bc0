//! Engine module - turns swaps and elapsed time into board changes
//!
//! The rules live in `match-three-core`; this crate sequences them:
//!
//! - [`swap`]: validate and apply a swap, scan once
//! - [`cascade`]: remove, recycle, fall, wait, rescan until stable
//! - [`session`]: the single writer owning board, timers, score, and input state
//! - [`motion`]: tick-driven move animation tracker
//! - [`events`]: subscriber fan-out for engine notifications
//!
//! Nothing here performs I/O. Hosts observe the engine through [`EventBus`]
//! subscribers and [`GameSnapshot`]s.

pub mod cascade;
pub mod config;
pub mod error;
pub mod events;
pub mod motion;
pub mod selection;
pub mod session;
pub mod snapshot;
pub mod swap;

pub use match_three_core as core;
pub use match_three_types as types;

pub use cascade::{CascadeContext, CascadeResolver, CascadeSummary, Progress, RoundReport};
pub use config::{ConfigError, EngineConfig};
pub use error::{EngineError, SwapRejected};
pub use events::EventBus;
pub use motion::TimedSync;
pub use selection::Selection;
pub use session::{Session, SwapOutcome};
pub use snapshot::GameSnapshot;
pub use swap::{revert_swap, try_swap, validate_swap, SwapAttempt};
