//! Match-three rules engine (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so binaries, tests, and
//! benches can write `match_three::{core, engine, adapter, types}`.

pub use match_three_adapter as adapter;
pub use match_three_core as core;
pub use match_three_engine as engine;
pub use match_three_types as types;

pub mod cli;
