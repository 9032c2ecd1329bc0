//! Adapter module - drive a session from async code or a JSON line stream
//!
//! The engine runs as a tokio actor ([`spawn_engine`]) that owns the session
//! and ticks it while a swap or cascade is in progress. Hosts talk to it
//! through an [`EngineHandle`] and watch published snapshots.
//!
//! # Protocol Overview
//!
//! For out-of-process drivers the adapter defines a **line-delimited JSON
//! protocol**:
//!
//! ## Client → Engine
//!
//! - **command**: `swap` (`a`, `b`), `click` (`at`), `restart`, `hint`, `snapshot`
//!
//! ## Engine → Client
//!
//! - **ack**: command accepted; carries the swap result or hint when relevant
//! - **observation**: full session snapshot (board rows, score, phase, hash)
//! - **error**: rejected command with a code and message
//!
//! # Environment Variables
//!
//! - `MATCH3_MAX_PENDING`: request channel capacity (default: 10)
//! - `MATCH3_LOG_PATH`: append every published observation to this file
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Engine: {"type":"command","seq":1,"action":"hint"}
//! Engine -> Client: {"type":"ack","seq":1,"ts":1234567890,"status":"ok","hint":[[2,3],[3,3]]}
//! Client -> Engine: {"type":"command","seq":2,"action":"swap","a":[2,3],"b":[3,3]}
//! Engine -> Client: {"type":"ack","seq":2,"ts":1234567891,"status":"ok","result":"matched","matched":[[3,1],[3,2],[3,3]]}
//! Engine -> Client: {"type":"observation","seq":3,"ts":1234567892,"phase":"idle",...}
//! ```

pub mod protocol;
pub mod runtime;

pub use match_three_engine as engine;
pub use match_three_types as types;

// Re-export protocol types for convenience
pub use protocol::*;
pub use runtime::{
    spawn_engine, spawn_session, AdapterConfig, EngineCommand, EngineHandle, EngineReply, WireLog,
};
