//! Protocol module - JSON message types for driving an engine over a line stream
//!
//! Every message is one JSON object per line with `type`, `seq`, and `ts`
//! (milliseconds since the Unix epoch). Coordinates travel as `[x, y]` arrays
//! with `y` counted from the bottom row.

use serde::{Deserialize, Serialize};

use crate::engine::{EngineError, GameSnapshot, SwapOutcome};
use crate::runtime::EngineCommand;
use crate::types::Coord;

// ============== Client -> Engine Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CommandType {
    #[default]
    #[serde(rename = "command")]
    Command,
}

/// `[x, y]` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoordWire(pub i16, pub i16);

impl From<Coord> for CoordWire {
    fn from(value: Coord) -> Self {
        Self(value.x, value.y)
    }
}

impl From<CoordWire> for Coord {
    fn from(value: CoordWire) -> Self {
        Coord::new(value.0, value.1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandAction {
    Swap,
    Click,
    Restart,
    Hint,
    Snapshot,
}

impl CommandAction {
    pub fn as_str(self) -> &'static str {
        match self {
            CommandAction::Swap => "swap",
            CommandAction::Click => "click",
            CommandAction::Restart => "restart",
            CommandAction::Hint => "hint",
            CommandAction::Snapshot => "snapshot",
        }
    }
}

impl<'de> Deserialize<'de> for CommandAction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        [
            CommandAction::Swap,
            CommandAction::Click,
            CommandAction::Restart,
            CommandAction::Hint,
            CommandAction::Snapshot,
        ]
        .into_iter()
        .find(|a| s.eq_ignore_ascii_case(a.as_str()))
        .ok_or_else(|| serde::de::Error::custom("unknown action"))
    }
}

impl Serialize for CommandAction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Command message
///
/// `swap` needs `a` and `b`; `click` needs `at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: CommandType,
    pub seq: u64,
    #[serde(default)]
    pub ts: u64,
    pub action: CommandAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<CoordWire>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<CoordWire>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<CoordWire>,
}

impl CommandMessage {
    /// Check the fields the action needs and build the engine command
    pub fn to_command(&self) -> Result<EngineCommand, (ErrorCode, String)> {
        let missing = |field: &str| {
            (
                ErrorCode::InvalidCommand,
                format!("{} requires `{}`", self.action.as_str(), field),
            )
        };
        match self.action {
            CommandAction::Swap => {
                let a = self.a.ok_or_else(|| missing("a"))?;
                let b = self.b.ok_or_else(|| missing("b"))?;
                Ok(EngineCommand::Swap {
                    a: a.into(),
                    b: b.into(),
                })
            }
            CommandAction::Click => {
                let at = self.at.ok_or_else(|| missing("at"))?;
                Ok(EngineCommand::Click(at.into()))
            }
            CommandAction::Restart => Ok(EngineCommand::Restart),
            CommandAction::Hint => Ok(EngineCommand::Hint),
            CommandAction::Snapshot => Ok(EngineCommand::Snapshot),
        }
    }
}

/// Parse one inbound line
pub fn parse_command(line: &str) -> Result<CommandMessage, serde_json::Error> {
    serde_json::from_str(line)
}

/// Best-effort `seq` lookup for lines that failed to parse
pub fn extract_seq(line: &str) -> Option<u64> {
    serde_json::from_str::<serde_json::Value>(line)
        .ok()?
        .get("seq")?
        .as_u64()
}

// ============== Engine -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckType {
    #[serde(rename = "ack")]
    Ack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckStatus {
    #[serde(rename = "ok")]
    Ok,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "invalid_command")]
    InvalidCommand,
    #[serde(rename = "invalid_swap")]
    InvalidSwap,
    #[serde(rename = "busy")]
    Busy,
    #[serde(rename = "internal")]
    Internal,
}

impl ErrorCode {
    pub fn from_engine(err: &EngineError) -> Self {
        match err.code() {
            "busy" => ErrorCode::Busy,
            "invalid_swap" => ErrorCode::InvalidSwap,
            _ => ErrorCode::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapResultWire {
    #[serde(rename = "matched")]
    Matched,
    #[serde(rename = "no_match")]
    NoMatch,
}

/// Acknowledgment for a command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckMessage {
    #[serde(rename = "type")]
    pub msg_type: AckType,
    pub seq: u64,
    pub ts: u64,
    pub status: AckStatus,
    /// Swap result for `swap` and completing `click` commands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<SwapResultWire>,
    /// Coordinates matched by the swap.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matched: Vec<CoordWire>,
    /// Suggested swap for `hint`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<[CoordWire; 2]>,
}

/// Error message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub ts: u64,
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    Observation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardWire {
    pub width: u16,
    pub height: u16,
    /// Rows bottom first; 0 is empty, `kind + 1` otherwise.
    pub cells: Vec<Vec<u8>>,
    pub queued: Vec<u8>,
}

/// Stable board content hash, serialized as 16 hex digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateHash(pub u64);

impl Serialize for StateHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!("{:016x}", self.0))
    }
}

impl<'de> Deserialize<'de> for StateHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        u64::from_str_radix(&s, 16)
            .map(StateHash)
            .map_err(|_| serde::de::Error::custom("invalid state hash"))
    }
}

/// Session observation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: ObservationType,
    pub seq: u64,
    pub ts: u64,
    pub playable: bool,
    pub phase: String,
    #[serde(default)]
    pub round: u32,
    pub episode_id: u32,
    pub seed: u32,
    pub score: u32,
    pub tiles_cleared: u32,
    pub swaps: u32,
    pub best_chain: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<CoordWire>,
    pub board: BoardWire,
    pub state_hash: StateHash,
}

// ============== Builders ==============

pub fn create_ack(seq: u64) -> AckMessage {
    AckMessage {
        msg_type: AckType::Ack,
        seq,
        ts: current_timestamp_ms(),
        status: AckStatus::Ok,
        result: None,
        matched: Vec::new(),
        hint: None,
    }
}

pub fn create_swap_ack(seq: u64, outcome: &SwapOutcome) -> AckMessage {
    let mut ack = create_ack(seq);
    match outcome {
        SwapOutcome::Matched(set) => {
            ack.result = Some(SwapResultWire::Matched);
            ack.matched = set.iter().map(CoordWire::from).collect();
        }
        SwapOutcome::NoMatch => ack.result = Some(SwapResultWire::NoMatch),
    }
    ack
}

pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        ts: current_timestamp_ms(),
        code,
        message: message.to_string(),
    }
}

/// Build an observation from a session snapshot
pub fn build_observation(snap: &GameSnapshot, seq: u64) -> ObservationMessage {
    use crate::types::Phase;

    let board = &snap.board;
    let cells = board
        .cells
        .chunks(board.width.max(1) as usize)
        .map(|row| row.to_vec())
        .collect();
    let round = match snap.phase {
        Phase::Idle => 0,
        Phase::Resolving { round } => round,
    };

    ObservationMessage {
        msg_type: ObservationType::Observation,
        seq,
        ts: current_timestamp_ms(),
        playable: snap.playable(),
        phase: snap.phase.as_str().to_string(),
        round,
        episode_id: snap.episode_id,
        seed: snap.seed,
        score: snap.score,
        tiles_cleared: snap.tiles_cleared,
        swaps: snap.swaps,
        best_chain: snap.best_chain,
        selected: snap.selected.map(CoordWire::from),
        board: BoardWire {
            width: board.width,
            height: board.height,
            cells,
            queued: board.queued.clone(),
        },
        state_hash: StateHash(board.board_hash),
    }
}

/// Get current timestamp in milliseconds
pub(crate) fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
