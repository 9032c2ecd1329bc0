//! Engine actor
//!
//! A single tokio task owns the [`Session`] and is the only writer of its
//! board. Callers talk to it through an [`EngineHandle`]: requests travel over
//! a bounded channel and are answered on a oneshot; every state change is
//! published as a [`GameSnapshot`] on a `watch` channel. While the session is
//! busy the task ticks it every `tick_ms`.

use std::time::Duration;

use anyhow::anyhow;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::MissedTickBehavior;

use crate::engine::{EngineConfig, EngineError, GameSnapshot, Session, SwapOutcome};
use crate::protocol::{build_observation, create_error, ErrorCode};
use crate::types::{Coord, TICK_MS};

/// Adapter configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    pub max_pending_commands: usize,
    pub tick_ms: u32,
    /// Append every published observation to this file as JSON lines.
    pub log_path: Option<String>,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            max_pending_commands: 10,
            tick_ms: TICK_MS,
            log_path: None,
        }
    }
}

impl AdapterConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        use std::env;

        let max_pending_commands = env::var("MATCH3_MAX_PENDING")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        let log_path = env::var("MATCH3_LOG_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            max_pending_commands,
            tick_ms: TICK_MS,
            log_path,
        }
    }
}

/// Request payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCommand {
    Swap { a: Coord, b: Coord },
    Click(Coord),
    Restart,
    Hint,
    Snapshot,
}

/// Answer to a successful request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineReply {
    Swap(SwapOutcome),
    Click(Option<SwapOutcome>),
    Restarted,
    Hint(Option<(Coord, Coord)>),
    Snapshot(GameSnapshot),
}

struct Request {
    command: EngineCommand,
    reply: oneshot::Sender<Result<EngineReply, EngineError>>,
}

/// Cloneable handle to a running engine actor.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<Request>,
    observations: watch::Receiver<GameSnapshot>,
}

impl EngineHandle {
    /// Send a command and wait for the answer.
    ///
    /// Engine rejections come back as an [`EngineError`] inside the
    /// `anyhow::Error`; use `downcast_ref` to inspect them.
    pub async fn request(&self, command: EngineCommand) -> anyhow::Result<EngineReply> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Request { command, reply })
            .await
            .map_err(|_| anyhow!("engine task has stopped"))?;
        let result = rx.await.map_err(|_| anyhow!("engine task dropped the request"))?;
        Ok(result?)
    }

    pub async fn swap(&self, a: Coord, b: Coord) -> anyhow::Result<SwapOutcome> {
        match self.request(EngineCommand::Swap { a, b }).await? {
            EngineReply::Swap(outcome) => Ok(outcome),
            other => Err(anyhow!("unexpected reply to swap: {other:?}")),
        }
    }

    pub async fn click(&self, at: Coord) -> anyhow::Result<Option<SwapOutcome>> {
        match self.request(EngineCommand::Click(at)).await? {
            EngineReply::Click(outcome) => Ok(outcome),
            other => Err(anyhow!("unexpected reply to click: {other:?}")),
        }
    }

    pub async fn restart(&self) -> anyhow::Result<()> {
        self.request(EngineCommand::Restart).await.map(|_| ())
    }

    pub async fn hint(&self) -> anyhow::Result<Option<(Coord, Coord)>> {
        match self.request(EngineCommand::Hint).await? {
            EngineReply::Hint(hint) => Ok(hint),
            other => Err(anyhow!("unexpected reply to hint: {other:?}")),
        }
    }

    pub async fn snapshot(&self) -> anyhow::Result<GameSnapshot> {
        match self.request(EngineCommand::Snapshot).await? {
            EngineReply::Snapshot(snap) => Ok(snap),
            other => Err(anyhow!("unexpected reply to snapshot: {other:?}")),
        }
    }

    /// Most recently published snapshot
    pub fn latest(&self) -> GameSnapshot {
        self.observations.borrow().clone()
    }

    pub fn observations(&self) -> watch::Receiver<GameSnapshot> {
        self.observations.clone()
    }

    /// Wait until a published snapshot shows an idle board
    pub async fn wait_idle(&self) -> anyhow::Result<GameSnapshot> {
        let mut rx = self.observations.clone();
        let snap = rx
            .wait_for(|s| !s.busy)
            .await
            .map_err(|_| anyhow!("engine task has stopped"))?;
        Ok((*snap).clone())
    }
}

/// Build a session from `config` and run it on the current tokio runtime
pub fn spawn_engine(config: EngineConfig, adapter: AdapterConfig) -> anyhow::Result<EngineHandle> {
    let session = Session::new(config)?;
    Ok(spawn_session(session, adapter))
}

/// Run an already-built session as an actor
pub fn spawn_session(session: Session, adapter: AdapterConfig) -> EngineHandle {
    let (tx, rx) = mpsc::channel::<Request>(adapter.max_pending_commands.max(1));
    let (obs_tx, obs_rx) = watch::channel(session.snapshot());
    let wire_log = adapter.log_path.clone().map(WireLog::open);

    tokio::spawn(run_engine(session, rx, obs_tx, wire_log, adapter.tick_ms.max(1)));

    EngineHandle {
        tx,
        observations: obs_rx,
    }
}

async fn run_engine(
    mut session: Session,
    mut rx: mpsc::Receiver<Request>,
    obs_tx: watch::Sender<GameSnapshot>,
    wire_log: Option<WireLog>,
    tick_ms: u32,
) {
    let mut ticker = tokio::time::interval(Duration::from_millis(tick_ms as u64));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut seq = 0u64;
    let mut publish = |session: &Session| {
        let snap = session.snapshot();
        seq += 1;
        if let Some(log) = wire_log.as_ref() {
            log.record(&build_observation(&snap, seq));
        }
        obs_tx.send_replace(snap);
    };

    loop {
        tokio::select! {
            req = rx.recv() => {
                let Some(Request { command, reply }) = req else {
                    break;
                };
                let result = apply(&mut session, command);
                publish(&session);
                let _ = reply.send(result);
            }
            _ = ticker.tick(), if !session.is_idle() => {
                match session.tick(tick_ms) {
                    Ok(changed) => {
                        if changed || session.is_idle() {
                            publish(&session);
                        }
                    }
                    Err(err) => {
                        recover(&mut session, &err, wire_log.as_ref());
                        publish(&session);
                    }
                }
            }
        }
    }
}

/// Deal a fresh board after a failed tick, logging the reason
fn recover(session: &mut Session, err: &EngineError, wire_log: Option<&WireLog>) {
    if let Some(log) = wire_log {
        let message = format!("board reset: {err}");
        log.record(&create_error(0, ErrorCode::from_engine(err), &message));
    }
    session.restart();
}

fn apply(session: &mut Session, command: EngineCommand) -> Result<EngineReply, EngineError> {
    match command {
        EngineCommand::Swap { a, b } => session.try_swap(a, b).map(EngineReply::Swap),
        EngineCommand::Click(at) => session.click(at).map(EngineReply::Click),
        EngineCommand::Restart => {
            session.restart();
            Ok(EngineReply::Restarted)
        }
        EngineCommand::Hint => Ok(EngineReply::Hint(session.hint())),
        EngineCommand::Snapshot => Ok(EngineReply::Snapshot(session.snapshot())),
    }
}

/// JSON-lines file sink fed by a dedicated writer task
#[derive(Debug, Clone)]
pub struct WireLog {
    tx: mpsc::UnboundedSender<Vec<u8>>,
}

impl WireLog {
    /// Must be called from within a tokio runtime
    pub fn open(path: String) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Vec<u8>>();
        tokio::spawn(async move {
            use tokio::fs::OpenOptions;
            use tokio::io::AsyncWriteExt;

            let mut file = match OpenOptions::new().create(true).append(true).open(&path).await {
                Ok(f) => f,
                Err(_) => return,
            };
            while let Some(mut line) = rx.recv().await {
                line.push(b'\n');
                if file.write_all(&line).await.is_err() {
                    break;
                }
            }
            let _ = file.flush().await;
        });
        Self { tx }
    }

    pub fn record<T: Serialize>(&self, msg: &T) {
        if let Ok(bytes) = serde_json::to_vec(msg) {
            let _ = self.tx.send(bytes);
        }
    }
}
