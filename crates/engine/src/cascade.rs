//! Cascade resolution
//!
//! One round removes every matched tile, recycles it into its column's spawn
//! queue with a freshly chosen kind, then lets gravity pull columns down.
//! Between rounds the resolver waits for the settle delay and for every move it
//! started to finish, then rescans. The cascade ends on the first match-free
//! scan, returning the phase to `Idle`.
//!
//! Hosts drive the timed path with [`CascadeResolver::tick`] and
//! [`CascadeResolver::poll`]; [`CascadeResolver::resolve`] runs the same rounds
//! back to back.

use crate::core::{find_matches, gravity, MatchSet, MoveSync, MoveToken, TypeAssigner};
use crate::core::{Board, BoardError};
use crate::error::EngineError;
use crate::events::EventBus;
use crate::types::{EngineEvent, Phase, RemovalReason, Tile};

/// Collaborators a round needs besides the board.
pub struct CascadeContext<'a> {
    pub assigner: &'a mut TypeAssigner,
    pub sync: &'a mut dyn MoveSync,
    pub events: &'a mut EventBus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoundReport {
    /// 1-based index within the cascade.
    pub round: u32,
    pub cleared: u32,
    pub fallen: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CascadeSummary {
    pub rounds: u32,
    pub cleared: u32,
}

/// What a poll did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// No cascade running.
    Idle,
    /// Settle delay or moves still outstanding.
    Waiting,
    /// Another round ran.
    Round(RoundReport),
    /// The rescan came back empty; the phase is `Idle` again.
    Settled(CascadeSummary),
}

#[derive(Debug, Clone)]
pub struct CascadeResolver {
    phase: Phase,
    settle_delay_ms: u32,
    settle_remaining_ms: u32,
    summary: CascadeSummary,
    pending: Vec<MoveToken>,
}

impl CascadeResolver {
    pub fn new(settle_delay_ms: u32) -> Self {
        Self {
            phase: Phase::Idle,
            settle_delay_ms,
            settle_remaining_ms: 0,
            summary: CascadeSummary::default(),
            pending: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase.is_idle()
    }

    pub fn settle_remaining_ms(&self) -> u32 {
        self.settle_remaining_ms
    }

    /// Moves from the last round that have not reported completion yet
    pub fn pending_moves(&self) -> usize {
        self.pending.len()
    }

    /// Start a cascade with `matches` and run its first round.
    ///
    /// Fails with `CascadeInProgress` unless idle; the board is untouched then.
    pub fn begin(
        &mut self,
        board: &mut Board,
        matches: &MatchSet,
        ctx: &mut CascadeContext<'_>,
    ) -> Result<RoundReport, EngineError> {
        if !self.is_idle() {
            return Err(EngineError::CascadeInProgress);
        }
        if matches.is_empty() {
            return Err(EngineError::NothingToResolve);
        }
        self.summary = CascadeSummary::default();
        self.phase = Phase::Resolving { round: 0 };
        self.guarded_round(board, matches, ctx)
    }

    /// Count down the settle delay
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.settle_remaining_ms = self.settle_remaining_ms.saturating_sub(elapsed_ms);
    }

    /// Drop the settle delay and stop waiting on outstanding moves
    pub fn skip_wait(&mut self) {
        self.settle_remaining_ms = 0;
        self.pending.clear();
    }

    /// Advance the cascade if the wait is over: rescan, then either run the
    /// next round or settle.
    pub fn poll(
        &mut self,
        board: &mut Board,
        ctx: &mut CascadeContext<'_>,
    ) -> Result<Progress, EngineError> {
        if self.is_idle() {
            return Ok(Progress::Idle);
        }
        if self.settle_remaining_ms > 0 {
            return Ok(Progress::Waiting);
        }
        let sync = &*ctx.sync;
        self.pending.retain(|&token| !sync.is_complete(token));
        if !self.pending.is_empty() {
            return Ok(Progress::Waiting);
        }

        let matches = find_matches(board);
        if matches.is_empty() {
            let summary = self.summary;
            self.reset();
            ctx.events.emit(EngineEvent::Settled {
                rounds: summary.rounds,
                cleared: summary.cleared,
            });
            return Ok(Progress::Settled(summary));
        }
        self.guarded_round(board, &matches, ctx).map(Progress::Round)
    }

    /// Resolve `matches` and every follow-up cascade without waiting.
    ///
    /// An empty set is a no-op.
    pub fn resolve(
        &mut self,
        board: &mut Board,
        matches: &MatchSet,
        ctx: &mut CascadeContext<'_>,
    ) -> Result<CascadeSummary, EngineError> {
        if !self.is_idle() {
            return Err(EngineError::CascadeInProgress);
        }
        if matches.is_empty() {
            return Ok(CascadeSummary::default());
        }
        self.begin(board, matches, ctx)?;
        loop {
            self.skip_wait();
            if let Progress::Settled(summary) = self.poll(board, ctx)? {
                return Ok(summary);
            }
        }
    }

    /// Abandon any cascade in progress
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.settle_remaining_ms = 0;
        self.pending.clear();
        self.summary = CascadeSummary::default();
    }

    fn guarded_round(
        &mut self,
        board: &mut Board,
        matches: &MatchSet,
        ctx: &mut CascadeContext<'_>,
    ) -> Result<RoundReport, EngineError> {
        let result = self.run_round(board, matches, ctx);
        if result.is_err() {
            self.reset();
        }
        result
    }

    fn run_round(
        &mut self,
        board: &mut Board,
        matches: &MatchSet,
        ctx: &mut CascadeContext<'_>,
    ) -> Result<RoundReport, EngineError> {
        let round = match self.phase {
            Phase::Resolving { round } => round + 1,
            Phase::Idle => 1,
        };
        self.phase = Phase::Resolving { round };

        let mut cleared = 0u32;
        for coord in matches.iter() {
            let Some(tile) = board.remove(coord) else {
                continue;
            };
            // Reported as an engine event instead; older notifications stay queued.
            board.pop_removal();
            ctx.events.emit(EngineEvent::TileRemoved {
                tile,
                coord,
                reason: RemovalReason::Recycled,
            });
            recycle(board, tile, coord.x, ctx)?;
            cleared += 1;
        }

        let fallen = gravity::collapse(board, &mut *ctx.sync, &mut self.pending);

        self.settle_remaining_ms = self.settle_delay_ms;
        self.summary.rounds = round;
        self.summary.cleared += cleared;

        ctx.events.emit(EngineEvent::RoundResolved {
            round,
            cleared,
            fallen,
        });
        Ok(RoundReport {
            round,
            cleared,
            fallen,
        })
    }
}

/// Re-kind a removed tile for its queue slot and stage it there.
fn recycle(
    board: &mut Board,
    tile: Tile,
    column: i16,
    ctx: &mut CascadeContext<'_>,
) -> Result<(), EngineError> {
    let slot = board
        .queue_slot(column)
        .ok_or(BoardError::SpawnQueueFull { column })?;
    let kind = ctx.assigner.choose(board, slot);
    let tile = Tile { kind, ..tile };
    let slot = board.enqueue(column, tile)?;
    ctx.events.emit(EngineEvent::TileQueued { tile, slot });
    Ok(())
}
