//! Session - one board plus everything that acts on it
//!
//! The session owns the board and is its only writer. Input arrives as swaps
//! or clicks and is honoured only while the board is idle; time arrives via
//! [`Session::tick`], which finishes swap animations, reverts unproductive
//! swaps, and steps the cascade.

use std::sync::mpsc;

use crate::cascade::{CascadeContext, CascadeResolver, Progress, RoundReport};
use crate::config::EngineConfig;
use crate::core::{find_swap, Board, MatchSet, MoveSync, MoveToken};
use crate::core::{ScoreBoard, TypeAssigner};
use crate::error::{EngineError, SwapRejected};
use crate::events::EventBus;
use crate::motion::TimedSync;
use crate::selection::Selection;
use crate::snapshot::GameSnapshot;
use crate::swap::{self, SwapAttempt};
use crate::types::{Coord, EngineEvent, Phase, RemovalReason, Tile, TileId};

/// Immediate result of an accepted swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The swap lined up at least one run; a cascade starts once the swap
    /// animation completes.
    Matched(MatchSet),
    /// Nothing lined up; the tiles go back once the swap animation completes.
    NoMatch,
}

impl SwapOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, SwapOutcome::Matched(_))
    }
}

pub struct Session {
    config: EngineConfig,
    board: Board,
    assigner: TypeAssigner,
    sync: Box<dyn MoveSync + Send>,
    events: EventBus,
    cascade: CascadeResolver,
    selection: Selection,
    in_flight: Option<SwapAttempt>,
    reverting: [MoveToken; 2],
    score: ScoreBoard,
    next_tile_id: u32,
    episode_id: u32,
}

impl Session {
    /// Validated config, filled match-free board, moves timed by `move_duration_ms`
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let sync = Box::new(TimedSync::new(config.move_duration_ms));
        Self::with_sync(config, sync)
    }

    /// Like [`Session::new`] with a host-provided animation collaborator
    pub fn with_sync(
        config: EngineConfig,
        sync: Box<dyn MoveSync + Send>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let board = Board::new(config.width, config.visible_height)?;
        let mut session = Self::assemble(config, board, sync);
        session.fill();
        Ok(session)
    }

    /// Start from an existing board instead of a random fill; the config's
    /// size is replaced by the board's. Removal notifications still pending on
    /// `board` are dropped.
    pub fn with_board(mut config: EngineConfig, mut board: Board) -> Result<Self, EngineError> {
        let (width, height) = board.size();
        config.width = width;
        config.visible_height = height;
        config.validate()?;
        board.take_removals();
        let sync = Box::new(TimedSync::new(config.move_duration_ms));
        let mut session = Self::assemble(config, board, sync);
        session.next_tile_id = session
            .board
            .cells()
            .iter()
            .flatten()
            .map(|t| t.id.0.saturating_add(1))
            .max()
            .unwrap_or(0);
        Ok(session)
    }

    fn assemble(config: EngineConfig, board: Board, sync: Box<dyn MoveSync + Send>) -> Self {
        Self {
            assigner: TypeAssigner::new(config.kinds, config.seed),
            cascade: CascadeResolver::new(config.settle_delay_ms),
            score: ScoreBoard::new(config.score_per_tile),
            events: EventBus::new(),
            selection: Selection::default(),
            in_flight: None,
            reverting: [MoveToken::Done; 2],
            next_tile_id: 0,
            episode_id: 0,
            config,
            board,
            sync,
        }
    }

    /// Populate every empty visible slot, column by column, bottom to top
    fn fill(&mut self) {
        let coords: Vec<Coord> = self.board.visible_coords().collect();
        for coord in coords {
            if self.board.has(coord) {
                continue;
            }
            let kind = self.assigner.choose(&self.board, coord);
            let tile = Tile::new(TileId(self.next_tile_id), kind);
            self.next_tile_id = self.next_tile_id.wrapping_add(1);
            self.board.set(coord, tile, &mut *self.sync);
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.cascade.phase()
    }

    /// No swap animating or reverting and no cascade running
    pub fn is_idle(&self) -> bool {
        self.cascade.is_idle()
            && self.in_flight.is_none()
            && self.reverting.iter().all(|&t| self.sync.is_complete(t))
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn scoreboard(&self) -> &ScoreBoard {
        &self.score
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn subscribe<F>(&mut self, f: F)
    where
        F: FnMut(&EngineEvent) + Send + 'static,
    {
        self.events.subscribe(f);
    }

    pub fn event_channel(&mut self) -> mpsc::Receiver<EngineEvent> {
        self.events.channel()
    }

    /// A swap that would produce a match, if any
    pub fn hint(&self) -> Option<(Coord, Coord)> {
        find_swap(&self.board)
    }

    pub fn has_moves(&self) -> bool {
        self.hint().is_some()
    }

    /// Swap two adjacent tiles.
    ///
    /// Rejected requests (busy board, non-adjacent or empty slots) leave the
    /// board unchanged.
    pub fn try_swap(&mut self, a: Coord, b: Coord) -> Result<SwapOutcome, EngineError> {
        if !self.is_idle() {
            return Err(SwapRejected::Busy.into());
        }
        let attempt = swap::try_swap(&mut self.board, a, b, &mut *self.sync)?;
        self.events.emit(EngineEvent::Swapped { a, b });
        self.selection.clear();

        let outcome = if attempt.is_productive() {
            SwapOutcome::Matched(attempt.matches.clone())
        } else {
            SwapOutcome::NoMatch
        };
        self.in_flight = Some(attempt);
        self.advance(false)?;
        Ok(outcome)
    }

    /// Two-click input. Returns the swap outcome once a second, different
    /// tile is clicked; clicks outside the play area are ignored.
    pub fn click(&mut self, coord: Coord) -> Result<Option<SwapOutcome>, EngineError> {
        if !self.is_idle() {
            return Err(SwapRejected::Busy.into());
        }
        if !self.board.is_visible(coord) {
            return Ok(None);
        }
        match self.selection.click(coord) {
            None => Ok(None),
            Some((a, b)) => self.try_swap(a, b).map(Some),
        }
    }

    /// Let `elapsed_ms` of host time pass. Returns true if the board changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> Result<bool, EngineError> {
        self.sync.advance(elapsed_ms);
        self.cascade.tick(elapsed_ms);
        self.advance(false)
    }

    /// Finish the current swap and cascade without waiting on time
    pub fn settle(&mut self) -> Result<bool, EngineError> {
        self.sync.finish_all();
        let result = self.advance(true);
        self.sync.finish_all();
        result
    }

    /// Destroy every tile and deal a fresh board
    pub fn restart(&mut self) {
        self.sync.finish_all();
        let (width, _) = self.board.size();
        for x in 0..width as i16 {
            for y in 0..self.board.total_height() as i16 {
                self.board.remove(Coord::new(x, y));
            }
        }
        for removal in self.board.take_removals() {
            self.events.emit(EngineEvent::TileRemoved {
                tile: removal.tile,
                coord: removal.coord,
                reason: RemovalReason::Destroyed,
            });
        }

        self.cascade.reset();
        self.selection.clear();
        self.in_flight = None;
        self.reverting = [MoveToken::Done; 2];
        self.score = ScoreBoard::new(self.config.score_per_tile);
        self.episode_id = self.episode_id.wrapping_add(1);
        self.fill();
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board.capture_into(&self.board);
        out.phase = self.phase();
        out.busy = !self.is_idle();
        out.selected = self.selection.selected();
        out.episode_id = self.episode_id;
        out.seed = self.config.seed;
        out.score = self.score.score();
        out.tiles_cleared = self.score.tiles_cleared();
        out.swaps = self.score.swaps();
        out.best_chain = self.score.best_chain();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    fn advance(&mut self, force: bool) -> Result<bool, EngineError> {
        let mut changed = false;

        if let Some(attempt) = self.in_flight.take() {
            if !force && !attempt.moves_complete(&*self.sync) {
                self.in_flight = Some(attempt);
                return Ok(false);
            }
            changed = true;
            if attempt.is_productive() {
                self.score.record_swap();
                let mut ctx = CascadeContext {
                    assigner: &mut self.assigner,
                    sync: &mut *self.sync,
                    events: &mut self.events,
                };
                let report = self.cascade.begin(&mut self.board, &attempt.matches, &mut ctx)?;
                self.credit(report);
            } else {
                self.reverting = swap::revert_swap(&mut self.board, &attempt, &mut *self.sync);
                self.events.emit(EngineEvent::SwapReverted {
                    a: attempt.a,
                    b: attempt.b,
                });
            }
        }
        if force {
            self.reverting = [MoveToken::Done; 2];
        }

        loop {
            if force {
                self.cascade.skip_wait();
            }
            let mut ctx = CascadeContext {
                assigner: &mut self.assigner,
                sync: &mut *self.sync,
                events: &mut self.events,
            };
            match self.cascade.poll(&mut self.board, &mut ctx)? {
                Progress::Idle | Progress::Waiting => return Ok(changed),
                Progress::Round(report) => {
                    self.credit(report);
                    changed = true;
                }
                Progress::Settled(_) => return Ok(true),
            }
        }
    }

    fn credit(&mut self, report: RoundReport) {
        let result = self.score.record_round(report.cleared, report.round);
        if result.total > 0 {
            self.events.emit(EngineEvent::ScoreChanged {
                score: self.score.score(),
            });
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("board", &self.board.to_pattern())
            .field("phase", &self.phase())
            .field("score", &self.score)
            .field("episode_id", &self.episode_id)
            .finish()
    }
}
