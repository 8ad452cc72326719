//! Session module - one board's complete game state
//!
//! This module ties together all core components: board, pair, generator,
//! resolver, and scoring. It runs the per-board state machine:
//!
//! ```text
//! Controlling ──lock──▶ Locking ──▶ Resolving ──clear──▶ AwaitingClearAnimation
//!      ▲                               │  ▲                         │
//!      │                        no clear  └──── Cascading ◀──settle─┘
//!      └──────── spawn ◀──────────────┘
//!                                      └── spawn blocked ──▶ GameOver
//! ```
//!
//! `Locking` and `Resolving` are transient within one call. Everything else is
//! advanced by [`Session::update`] with elapsed milliseconds.

use tracing::{debug, info};

use crate::board::Board;
use crate::config::{ConfigError, SessionConfig};
use crate::piece::PuyoPair;
use crate::pop::{PopEffect, PopEffects};
use crate::resolver::{settle, ClearStats, MatchResolver, Settle};
use crate::rng::PairGenerator;
use crate::scoring::calculate_attack;
use crate::snapshot::{PairSnapshot, SessionSnapshot};
use crate::types::{
    GameAction, Puyo, RotationDir, SessionState, BOARD_SIZE, BOARD_WIDTH, MILLI_ROWS,
};

/// Notifications queued for collaborators (renderer, audio, arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A pair was written into the board
    Locked { pair: PuyoPair },
    /// A clearing pass resolved
    Chain {
        chain: u32,
        stats: ClearStats,
        score_delta: u32,
        garbage: u32,
    },
    /// A garbage batch landed (cells lost to blocked columns excluded)
    GarbageDropped { count: u32 },
    GameOver,
}

/// Complete state of one board
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    board: Board,
    current: Option<PuyoPair>,
    next: PuyoPair,
    generator: PairGenerator,
    resolver: MatchResolver,
    state: SessionState,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Pairs spawned this episode; identifies the active pair.
    piece_id: u32,
    score: u32,
    pending_garbage: u32,
    outgoing_garbage: u32,
    fall_timer_ms: u32,
    clear_timer_ms: u32,
    garbage_timer_ms: u32,
    /// Remaining display offset per cell, in milli-rows
    fall_offsets: [u32; BOARD_SIZE],
    pops: PopEffects,
    events: Vec<SessionEvent>,
    since_command_ms: u32,
    since_rotate_ms: u32,
}

impl Session {
    /// Create a session with the given config and RNG seed
    pub fn new(config: SessionConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    fn build(config: SessionConfig, seed: u64) -> Self {
        let mut generator = PairGenerator::new(seed, config.distinct_palette());
        let current = generator.next_pair();
        let next = generator.next_pair();

        Self {
            config,
            board: Board::new(),
            current: Some(current),
            next,
            generator,
            resolver: MatchResolver::new(),
            state: SessionState::Controlling,
            episode_id: 0,
            piece_id: 1,
            score: 0,
            pending_garbage: 0,
            outgoing_garbage: 0,
            fall_timer_ms: 0,
            clear_timer_ms: 0,
            garbage_timer_ms: 0,
            fall_offsets: [0; BOARD_SIZE],
            pops: PopEffects::new(),
            events: Vec::new(),
            since_command_ms: u32::MAX,
            since_rotate_ms: u32::MAX,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Replace the board contents, e.g. to set up a puzzle.
    ///
    /// Offsets and pop effects are cleared; the active pair is kept.
    pub fn load_board(&mut self, board: Board) {
        self.board = board;
        self.fall_offsets = [0; BOARD_SIZE];
        self.pops.clear();
    }

    pub fn current(&self) -> Option<PuyoPair> {
        self.current
    }

    pub fn next(&self) -> PuyoPair {
        self.next
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Current chain length (0 outside a chain)
    pub fn chain(&self) -> u32 {
        self.resolver.chain()
    }

    pub fn pending_garbage(&self) -> u32 {
        self.pending_garbage
    }

    pub fn outgoing_garbage(&self) -> u32 {
        self.outgoing_garbage
    }

    pub fn game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn seed(&self) -> u64 {
        self.generator.seed()
    }

    pub fn pop_effects(&self) -> &PopEffects {
        &self.pops
    }

    /// Remaining display offset of the cell at (x, y), in rows
    pub fn fall_offset(&self, x: i8, y: i8) -> f32 {
        Board::index(x, y)
            .map(|idx| self.fall_offsets[idx] as f32 / MILLI_ROWS as f32)
            .unwrap_or(0.0)
    }

    /// Whether any cell is still falling into place
    pub fn is_animating(&self) -> bool {
        self.fall_offsets.iter().any(|&o| o > 0)
    }

    /// Whether the active pair takes commands right now
    pub fn accepts_input(&self) -> bool {
        self.state == SessionState::Controlling && self.current.is_some() && !self.is_animating()
    }

    /// Queue garbage owed by the opponent
    pub fn receive_garbage(&mut self, count: u32) {
        if count > 0 {
            self.pending_garbage = self.pending_garbage.saturating_add(count);
            debug!(count, pending = self.pending_garbage, "garbage received");
        }
    }

    /// Take the garbage produced since the last call
    pub fn take_outgoing_garbage(&mut self) -> u32 {
        std::mem::take(&mut self.outgoing_garbage)
    }

    /// Drain queued events
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.current = self.current.map(PairSnapshot::from);
        out.next = PairSnapshot::from(self.next);
        out.state = self.state;
        out.score = self.score;
        out.chain = self.chain();
        out.pending_garbage = self.pending_garbage;
        out.episode_id = self.episode_id;
        out.piece_id = self.piece_id;
        out.seed = self.generator.seed();
        out.animating = self.is_animating();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Debounced command entry point for human input.
    ///
    /// Restart is always accepted. Other commands are dropped while the
    /// session is busy or the debounce window has not elapsed. A command that
    /// fails (e.g. a move into a wall) leaves the window untouched.
    pub fn handle_input(&mut self, action: GameAction) -> bool {
        if action == GameAction::Restart {
            return self.apply_action(action);
        }
        if !self.accepts_input() || self.since_command_ms < self.config.key_debounce_ms {
            return false;
        }
        if action.is_rotation() && self.since_rotate_ms < self.config.rotate_debounce_ms {
            return false;
        }
        // Only a command that took effect starts a new debounce window.
        if !self.apply_action(action) {
            return false;
        }
        self.since_command_ms = 0;
        if action.is_rotation() {
            self.since_rotate_ms = 0;
        }
        true
    }

    /// Apply a command without debouncing
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if action == GameAction::Restart {
            self.restart();
            return true;
        }
        if !self.accepts_input() {
            return false;
        }
        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => self.try_move(0, 1),
            GameAction::HardDrop => {
                let board = &self.board;
                if let Some(pair) = self.current.as_mut() {
                    pair.hard_drop(board);
                }
                self.lock();
                true
            }
            GameAction::RotateCw => self.try_rotate(RotationDir::Cw),
            GameAction::RotateCcw => self.try_rotate(RotationDir::Ccw),
            GameAction::Restart => false,
        }
    }

    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let board = &self.board;
        self.current
            .as_mut()
            .is_some_and(|pair| pair.try_move(board, dx, dy))
    }

    fn try_rotate(&mut self, dir: RotationDir) -> bool {
        let board = &self.board;
        self.current
            .as_mut()
            .is_some_and(|pair| pair.try_rotate(board, dir))
    }

    /// Re-initialize with a seed derived from the current generator state
    pub fn restart(&mut self) {
        let seed = self.generator.reseed();
        let episode_id = self.episode_id.wrapping_add(1);
        *self = Self::build(self.config.clone(), seed);
        self.episode_id = episode_id;
        info!(episode_id, seed, "session restarted");
    }

    /// Main game tick - advance timers, animations, and the state machine
    pub fn update(&mut self, elapsed_ms: u32) {
        self.since_command_ms = self.since_command_ms.saturating_add(elapsed_ms);
        self.since_rotate_ms = self.since_rotate_ms.saturating_add(elapsed_ms);
        self.pops.tick(elapsed_ms);

        if self.state == SessionState::GameOver {
            return;
        }

        let falling = self.advance_fall_offsets(elapsed_ms);

        match self.state {
            SessionState::Controlling => {
                if falling {
                    return;
                }
                if self.pending_garbage > 0 {
                    self.garbage_timer_ms += elapsed_ms;
                    if self.garbage_timer_ms >= self.config.garbage_interval_ms {
                        self.garbage_timer_ms = 0;
                        self.drop_garbage();
                        return;
                    }
                } else {
                    self.garbage_timer_ms = 0;
                }

                self.fall_timer_ms += elapsed_ms;
                if self.fall_timer_ms >= self.config.fall_interval_ms {
                    self.fall_timer_ms = 0;
                    if !self.try_move(0, 1) {
                        self.lock();
                    }
                }
            }
            SessionState::AwaitingClearAnimation => {
                self.clear_timer_ms = self.clear_timer_ms.saturating_sub(elapsed_ms);
                if self.clear_timer_ms == 0 {
                    let moves = settle(&mut self.board);
                    self.start_fall(&moves);
                    self.state = SessionState::Cascading;
                    if !self.is_animating() {
                        self.resolve();
                    }
                }
            }
            SessionState::Cascading => {
                if !falling {
                    self.resolve();
                }
            }
            SessionState::Locking | SessionState::Resolving | SessionState::GameOver => {}
        }
    }

    /// Shrink every fall offset; returns true while any remain
    fn advance_fall_offsets(&mut self, elapsed_ms: u32) -> bool {
        let step = elapsed_ms.saturating_mul(self.config.cascade_rows_per_sec);
        let mut any = false;
        for offset in &mut self.fall_offsets {
            *offset = offset.saturating_sub(step);
            any |= *offset > 0;
        }
        any
    }

    fn start_fall(&mut self, moves: &Settle) {
        for m in moves {
            if let Some(from) = Board::index(m.x, m.from) {
                self.fall_offsets[from] = 0;
            }
            if let Some(to) = Board::index(m.x, m.to) {
                self.fall_offsets[to] = m.rows() as u32 * MILLI_ROWS;
            }
        }
    }

    /// Write the active pair into the board and start resolving
    fn lock(&mut self) {
        let Some(pair) = self.current.take() else {
            return;
        };
        self.state = SessionState::Locking;
        for (x, y, color) in pair.cells() {
            self.board.set(x, y, Some(Puyo::Colored(color)));
        }
        self.fall_timer_ms = 0;
        self.events.push(SessionEvent::Locked { pair });
        debug!(x = pair.x, y = pair.y, orientation = pair.orientation.as_str(), "pair locked");

        // A horizontal pair resting on uneven ground splits apart.
        let moves = settle(&mut self.board);
        self.start_fall(&moves);
        if self.is_animating() {
            self.state = SessionState::Cascading;
        } else {
            self.resolve();
        }
    }

    fn resolve(&mut self) {
        self.state = SessionState::Resolving;
        let Some(report) = self.resolver.resolve(&mut self.board) else {
            self.spawn_next();
            return;
        };

        let attack = calculate_attack(&report.stats, self.config.ojama_base);
        self.score = self.score.saturating_add(attack.score);
        self.outgoing_garbage = self.outgoing_garbage.saturating_add(attack.garbage);
        for cell in &report.removed {
            self.pops.spawn(PopEffect::new(
                cell.x,
                cell.y,
                cell.puyo,
                self.config.pop_effect_ms,
            ));
        }
        self.events.push(SessionEvent::Chain {
            chain: report.stats.chain,
            stats: report.stats,
            score_delta: attack.score,
            garbage: attack.garbage,
        });
        debug!(
            chain = report.stats.chain,
            cleared = report.stats.cleared,
            groups = report.stats.groups,
            colors = report.stats.colors,
            power = attack.power,
            garbage = attack.garbage,
            "chain step"
        );

        self.clear_timer_ms = self.config.clear_wait_ms;
        self.state = SessionState::AwaitingClearAnimation;
    }

    /// Promote the next pair, or end the game if it cannot enter
    fn spawn_next(&mut self) {
        let pair = self.next;
        if self.board.is_spawn_blocked() || !pair.fits_at_current(&self.board) {
            self.current = None;
            self.state = SessionState::GameOver;
            self.events.push(SessionEvent::GameOver);
            info!(score = self.score, episode_id = self.episode_id, "game over");
            return;
        }
        self.current = Some(pair);
        self.next = self.generator.next_pair();
        self.piece_id = self.piece_id.wrapping_add(1);
        self.fall_timer_ms = 0;
        self.state = SessionState::Controlling;
    }

    /// Drop one batch of pending garbage onto shuffled columns.
    ///
    /// A cell whose landing slot is taken by the falling pair stays pending.
    fn drop_garbage(&mut self) {
        let batch = self.pending_garbage.min(self.config.garbage_batch_cap);
        self.pending_garbage -= batch;
        let columns = self.generator.shuffled_columns();
        let current = self.current;
        let mut landed = 0u32;

        for i in 0..batch as usize {
            let x = columns[i % BOARD_WIDTH as usize];
            let Some(y) = self.board.landing_row(x) else {
                continue;
            };
            if current.is_some_and(|p| p.occupies(x, y)) {
                self.pending_garbage += 1;
                continue;
            }
            self.board.set(x, y, Some(Puyo::Garbage));
            if let Some(idx) = Board::index(x, y) {
                self.fall_offsets[idx] = (y as u32 + 1) * MILLI_ROWS;
            }
            landed += 1;
        }

        self.events.push(SessionEvent::GarbageDropped { count: landed });
        debug!(batch, landed, pending = self.pending_garbage, "garbage dropped");
    }
}
