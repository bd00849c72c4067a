//! Game session - the timed drop loop and the control surface
//!
//! A [`GameSession`] exclusively owns the game state, a tick scheduler and a
//! render adapter. Every mutation goes through one `&mut self` method, so the
//! tick and input handlers can never interleave mid-mutation; a multi-threaded
//! runner serializes them through a single command queue (see [`Command`]).
//!
//! # States
//!
//! ```text
//!            start / reset
//!  Stopped ────────────────► Running ◄──── reset (from any state)
//!                             │   ▲
//!                       pause │   │ resume
//!                             ▼   │
//!                             Paused
//! ```

use tracing::{info, trace};

use crate::command::Command;
use crate::config::GameConfig;
use crate::core::{GameState, StepOutcome};
use crate::render::RenderAdapter;
use crate::scheduler::{TickScheduler, TickToken};
use crate::types::GameAction;

/// Game loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopPhase {
    Stopped,
    Running,
    Paused,
}

impl LoopPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoopPhase::Stopped => "stopped",
            LoopPhase::Running => "running",
            LoopPhase::Paused => "paused",
        }
    }
}

/// Owns one game and drives it
pub struct GameSession<S, A> {
    config: GameConfig,
    state: GameState,
    scheduler: S,
    adapter: A,
    phase: LoopPhase,
    /// Bumped whenever the schedule changes; ticks from older schedules are ignored.
    generation: u64,
}

impl<S: TickScheduler, A: RenderAdapter> GameSession<S, A> {
    /// Create a stopped session. Call [`start`](Self::start) to begin.
    pub fn new(config: GameConfig, seed: u64, scheduler: S, adapter: A) -> Self {
        Self {
            state: GameState::new(config.cols, config.rows, seed),
            config,
            scheduler,
            adapter,
            phase: LoopPhase::Stopped,
            generation: 0,
        }
    }

    /// Continue from a prepared `state` (replays, fixed positions) instead of
    /// a fresh board. The session is running once this returns; a piece is
    /// spawned first if `state` has none. The state's board must be
    /// `config.cols x config.rows`.
    pub fn with_state(
        config: GameConfig,
        mut state: GameState,
        scheduler: S,
        adapter: A,
    ) -> Self {
        debug_assert_eq!(
            (state.board().width(), state.board().height()),
            (config.cols, config.rows)
        );
        if state.active().is_none() {
            state.spawn();
        }

        let mut session = Self {
            config,
            state,
            scheduler,
            adapter,
            phase: LoopPhase::Stopped,
            generation: 0,
        };
        session.render();
        session.arm_ticker();
        session.set_phase(LoopPhase::Running);
        session
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    /// Begin a game. Identical to [`reset`](Self::reset).
    pub fn start(&mut self) {
        self.reset();
    }

    /// Wipe the board, spawn a piece and (re)start ticking. Valid from any state.
    pub fn reset(&mut self) {
        self.state.restart();
        self.render();
        self.arm_ticker();
        self.set_phase(LoopPhase::Running);
    }

    /// Stop ticking, keeping board and piece as they are. Only valid while running.
    pub fn pause(&mut self) -> bool {
        if self.phase != LoopPhase::Running {
            return false;
        }
        self.scheduler.cancel();
        self.generation = self.generation.wrapping_add(1);
        self.set_phase(LoopPhase::Paused);
        true
    }

    /// Resume ticking at the configured interval. Only valid while paused.
    ///
    /// The first tick comes one full interval after resuming; time spent
    /// paused is never caught up.
    pub fn resume(&mut self) -> bool {
        if self.phase != LoopPhase::Paused {
            return false;
        }
        self.arm_ticker();
        self.set_phase(LoopPhase::Running);
        true
    }

    /// Handle a timer tick: descend one row or lock, then redraw.
    /// Returns false when the tick was ignored (not running, or stale).
    pub fn on_tick(&mut self, token: TickToken) -> bool {
        if self.phase != LoopPhase::Running || token.generation() != self.generation {
            trace!(generation = token.generation(), "ignoring tick");
            return false;
        }
        self.step(Step::Gravity);
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.translate(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.translate(1)
    }

    /// Manual down input: gain one row, lock when resting.
    pub fn soft_drop_one_or_lock(&mut self) -> StepOutcome {
        self.step(Step::Soft)
    }

    pub fn rotate_clockwise(&mut self) -> bool {
        let rotated = self.state.rotate();
        if rotated {
            self.render();
        }
        rotated
    }

    /// Manual drop action: the same descend-or-lock step a tick performs.
    pub fn instant_lock_step(&mut self) -> StepOutcome {
        self.step(Step::Gravity)
    }

    /// Apply one control action. Returns whether anything changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop_one_or_lock() != StepOutcome::Idle,
            GameAction::Drop => self.instant_lock_step() != StepOutcome::Idle,
            GameAction::RotateCw => self.rotate_clockwise(),
            GameAction::Pause => self.pause(),
            GameAction::Resume => self.resume(),
            GameAction::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Consume one command from the queue. Returns false once the runner should stop.
    pub fn dispatch(&mut self, command: Command) -> bool {
        match command {
            Command::Action(action) => {
                self.apply_action(action);
                true
            }
            Command::Tick(token) => {
                self.on_tick(token);
                true
            }
            Command::Quit => {
                self.scheduler.cancel();
                self.generation = self.generation.wrapping_add(1);
                self.set_phase(LoopPhase::Stopped);
                false
            }
        }
    }

    fn translate(&mut self, dx: i32) -> bool {
        let moved = self.state.translate(dx);
        if moved {
            self.render();
        }
        moved
    }

    fn step(&mut self, kind: Step) -> StepOutcome {
        let adapter = &mut self.adapter;
        let on_line_cleared = |row: usize| adapter.line_cleared(row);
        let outcome = match kind {
            Step::Soft => self.state.soft_drop(on_line_cleared),
            Step::Gravity => self.state.drop_step(on_line_cleared),
        };

        if outcome != StepOutcome::Idle {
            self.render();
        }
        outcome
    }

    fn arm_ticker(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.scheduler
            .schedule(self.config.tick_interval(), TickToken::new(self.generation));
    }

    fn set_phase(&mut self, phase: LoopPhase) {
        if self.phase != phase {
            info!(from = self.phase.as_str(), to = phase.as_str(), "phase change");
            self.phase = phase;
        }
        self.adapter.phase_changed(phase);
    }

    fn render(&mut self) {
        self.adapter.render(self.state.board(), self.state.active());
    }
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Soft,
    Gravity,
}
