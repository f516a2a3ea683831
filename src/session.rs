//! The game session: one engine, its clock, the input mapper and the
//! collaborators that outlive a single game (high-score store, notifier).

use std::time::Duration;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::clock::SimulationClock;
use crate::game::{
    ConfigError, Direction, GameConfig, Grid, Position, SessionStatus, SnakeEngine, StepResult,
};
use crate::input::{Command, InputEvent, InputMapper};
use crate::notify::Notifier;
use crate::schedule::FrameScheduler;
use crate::store::{ScoreStore, HIGH_SCORE_KEY};

/// Read-only copy of everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub grid: Grid,
    /// Head first
    pub snake: Vec<Position>,
    pub food: Option<Position>,
    pub score: u32,
    pub high_score: u32,
    pub status: SessionStatus,
    pub tick_interval: Duration,
}

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Simulation ticks run
    pub ticks: u32,
    /// Set when a tick in this frame ended the game
    pub outcome: Option<StepResult>,
}

pub struct GameSession<R = rand::rngs::ThreadRng> {
    config: GameConfig,
    engine: SnakeEngine<R>,
    clock: SimulationClock,
    mapper: InputMapper,
    /// Latest accepted direction; stays set until overwritten
    pending: Option<Direction>,
    store: Box<dyn ScoreStore>,
    notifier: Box<dyn Notifier>,
    /// Cleared after a failed write; the high score then lives in memory only
    persist: bool,
}

impl GameSession<rand::rngs::ThreadRng> {
    pub fn new(
        config: GameConfig,
        store: Box<dyn ScoreStore>,
        notifier: Box<dyn Notifier>,
        now: Duration,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(config, rand::thread_rng(), store, notifier, now)
    }
}

impl<R: Rng> GameSession<R> {
    pub fn with_rng(
        config: GameConfig,
        rng: R,
        store: Box<dyn ScoreStore>,
        notifier: Box<dyn Notifier>,
        now: Duration,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut engine = SnakeEngine::with_rng(&config, rng);
        match store.get(HIGH_SCORE_KEY) {
            Ok(Some(high_score)) => engine.raise_high_score(high_score),
            Ok(None) => {}
            Err(e) => warn!(error = %format!("{e:#}"), "Could not load high score, starting from 0"),
        }

        info!(
            width = config.grid_width,
            height = config.grid_height,
            high_score = engine.high_score(),
            "Session started"
        );

        Ok(Self {
            mapper: InputMapper::new(&config),
            config,
            engine,
            clock: SimulationClock::new(now),
            pending: None,
            store,
            notifier,
            persist: true,
        })
    }

    /// Run every tick that has come due by `now`.
    ///
    /// The tick interval is re-read after each tick because eating shortens
    /// it. Stops at the tick that ends the game.
    pub fn frame(&mut self, now: Duration) -> FrameReport {
        let mut report = FrameReport::default();
        let status = self.engine.status();
        if status.is_finished() {
            return report;
        }

        let paused = status == SessionStatus::Paused;
        self.clock.accumulate(now, paused);
        if paused {
            return report;
        }

        while self.clock.consume_tick(self.engine.tick_interval()) {
            let result = self.engine.step(self.pending);
            report.ticks += 1;

            if result == StepResult::Grew {
                debug!(
                    score = self.engine.score(),
                    tick_ms = self.engine.tick_interval().as_millis() as u64,
                    "Food eaten"
                );
            }

            if result.is_terminal() {
                self.finish(result);
                report.outcome = Some(result);
                break;
            }
        }

        report
    }

    /// Drive frames from `frames` until it runs dry or the game ends.
    ///
    /// Returns the number of ticks run.
    pub fn run<S: FrameScheduler>(&mut self, frames: &mut S) -> u64 {
        let mut ticks = 0;
        while self.wants_frames() {
            let Some(now) = frames.next_frame() else {
                break;
            };
            ticks += u64::from(self.frame(now).ticks);
        }
        ticks
    }

    /// False once the game has ended; frames resume after a restart
    pub fn wants_frames(&self) -> bool {
        !self.engine.status().is_finished()
    }

    /// Feed one input event through the mapper and apply the result
    pub fn handle(&mut self, event: InputEvent, now: Duration) -> Option<Command> {
        let command =
            self.mapper
                .interpret(event, now, self.engine.status(), self.engine.velocity())?;

        match command {
            Command::Turn(direction) => self.set_pending(direction),
            Command::TogglePause => {
                self.toggle_pause(now);
            }
            Command::Restart => self.restart(now),
        }
        Some(command)
    }

    /// Store `direction` for the next tick unless it is not allowed right now
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        let accepted =
            self.mapper
                .accepts(direction, self.engine.status(), self.engine.velocity());
        if accepted {
            self.set_pending(direction);
        }
        accepted
    }

    fn set_pending(&mut self, direction: Direction) {
        self.pending = Some(direction);
        self.engine.begin();
    }

    /// Pause or resume; time spent paused never turns into ticks
    pub fn toggle_pause(&mut self, now: Duration) -> SessionStatus {
        if self.status().is_finished() {
            return self.status();
        }
        let was_paused = self.engine.status() == SessionStatus::Paused;
        self.clock.accumulate(now, was_paused);

        let status = self.engine.toggle_pause();
        debug!(?status, "Pause toggled");
        status
    }

    /// Start a new game; the high score carries over
    pub fn restart(&mut self, now: Duration) {
        self.engine.reset();
        self.pending = None;
        self.clock.reset(now);
        self.mapper.reset();
        info!(high_score = self.engine.high_score(), "Game restarted");
    }

    /// Switch to a new board size, which always starts a new game
    pub fn resize(&mut self, grid: Grid, now: Duration) -> bool {
        if grid == self.engine.grid() {
            return false;
        }

        let resized = GameConfig {
            grid_width: grid.width,
            grid_height: grid.height,
            ..self.config.clone()
        };
        if let Err(error) = resized.validate() {
            warn!(%error, "Ignoring resize");
            return false;
        }

        self.config = resized;
        self.engine.resize(grid);
        self.pending = None;
        self.clock.reset(now);
        self.mapper.reset();
        info!(width = grid.width, height = grid.height, "Board resized, new game");
        true
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.engine.grid(),
            snake: self.engine.snake().segments().collect(),
            food: self.engine.food(),
            score: self.engine.score(),
            high_score: self.engine.high_score(),
            status: self.engine.status(),
            tick_interval: self.engine.tick_interval(),
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.engine.status()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending
    }

    /// Whether high scores still reach the store
    pub fn is_persisting(&self) -> bool {
        self.persist
    }

    fn finish(&mut self, result: StepResult) {
        let score = self.engine.score();
        match result {
            StepResult::Won { .. } => info!(score, "Board filled, game won"),
            _ => info!(score, "Game over"),
        }

        if !result.new_high_score() {
            return;
        }

        let high_score = self.engine.high_score();
        info!(high_score, "New high score");

        if self.persist {
            if let Err(e) = self.store.set(HIGH_SCORE_KEY, high_score) {
                warn!(
                    error = %format!("{e:#}"),
                    "Could not save high score, keeping it in memory for this session"
                );
                self.persist = false;
            }
        }

        if let Err(e) = self.notifier.high_score_beep() {
            warn!(error = %format!("{e:#}"), "High score notification failed");
        }
    }
}
