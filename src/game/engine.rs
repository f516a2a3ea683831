use std::time::Duration;

use rand::seq::IteratorRandom;
use rand::Rng;

use super::{
    action::{is_allowed_turn, Direction},
    config::GameConfig,
    state::{Grid, Position, SessionStatus, Snake},
};

/// Random draws tried before falling back to scanning the free tiles
const FOOD_DRAW_ATTEMPTS: usize = 64;

/// Outcome of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// Resting, paused or finished; nothing changed
    NoOp,
    /// The snake advanced one tile
    Moved,
    /// The snake ate and grew by one segment
    Grew,
    /// The snake bit itself; the game is over
    Collision { new_high_score: bool },
    /// The snake ate the last free tile
    Won { new_high_score: bool },
}

impl StepResult {
    /// Whether this step ended the game
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepResult::Collision { .. } | StepResult::Won { .. })
    }

    pub fn new_high_score(&self) -> bool {
        match self {
            StepResult::Collision { new_high_score } | StepResult::Won { new_high_score } => {
                *new_high_score
            }
            _ => false,
        }
    }
}

/// Owns the board and applies one discrete step per tick.
///
/// Never performs I/O; persistence of the high score is up to the caller.
pub struct SnakeEngine<R = rand::rngs::ThreadRng> {
    grid: Grid,
    base_tick: Duration,
    tick_step: Duration,
    min_tick: Duration,
    rng: R,

    snake: Snake,
    velocity: Option<Direction>,
    food: Option<Position>,
    score: u32,
    high_score: u32,
    tick_interval: Duration,
    status: SessionStatus,
    /// Status restored when a pause ends
    resume_status: SessionStatus,
}

impl SnakeEngine<rand::rngs::ThreadRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: &GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> SnakeEngine<R> {
    pub fn with_rng(config: &GameConfig, rng: R) -> Self {
        let grid = config.grid();
        let mut engine = Self {
            grid,
            base_tick: config.base_tick(),
            tick_step: config.tick_step(),
            min_tick: config.min_tick(),
            rng,
            snake: Snake::new(grid.center()),
            velocity: None,
            food: None,
            score: 0,
            high_score: 0,
            tick_interval: config.base_tick(),
            status: SessionStatus::AwaitingInput,
            resume_status: SessionStatus::AwaitingInput,
        };
        engine.reset();
        engine
    }

    /// Start a fresh game on the current grid. The high score survives.
    pub fn reset(&mut self) {
        self.snake = Snake::new(self.grid.center());
        self.velocity = None;
        self.score = 0;
        self.tick_interval = self.base_tick;
        self.status = SessionStatus::AwaitingInput;
        self.resume_status = SessionStatus::AwaitingInput;
        self.food = self.spawn_food();
    }

    /// Switch to a new board size; always starts a fresh game
    pub fn resize(&mut self, grid: Grid) {
        self.grid = grid;
        self.reset();
    }

    /// Execute one tick, adopting `pending` as the new velocity unless it
    /// reverses the current one.
    pub fn step(&mut self, pending: Option<Direction>) -> StepResult {
        if self.status == SessionStatus::Paused || self.status.is_finished() {
            return StepResult::NoOp;
        }

        if let Some(requested) = pending {
            if is_allowed_turn(self.velocity, requested) {
                self.velocity = Some(requested);
                self.begin();
            }
        }

        let Some(direction) = self.velocity else {
            return StepResult::NoOp;
        };

        let new_head = self.grid.wrapped_step(self.snake.head(), direction);

        // Checked against the whole pre-move body: stepping onto the tile
        // the tail is about to leave still counts as a bite.
        if self.snake.occupies(new_head) {
            self.status = SessionStatus::GameOver;
            let new_high_score = self.record_high_score();
            return StepResult::Collision { new_high_score };
        }

        self.snake.push_head(new_head);

        if self.food != Some(new_head) {
            self.snake.pop_tail();
            return StepResult::Moved;
        }

        self.score += 1;
        self.tick_interval = self
            .tick_interval
            .saturating_sub(self.tick_step)
            .max(self.min_tick);

        if self.snake.len() >= self.grid.area() {
            self.food = None;
            self.status = SessionStatus::Won;
            let new_high_score = self.record_high_score();
            return StepResult::Won { new_high_score };
        }

        self.food = self.spawn_food();
        StepResult::Grew
    }

    /// AwaitingInput becomes Running; any other status is left alone
    pub fn begin(&mut self) {
        if self.status == SessionStatus::AwaitingInput {
            self.status = SessionStatus::Running;
        }
    }

    /// Pause or resume. Finished games cannot be paused.
    pub fn toggle_pause(&mut self) -> SessionStatus {
        match self.status {
            SessionStatus::Paused => self.status = self.resume_status,
            SessionStatus::GameOver | SessionStatus::Won => {}
            running => {
                self.resume_status = running;
                self.status = SessionStatus::Paused;
            }
        }
        self.status
    }

    /// Raise the high score to at least `value`; it never goes down
    pub fn raise_high_score(&mut self, value: u32) {
        self.high_score = self.high_score.max(value);
    }

    fn record_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }

    /// Pick a random free tile, or `None` when the snake covers the board
    fn spawn_food(&mut self) -> Option<Position> {
        if self.snake.len() >= self.grid.area() {
            return None;
        }

        for _ in 0..FOOD_DRAW_ATTEMPTS {
            let pos = Position::new(
                self.rng.gen_range(0..self.grid.width) as i32,
                self.rng.gen_range(0..self.grid.height) as i32,
            );
            if !self.snake.occupies(pos) {
                return Some(pos);
            }
        }

        // Crowded board: choose uniformly among what is left
        let grid = self.grid;
        let snake = &self.snake;
        (0..grid.height as i32)
            .flat_map(|y| (0..grid.width as i32).map(move |x| Position::new(x, y)))
            .filter(|pos| !snake.occupies(*pos))
            .choose(&mut self.rng)
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn velocity(&self) -> Option<Direction> {
        self.velocity
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Replace the board for scenario tests
    #[cfg(test)]
    pub(crate) fn set_board(
        &mut self,
        snake: Snake,
        food: Position,
        velocity: Option<Direction>,
    ) {
        self.snake = snake;
        self.food = Some(food);
        self.velocity = velocity;
        self.status = if velocity.is_some() {
            SessionStatus::Running
        } else {
            SessionStatus::AwaitingInput
        };
    }

    #[cfg(test)]
    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }
}
