use std::time::Duration;

use crate::game::{is_allowed_turn, Direction, GameConfig, SessionStatus};

use super::{Command, Gesture, InputEvent, TapCommand};

/// Turns normalized input events into game commands.
///
/// Holds the only input-side state: when the last tap happened, for
/// double-tap detection.
#[derive(Debug, Clone)]
pub struct InputMapper {
    swipe_threshold: f32,
    double_tap_window: Duration,
    last_tap: Option<Duration>,
}

impl InputMapper {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            swipe_threshold: config.swipe_threshold,
            double_tap_window: config.double_tap_window(),
            last_tap: None,
        }
    }

    /// Whether `requested` may become the next direction.
    ///
    /// `velocity` is the direction the snake last moved in, so several
    /// turns queued between two ticks cannot add up to a reversal.
    pub fn accepts(
        &self,
        requested: Direction,
        status: SessionStatus,
        velocity: Option<Direction>,
    ) -> bool {
        match status {
            SessionStatus::Paused | SessionStatus::GameOver | SessionStatus::Won => false,
            SessionStatus::AwaitingInput | SessionStatus::Running => {
                is_allowed_turn(velocity, requested)
            }
        }
    }

    /// Classify pointer travel as a tap or a swipe along the dominant axis
    pub fn classify_swipe(&self, dx: f32, dy: f32) -> Gesture {
        if dx.abs() < self.swipe_threshold && dy.abs() < self.swipe_threshold {
            return Gesture::Tap;
        }

        let direction = if dx.abs() > dy.abs() {
            if dx > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        };
        Gesture::Swipe(direction)
    }

    /// A tap restarts a finished game; two quick taps toggle pause
    pub fn on_tap(&mut self, now: Duration, status: SessionStatus) -> TapCommand {
        if status.is_finished() {
            return TapCommand::Restart;
        }

        let double = self
            .last_tap
            .is_some_and(|last| now.saturating_sub(last) < self.double_tap_window);
        self.last_tap = Some(now);

        if double {
            TapCommand::TogglePause
        } else {
            TapCommand::None
        }
    }

    /// Map one input event to the command it triggers in the given state
    pub fn interpret(
        &mut self,
        event: InputEvent,
        now: Duration,
        status: SessionStatus,
        velocity: Option<Direction>,
    ) -> Option<Command> {
        match event {
            InputEvent::Turn(direction) => self
                .accepts(direction, status, velocity)
                .then_some(Command::Turn(direction)),
            InputEvent::TogglePause => {
                (!status.is_finished()).then_some(Command::TogglePause)
            }
            InputEvent::Restart => status.is_finished().then_some(Command::Restart),
            InputEvent::Swipe { dx, dy } => match self.classify_swipe(dx, dy) {
                Gesture::Tap => match self.on_tap(now, status) {
                    TapCommand::Restart => Some(Command::Restart),
                    TapCommand::TogglePause => Some(Command::TogglePause),
                    TapCommand::None => None,
                },
                Gesture::Swipe(direction) => self
                    .accepts(direction, status, velocity)
                    .then_some(Command::Turn(direction)),
            },
        }
    }

    /// Forget the previous tap
    pub fn reset(&mut self) {
        self.last_tap = None;
    }
}
