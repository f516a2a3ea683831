//! Input normalization.
//!
//! Every input source (keyboard, pointer drags and taps, on-screen direction
//! buttons) is reduced to an [`InputEvent`]; the [`InputMapper`] then decides
//! which [`Command`], if any, the event means in the current game state.

pub mod handler;
pub mod mapper;

use crate::game::Direction;

pub use handler::{InputHandler, KeyAction};
pub use mapper::InputMapper;

/// Raw intent from any input source
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Direction key or on-screen direction button
    Turn(Direction),
    /// Pause key
    TogglePause,
    /// Restart key
    Restart,
    /// Pointer travel between press and release
    Swipe { dx: f32, dy: f32 },
}

/// What a pointer gesture turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Tap,
    Swipe(Direction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapCommand {
    Restart,
    TogglePause,
    None,
}

/// Command applied to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    TogglePause,
    Restart,
}
