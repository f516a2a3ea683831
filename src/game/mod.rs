//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The session layer drives it tick by tick.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{is_allowed_turn, Direction};
pub use config::{ConfigError, GameConfig, MAX_GRID_SIDE};
pub use engine::{SnakeEngine, StepResult};
pub use state::{Grid, Position, SessionStatus, Snake};
