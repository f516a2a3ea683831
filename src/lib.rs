//! Tile Snake - a single-player grid snake game
//!
//! This library provides:
//! - Core game logic (game module): board, snake, food, toroidal movement
//! - A fixed-timestep clock decoupled from the frame rate (clock module)
//! - Input normalization for keys, pointer swipes and taps (input module)
//! - The session that ties them to a high-score store and notifier (session module)
//! - A terminal front-end (render and modes modules)

pub mod clock;
pub mod game;
pub mod input;
pub mod layout;
pub mod logging;
pub mod modes;
pub mod notify;
pub mod render;
pub mod schedule;
pub mod session;
pub mod store;

pub use session::{FrameReport, GameSession, Snapshot};
