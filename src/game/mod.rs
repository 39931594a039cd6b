//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front end in `app` drives it one tick at a time.

pub mod config;
pub mod direction;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use direction::Direction;
pub use engine::{GameEngine, START_CELLS, START_DIRECTION, TickInfo, TickResult};
pub use state::{Cell, Collision, GameSession, SessionStatus, Snake, Snapshot};
