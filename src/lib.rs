//! Term Snake - classic snake in the terminal
//!
//! This library provides:
//! - Core game logic (game module), free of I/O
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - The fixed-rate loop tying them together (app module)

pub mod app;
pub mod game;
pub mod input;
pub mod logging;
pub mod render;
