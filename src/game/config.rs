//! Fixed board and timing parameters.
//!
//! Coordinates are in board units; one grid cell is `GRID_SIZE` units wide.

use std::time::Duration;

/// Width of the board in units
pub const BOARD_WIDTH: i32 = 600;
/// Height of the board in units
pub const BOARD_HEIGHT: i32 = 400;
/// Edge length of one cell and one snake segment
pub const GRID_SIZE: i32 = 20;

/// Number of grid columns (30)
pub const GRID_COLUMNS: i32 = BOARD_WIDTH / GRID_SIZE;
/// Number of grid rows (20)
pub const GRID_ROWS: i32 = BOARD_HEIGHT / GRID_SIZE;

/// Engine ticks per second
pub const TICK_RATE_HZ: u64 = 10;

/// How long the game-over panel stays up before the process exits
pub const GAME_OVER_HOLD: Duration = Duration::from_secs(3);

/// Time between two ticks
pub fn tick_interval() -> Duration {
    Duration::from_millis(1000 / TICK_RATE_HZ)
}
