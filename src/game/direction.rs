use super::config::GRID_SIZE;

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The direction pointing the other way
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Displacement (dx, dy) of one step, in board units
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -GRID_SIZE),
            Direction::Down => (0, GRID_SIZE),
            Direction::Left => (-GRID_SIZE, 0),
            Direction::Right => (GRID_SIZE, 0),
        }
    }
}
