use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::config::{BOARD_HEIGHT, BOARD_WIDTH, GRID_SIZE};
use super::direction::Direction;

/// A position on the board, in board units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// One grid step in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    pub fn is_in_bounds(&self) -> bool {
        self.x >= 0 && self.x < BOARD_WIDTH && self.y >= 0 && self.y < BOARD_HEIGHT
    }

    pub fn is_grid_aligned(&self) -> bool {
        self.x % GRID_SIZE == 0 && self.y % GRID_SIZE == 0
    }

    /// Column and row of the grid square this cell falls in
    pub fn grid_square(&self) -> (i32, i32) {
        (self.x.div_euclid(GRID_SIZE), self.y.div_euclid(GRID_SIZE))
    }
}

/// The snake, head first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Create a snake from its head and the segments trailing it, in order
    pub fn new(head: Cell, rest: impl IntoIterator<Item = Cell>) -> Self {
        let mut body = VecDeque::from([head]);
        body.extend(rest);
        Self { body }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Check if any segment, head included, sits on `cell`
    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Segments from head to tail
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub(super) fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
    }

    pub(super) fn drop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop_back();
        }
    }
}

/// What ended a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Snake left the board
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Ended,
}

/// One game, from start until a collision or the player quits
#[derive(Debug, Clone)]
pub struct GameSession {
    pub snake: Snake,
    pub food: Cell,
    pub score: u32,
    direction: Direction,
    status: SessionStatus,
    pub(super) collision: Option<Collision>,
    pub(super) ticks: u64,
    started_at: Instant,
    ended_at: Option<Instant>,
}

impl GameSession {
    /// Start a running session from explicit parts. The clock starts now.
    pub fn new(snake: Snake, direction: Direction, food: Cell) -> Self {
        Self {
            snake,
            food,
            score: 0,
            direction,
            status: SessionStatus::Running,
            collision: None,
            ticks: 0,
            started_at: Instant::now(),
            ended_at: None,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Steer the snake. A request for the exact reverse of the current
    /// direction is ignored; returns whether the request was applied.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if self.direction.is_opposite(requested) {
            return false;
        }
        self.direction = requested;
        true
    }

    /// Stop the session and its clock. Later calls change nothing.
    pub fn end(&mut self) {
        if self.status == SessionStatus::Running {
            self.status = SessionStatus::Ended;
            self.ended_at = Some(Instant::now());
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    pub fn collision(&self) -> Option<Collision> {
        self.collision
    }

    /// Ticks advanced so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Time played; frozen once the session has ended
    pub fn elapsed(&self) -> Duration {
        match self.ended_at {
            Some(ended_at) => ended_at.duration_since(self.started_at),
            None => self.started_at.elapsed(),
        }
    }

    /// Read-only copy handed to the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.cells().collect(),
            food: self.food,
            score: self.score,
            elapsed: self.elapsed(),
            status: self.status,
            collision: self.collision,
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Segments, head first
    pub snake: Vec<Cell>,
    pub food: Cell,
    pub score: u32,
    pub elapsed: Duration,
    pub status: SessionStatus,
    pub collision: Option<Collision>,
}

impl Snapshot {
    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    pub fn head(&self) -> Option<Cell> {
        self.snake.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn starting_snake() -> Snake {
        Snake::new(Cell::new(100, 100), [Cell::new(90, 100), Cell::new(80, 100)])
    }

    #[test]
    fn test_cell_movement() {
        let cell = Cell::new(100, 100);
        assert_eq!(cell.moved_in_direction(Direction::Right), Cell::new(120, 100));
        assert_eq!(cell.moved_in_direction(Direction::Left), Cell::new(80, 100));
        assert_eq!(cell.moved_in_direction(Direction::Up), Cell::new(100, 80));
        assert_eq!(cell.moved_in_direction(Direction::Down), Cell::new(100, 120));
    }

    #[test]
    fn test_bounds_checking() {
        assert!(Cell::new(0, 0).is_in_bounds());
        assert!(Cell::new(580, 380).is_in_bounds());
        assert!(Cell::new(599, 399).is_in_bounds());
        assert!(!Cell::new(-20, 0).is_in_bounds());
        assert!(!Cell::new(0, -20).is_in_bounds());
        assert!(!Cell::new(600, 100).is_in_bounds());
        assert!(!Cell::new(100, 400).is_in_bounds());
    }

    #[test]
    fn test_grid_square() {
        assert_eq!(Cell::new(120, 100).grid_square(), (6, 5));
        assert_eq!(Cell::new(90, 100).grid_square(), (4, 5));
        assert_eq!(Cell::new(-20, 0).grid_square(), (-1, 0));
    }

    #[test]
    fn test_snake_creation() {
        let snake = starting_snake();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(100, 100));
        assert_eq!(snake.tail(), Cell::new(80, 100));
        assert!(snake.contains(Cell::new(90, 100)));
        assert!(!snake.contains(Cell::new(120, 100)));
    }

    #[test]
    fn test_snake_never_loses_its_head() {
        let mut snake = Snake::new(Cell::new(0, 0), []);
        snake.drop_tail();
        assert_eq!(snake.len(), 1);
        assert!(!snake.is_empty());
    }

    #[test]
    fn test_reversal_is_rejected() {
        let mut session = GameSession::new(starting_snake(), Direction::Right, Cell::new(0, 0));

        assert!(!session.set_direction(Direction::Left));
        assert_eq!(session.direction(), Direction::Right);

        assert!(session.set_direction(Direction::Up));
        assert_eq!(session.direction(), Direction::Up);

        assert!(!session.set_direction(Direction::Down));
        assert_eq!(session.direction(), Direction::Up);
    }

    #[test]
    fn test_end_freezes_clock() {
        let mut session = GameSession::new(starting_snake(), Direction::Right, Cell::new(0, 0));
        std::thread::sleep(Duration::from_millis(20));

        session.end();
        let elapsed = session.elapsed();
        assert!(elapsed >= Duration::from_millis(20));
        assert_eq!(session.status(), SessionStatus::Ended);
        assert_eq!(session.collision(), None);

        std::thread::sleep(Duration::from_millis(20));
        session.end();
        assert_eq!(session.elapsed(), elapsed);
        assert_eq!(session.snapshot().elapsed, elapsed);
    }

    #[test]
    fn test_snapshot_copies_state() {
        let mut session = GameSession::new(starting_snake(), Direction::Right, Cell::new(40, 60));
        session.score = 4;

        let snapshot = session.snapshot();
        assert_eq!(
            snapshot.snake,
            vec![Cell::new(100, 100), Cell::new(90, 100), Cell::new(80, 100)]
        );
        assert_eq!(snapshot.head(), Some(Cell::new(100, 100)));
        assert_eq!(snapshot.food, Cell::new(40, 60));
        assert_eq!(snapshot.score, 4);
        assert!(snapshot.is_running());
        assert_eq!(snapshot.collision, None);
    }
}
