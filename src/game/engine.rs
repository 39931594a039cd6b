use rand::Rng;

use super::{
    config::{GRID_COLUMNS, GRID_ROWS, GRID_SIZE},
    direction::Direction,
    state::{Cell, Collision, GameSession, SessionStatus, Snake, Snapshot},
};

/// Where every session's snake starts, head first
pub const START_CELLS: [Cell; 3] = [Cell::new(100, 100), Cell::new(90, 100), Cell::new(80, 100)];
pub const START_DIRECTION: Direction = Direction::Right;

/// Information about a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickInfo {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// What ended the session, if this tick ended it
    pub collision: Option<Collision>,
}

/// Result of a tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    pub status: SessionStatus,
    pub info: TickInfo,
    /// The session as it stands after the tick
    pub snapshot: Snapshot,
}

impl TickResult {
    pub fn is_ended(&self) -> bool {
        self.status == SessionStatus::Ended
    }
}

/// Advances sessions one tick at a time. Owns the random source used to
/// place food.
pub struct GameEngine<R = rand::rngs::ThreadRng> {
    rng: R,
}

impl GameEngine<rand::rngs::ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl Default for GameEngine<rand::rngs::ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Start a fresh session
    pub fn new_session(&mut self) -> GameSession {
        let [head, rest @ ..] = START_CELLS;
        let snake = Snake::new(head, rest);
        let food = self.random_cell();

        GameSession::new(snake, START_DIRECTION, food)
    }

    /// Steer the session; reversals are ignored
    pub fn set_direction(&self, session: &mut GameSession, requested: Direction) -> bool {
        session.set_direction(requested)
    }

    /// Move the snake one grid step
    pub fn advance(&mut self, session: &mut GameSession) -> TickResult {
        if !session.is_running() {
            return Self::result(
                session,
                TickInfo {
                    ate_food: false,
                    collision: None,
                },
            );
        }

        let new_head = session.snake.head().moved_in_direction(session.direction());
        session.ticks += 1;

        if let Some(collision) = Self::check_collision(session, new_head) {
            session.end();
            session.collision = Some(collision);

            return Self::result(
                session,
                TickInfo {
                    ate_food: false,
                    collision: Some(collision),
                },
            );
        }

        session.snake.push_head(new_head);

        let ate_food = new_head == session.food;
        if ate_food {
            session.score += 1;
            // No exclusion check, food can land on the snake
            session.food = self.random_cell();
        } else {
            session.snake.drop_tail();
        }

        Self::result(
            session,
            TickInfo {
                ate_food,
                collision: None,
            },
        )
    }

    fn check_collision(session: &GameSession, new_head: Cell) -> Option<Collision> {
        if !new_head.is_in_bounds() {
            return Some(Collision::Wall);
        }

        if session.snake.contains(new_head) {
            return Some(Collision::SelfCollision);
        }

        None
    }

    /// Uniformly random grid-aligned cell on the board
    fn random_cell(&mut self) -> Cell {
        let column = self.rng.gen_range(0..GRID_COLUMNS);
        let row = self.rng.gen_range(0..GRID_ROWS);
        Cell::new(column * GRID_SIZE, row * GRID_SIZE)
    }

    fn result(session: &GameSession, info: TickInfo) -> TickResult {
        TickResult {
            status: session.status(),
            info,
            snapshot: session.snapshot(),
        }
    }
}
