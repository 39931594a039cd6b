//! Terminal front end: one session at a fixed tick rate.
//!
//! Each tick drains the keys queued since the previous tick, advances the
//! engine one step and draws the result. Whether the snake crashes or the
//! player quits, the game-over panel stays up for [`GAME_OVER_HOLD`] before
//! `run` returns.

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use rand::Rng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::collections::VecDeque;
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval, sleep};
use tracing::{debug, info, trace};

use crate::game::{
    Collision, GameEngine, GameSession, Snapshot, TickResult,
    config::{GAME_OVER_HOLD, tick_interval},
};
use crate::input::{InputEvent, InputHandler};
use crate::render::Renderer;

type Tui = Terminal<CrosstermBackend<Stderr>>;

/// How a run finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOutcome {
    pub score: u32,
    pub elapsed: Duration,
    /// `None` when the player quit before crashing
    pub collision: Option<Collision>,
}

pub struct App<R = rand::rngs::ThreadRng> {
    engine: GameEngine<R>,
    session: GameSession,
    renderer: Renderer,
    input_handler: InputHandler,
    pending: VecDeque<InputEvent>,
    should_quit: bool,
}

impl App<rand::rngs::ThreadRng> {
    pub fn new() -> Self {
        Self::with_engine(GameEngine::new())
    }
}

impl Default for App<rand::rngs::ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> App<R> {
    pub fn with_engine(mut engine: GameEngine<R>) -> Self {
        let session = engine.new_session();

        Self {
            engine,
            session,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            pending: VecDeque::new(),
            should_quit: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub async fn run(&mut self) -> Result<GameOutcome> {
        info!(
            food_x = self.session.food.x,
            food_y = self.session.food.y,
            "session started"
        );

        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        Self::cleanup_terminal(&mut terminal)?;

        result?;
        Ok(self.outcome())
    }

    async fn run_game_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(tick_interval());
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                // Queue terminal events until the next tick
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                _ = tick_timer.tick() => {
                    if let Some(result) = self.tick() {
                        self.draw(terminal, &result.snapshot)?;

                        if result.is_ended() {
                            break;
                        }
                    }
                }

                // SIGINT from outside the terminal
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                self.session.end();
                info!(
                    score = self.session.score,
                    elapsed_secs = self.session.elapsed().as_secs(),
                    "player quit"
                );
                break;
            }
        }

        self.draw(terminal, &self.session.snapshot())?;
        self.hold_game_over().await;

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            match self.input_handler.handle_key_event(key) {
                InputEvent::Ignored => {}
                input => self.pending.push_back(input),
            }
        }
    }

    /// Apply queued input in arrival order, then advance one step.
    /// A queued quit ends the session instead and returns `None`.
    fn tick(&mut self) -> Option<TickResult> {
        while let Some(input) = self.pending.pop_front() {
            match input {
                InputEvent::Turn(direction) => {
                    if !self.engine.set_direction(&mut self.session, direction) {
                        trace!(?direction, "reversal ignored");
                    }
                }
                InputEvent::Quit => {
                    self.pending.clear();
                    self.should_quit = true;
                    self.session.end();
                    return None;
                }
                InputEvent::Ignored => {}
            }
        }

        let result = self.engine.advance(&mut self.session);

        if result.info.ate_food {
            debug!(
                score = result.snapshot.score,
                length = result.snapshot.snake.len(),
                food_x = result.snapshot.food.x,
                food_y = result.snapshot.food.y,
                "food eaten"
            );
        }

        if let Some(collision) = result.info.collision {
            info!(
                ?collision,
                score = self.session.score,
                ticks = self.session.ticks(),
                elapsed_secs = self.session.elapsed().as_secs(),
                "game over"
            );
        }

        Some(result)
    }

    fn draw(&self, terminal: &mut Tui, snapshot: &Snapshot) -> Result<()> {
        terminal
            .draw(|frame| self.renderer.render(frame, snapshot))
            .context("Failed to draw frame")?;
        Ok(())
    }

    async fn hold_game_over(&self) {
        tokio::select! {
            _ = sleep(GAME_OVER_HOLD) => {}
            _ = tokio::signal::ctrl_c() => {}
        }
    }

    fn outcome(&self) -> GameOutcome {
        GameOutcome {
            score: self.session.score,
            elapsed: self.session.elapsed(),
            collision: self.session.collision(),
        }
    }

    fn cleanup_terminal(terminal: &mut Tui) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Direction, SessionStatus};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use rand::{SeedableRng, rngs::StdRng};
    use ratatui::{backend::TestBackend, buffer::Buffer};

    fn app() -> App<StdRng> {
        let mut app = App::with_engine(GameEngine::with_rng(StdRng::seed_from_u64(3)));
        // Keep food out of the snake's way
        app.session.food = Cell::new(0, 380);
        app
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let app = app();
        assert!(app.session().is_running());
        assert_eq!(app.session().score, 0);
        assert_eq!(app.session().snake.len(), 3);
    }

    #[test]
    fn test_tick_without_input_moves_forward() {
        let mut app = app();

        let result = app.tick().expect("tick should advance");

        assert!(!result.is_ended());
        assert_eq!(app.session().snake.head(), Cell::new(120, 100));
    }

    #[test]
    fn test_queued_turn_applies_before_advance() {
        let mut app = app();
        app.handle_event(key(KeyCode::Down));

        app.tick();

        assert_eq!(app.session().direction(), Direction::Down);
        assert_eq!(app.session().snake.head(), Cell::new(100, 120));
        assert!(app.pending.is_empty());
    }

    #[test]
    fn test_turns_apply_in_order() {
        let mut app = app();
        // Up is accepted, then Left is no longer a reversal and
        // steers the head straight into the body
        app.handle_event(key(KeyCode::Up));
        app.handle_event(key(KeyCode::Left));

        let result = app.tick().expect("tick should advance");

        assert_eq!(app.session().direction(), Direction::Left);
        assert!(result.is_ended());
        assert_eq!(result.info.collision, Some(Collision::SelfCollision));
        assert_eq!(app.session().snake.head(), Cell::new(100, 100));
    }

    #[test]
    fn test_reversal_key_is_ignored() {
        let mut app = app();
        app.handle_event(key(KeyCode::Left));

        app.tick();

        assert_eq!(app.session().direction(), Direction::Right);
        assert_eq!(app.session().snake.head(), Cell::new(120, 100));
    }

    #[test]
    fn test_quit_stops_before_advance() {
        let mut app = app();
        app.handle_event(key(KeyCode::Char('q')));

        assert!(app.tick().is_none());
        assert!(app.should_quit);
        assert_eq!(app.session().snake.head(), Cell::new(100, 100));
        assert_eq!(app.session().ticks(), 0);
    }

    #[test]
    fn test_quit_ends_on_game_over_panel() {
        let mut app = app();
        app.tick();
        app.handle_event(key(KeyCode::Char('q')));

        assert!(app.tick().is_none());

        let snapshot = app.session().snapshot();
        assert_eq!(snapshot.status, SessionStatus::Ended);
        assert_eq!(snapshot.collision, None);
        assert_eq!(snapshot.snake[0], Cell::new(120, 100));

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| app.renderer.render(frame, &snapshot))
            .unwrap();
        let buffer: &Buffer = terminal.backend().buffer();
        let content: String = buffer.content.iter().map(|cell| cell.symbol()).collect();
        assert!(content.contains("Game Over"));
        assert!(content.contains("Final Score: 0"));
    }

    #[test]
    fn test_outcome_time_stops_at_quit() {
        let mut app = app();
        app.handle_event(key(KeyCode::Esc));
        app.tick();

        let first = app.outcome();
        std::thread::sleep(Duration::from_millis(20));
        let second = app.outcome();

        assert_eq!(first.elapsed, second.elapsed);
        assert_eq!(second.collision, None);
    }

    #[test]
    fn test_unmapped_keys_are_not_queued() {
        let mut app = app();
        app.handle_event(key(KeyCode::Char('x')));
        app.handle_event(Event::FocusGained);

        assert!(app.pending.is_empty());
    }

    #[test]
    fn test_outcome_reports_crash() {
        let mut app = app();
        // Head starts at x=100; 25 steps right reach x=600
        let mut last = None;
        for _ in 0..25 {
            last = app.tick();
        }

        let result = last.expect("tick should advance");
        assert!(result.is_ended());

        let outcome = app.outcome();
        assert_eq!(outcome.collision, Some(Collision::Wall));
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.elapsed, result.snapshot.elapsed);
    }
}
