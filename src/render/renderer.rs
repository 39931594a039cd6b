use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{
    Cell, Snapshot,
    config::{GRID_COLUMNS, GRID_ROWS},
};

/// Terminal columns per grid square; keeps squares roughly square
const COLUMNS_PER_SQUARE: u16 = 2;

const BOARD_WIDTH: u16 = GRID_COLUMNS as u16 * COLUMNS_PER_SQUARE + 2;
const BOARD_HEIGHT: u16 = GRID_ROWS as u16 + 2;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot) {
        let area = frame.area();
        if area.width < BOARD_WIDTH || area.height < BOARD_HEIGHT {
            frame.render_widget(self.render_too_small(area), area);
            return;
        }

        let board = centered(area, BOARD_WIDTH, BOARD_HEIGHT);
        frame.render_widget(self.render_grid(snapshot), board);

        let inner = Rect::new(board.x + 1, board.y + 1, board.width - 2, board.height - 2);
        let (stats, stats_width) = self.render_stats(snapshot);
        let stats_area = Rect::new(inner.x, inner.y, stats_width.min(inner.width), 2);
        frame.render_widget(Clear, stats_area);
        frame.render_widget(stats, stats_area);

        if !snapshot.is_running() {
            let (game_over, width) = self.render_game_over(snapshot);
            let popup = centered(inner, width.min(inner.width), 4);
            frame.render_widget(Clear, popup);
            frame.render_widget(game_over, popup);
        }
    }

    fn render_grid(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        let empty = Span::styled(". ", Style::default().fg(Color::DarkGray));
        let mut rows = vec![vec![empty; GRID_COLUMNS as usize]; GRID_ROWS as usize];

        let mut paint = |cell: Cell, span: Span<'static>| {
            let (column, row) = cell.grid_square();
            if (0..GRID_COLUMNS).contains(&column) && (0..GRID_ROWS).contains(&row) {
                rows[row as usize][column as usize] = span;
            }
        };

        for segment in snapshot.snake.iter().skip(1) {
            paint(
                *segment,
                Span::styled("□ ", Style::default().fg(Color::Green)),
            );
        }

        if let Some(head) = snapshot.head() {
            paint(
                head,
                Span::styled(
                    "■ ",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
            );
        }

        // Food is drawn last, so it stays visible even when it lands on the snake
        paint(
            snapshot.food,
            Span::styled(
                "● ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        );

        let lines: Vec<Line> = rows.into_iter().map(Line::from).collect();

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    /// Score and time panel, plus the width it needs
    fn render_stats(&self, snapshot: &Snapshot) -> (Paragraph<'static>, u16) {
        let score = format!(" Score: {} ", snapshot.score);
        let time = format!(" Time: {}s ", snapshot.elapsed.as_secs());
        let width = score.chars().count().max(time.chars().count()) as u16;

        let text = vec![
            Line::from(Span::styled(score, Style::default().fg(Color::White))),
            Line::from(Span::styled(time, Style::default().fg(Color::White))),
        ];

        (Paragraph::new(text).style(overlay_style()), width)
    }

    fn render_game_over(&self, snapshot: &Snapshot) -> (Paragraph<'static>, u16) {
        let final_score = format!("Final Score: {}", snapshot.score);
        let width = final_score.chars().count() as u16 + 4;

        let text = vec![
            Line::from(Span::styled(
                "Game Over",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(final_score, Style::default().fg(Color::White))),
        ];

        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(overlay_style())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            );

        (paragraph, width)
    }

    fn render_too_small(&self, _area: Rect) -> Paragraph<'static> {
        Paragraph::new(vec![
            Line::from("Terminal too small"),
            Line::from(format!("need {}x{}", BOARD_WIDTH, BOARD_HEIGHT)),
        ])
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Stand-in for a translucent panel
fn overlay_style() -> Style {
    Style::default().bg(Color::DarkGray)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
