use std::collections::HashSet;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{Direction, Position, SessionStatus};
use crate::layout::{COLUMNS_PER_TILE, direction_buttons, screen_sections};
use crate::session::Snapshot;

/// Draws a [`Snapshot`]; never touches the session itself
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot) {
        let screen = frame.area();
        let [header, game_area, footer] = screen_sections(screen);

        frame.render_widget(self.render_stats(snapshot), header);

        let board_width = u16::try_from(snapshot.grid.width)
            .unwrap_or(u16::MAX)
            .saturating_mul(COLUMNS_PER_TILE)
            .saturating_add(2);
        let board_height = u16::try_from(snapshot.grid.height)
            .unwrap_or(u16::MAX)
            .saturating_add(2);
        let board_area = centered(game_area, board_width, board_height);
        frame.render_widget(self.render_grid(snapshot, board_area), board_area);

        match snapshot.status {
            SessionStatus::Paused => self.render_overlay(frame, board_area, self.paused_text()),
            SessionStatus::GameOver | SessionStatus::Won => {
                self.render_overlay(frame, board_area, self.game_over_text(snapshot))
            }
            SessionStatus::AwaitingInput | SessionStatus::Running => {}
        }

        for (direction, area) in direction_buttons(screen) {
            frame.render_widget(self.render_button(direction), area);
        }
        let help = Rect::new(
            footer.x,
            footer.y.saturating_add(1),
            footer.width,
            footer.height.saturating_sub(1),
        );
        frame.render_widget(self.render_controls(), help);
    }

    /// Only the tiles that fit inside `area` are drawn
    fn render_grid(&self, snapshot: &Snapshot, area: Rect) -> Paragraph<'_> {
        let head = snapshot.snake.first().copied();
        let body: HashSet<Position> = snapshot.snake.iter().skip(1).copied().collect();
        let rows = snapshot.grid.height.min(u32::from(area.height.saturating_sub(2)));
        let columns = snapshot
            .grid
            .width
            .min(u32::from(area.width.saturating_sub(2) / COLUMNS_PER_TILE));
        let mut lines = Vec::with_capacity(rows as usize);

        for y in 0..rows as i32 {
            let mut spans = Vec::with_capacity(columns as usize);

            for x in 0..columns as i32 {
                let pos = Position::new(x, y);

                let cell = if Some(pos) == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::LightGreen)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if body.contains(&pos) {
                    Span::styled("■ ", Style::default().fg(Color::Green))
                } else if Some(pos) == snapshot.food {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled("· ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("High: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.high_score.to_string(),
                Style::default().fg(Color::Gray),
            ),
            Span::raw("    "),
            Span::styled("Tick: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}ms", snapshot.tick_interval.as_millis()),
                Style::default().fg(Color::Gray),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_overlay(&self, frame: &mut Frame, board: Rect, text: Vec<Line<'static>>) {
        let area = centered(board, board.width.min(36), (text.len() as u16 + 2).min(board.height));
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(text).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            ),
            area,
        );
    }

    fn paused_text(&self) -> Vec<Line<'static>> {
        vec![
            Line::from(Span::styled(
                "Paused",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Double-click or press P",
                Style::default().fg(Color::Gray),
            )),
        ]
    }

    fn game_over_text(&self, snapshot: &Snapshot) -> Vec<Line<'static>> {
        let title = if snapshot.status == SessionStatus::Won {
            "Board Cleared"
        } else {
            "Game Over"
        };

        vec![
            Line::from(Span::styled(
                title,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.high_score.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Click or press Enter to restart",
                Style::default().fg(Color::Gray),
            )),
        ]
    }

    fn render_button(&self, direction: Direction) -> Paragraph<'_> {
        let arrow = match direction {
            Direction::Up => "↑",
            Direction::Down => "↓",
            Direction::Left => "←",
            Direction::Right => "→",
        };

        Paragraph::new(Line::from(vec![
            Span::styled("[ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                arrow,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ]", Style::default().fg(Color::DarkGray)),
        ]))
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" / "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" / drag / click to move | "),
            Span::styled("P", Style::default().fg(Color::Cyan)),
            Span::raw(" pause | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width` x `height` rect centered in `area`, clipped to it
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Grid;
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Duration;

    fn snapshot(status: SessionStatus) -> Snapshot {
        Snapshot {
            grid: Grid::new(8, 6),
            snake: vec![Position::new(3, 2), Position::new(2, 2)],
            food: Some(Position::new(6, 4)),
            score: 4,
            high_score: 11,
            status,
            tick_interval: Duration::from_millis(152),
        }
    }

    fn rendered(snapshot: &Snapshot) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, snapshot))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_hud_shows_scores() {
        let screen = rendered(&snapshot(SessionStatus::Running));
        assert!(screen.contains("Score: 4"));
        assert!(screen.contains("High: 11"));
        assert!(screen.contains("152ms"));
        assert!(screen.contains("●"));
        assert!(!screen.contains("Game Over"));
    }

    #[test]
    fn test_overlays() {
        assert!(rendered(&snapshot(SessionStatus::Paused)).contains("Paused"));
        assert!(rendered(&snapshot(SessionStatus::GameOver)).contains("Game Over"));
        assert!(rendered(&snapshot(SessionStatus::Won)).contains("Board Cleared"));
    }

    #[test]
    fn test_direction_buttons_drawn() {
        let screen = rendered(&snapshot(SessionStatus::Running));
        for button in ["[ ↑ ]", "[ ↓ ]", "[ ← ]", "[ → ]"] {
            assert!(screen.contains(button), "missing {button}");
        }
    }

    #[test]
    fn test_oversized_grid_is_clipped() {
        let mut wide = snapshot(SessionStatus::Running);
        wide.grid = Grid::new(40_000, 2);
        assert!(rendered(&wide).contains("Score: 4"));

        let mut huge = snapshot(SessionStatus::GameOver);
        huge.grid = Grid::new(u32::MAX, 70_000);
        huge.snake = vec![Position::new(0, 0)];
        huge.food = None;
        assert!(rendered(&huge).contains("Game Over"));
    }

    #[test]
    fn test_centered_clips() {
        let area = Rect::new(0, 0, 10, 4);
        assert_eq!(centered(area, 4, 2), Rect::new(3, 1, 4, 2));
        assert_eq!(centered(area, 40, 40), area);
    }
}
