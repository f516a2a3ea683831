use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::action::Direction;

/// Board dimensions in tiles. Edges wrap around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    pub width: u32,
    pub height: u32,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of tiles on the board
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn center(&self) -> Position {
        Position::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    /// Step one tile from `pos`, re-entering from the opposite edge
    pub fn wrapped_step(&self, pos: Position, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position::new(
            (pos.x + dx).rem_euclid(self.width as i32),
            (pos.y + dy).rem_euclid(self.height as i32),
        )
    }
}

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Position>,
}

impl Snake {
    /// A single-segment snake
    pub fn new(head: Position) -> Self {
        Self {
            body: VecDeque::from([head]),
        }
    }

    /// Build a snake from head-first segments.
    ///
    /// Returns `None` for an empty body.
    pub fn from_segments(segments: impl IntoIterator<Item = Position>) -> Option<Self> {
        let body: VecDeque<Position> = segments.into_iter().collect();
        if body.is_empty() {
            None
        } else {
            Some(Self { body })
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Whether any segment, tail included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    pub(crate) fn push_head(&mut self, head: Position) {
        self.body.push_front(head);
    }

    pub(crate) fn pop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop_back();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Never true for a snake built through this API
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Lifecycle of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Ticking, but the snake rests until the first direction arrives
    AwaitingInput,
    Running,
    Paused,
    /// The snake bit itself
    GameOver,
    /// The snake covers every tile; nowhere is left for food
    Won,
}

impl SessionStatus {
    /// GameOver or Won
    pub fn is_finished(&self) -> bool {
        matches!(self, SessionStatus::GameOver | SessionStatus::Won)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_step() {
        let grid = Grid::new(10, 8);
        let pos = Position::new(5, 5);
        assert_eq!(grid.wrapped_step(pos, Direction::Right), Position::new(6, 5));
        assert_eq!(grid.wrapped_step(pos, Direction::Up), Position::new(5, 4));

        assert_eq!(
            grid.wrapped_step(Position::new(9, 3), Direction::Right),
            Position::new(0, 3)
        );
        assert_eq!(
            grid.wrapped_step(Position::new(0, 3), Direction::Left),
            Position::new(9, 3)
        );
        assert_eq!(
            grid.wrapped_step(Position::new(4, 0), Direction::Up),
            Position::new(4, 7)
        );
        assert_eq!(
            grid.wrapped_step(Position::new(4, 7), Direction::Down),
            Position::new(4, 0)
        );
    }

    #[test]
    fn test_grid_helpers() {
        let grid = Grid::new(10, 7);
        assert_eq!(grid.area(), 70);
        assert_eq!(grid.center(), Position::new(5, 3));
        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(9, 6)));
        assert!(!grid.contains(Position::new(10, 0)));
        assert!(!grid.contains(Position::new(0, -1)));
    }

    #[test]
    fn test_snake_segments() {
        let snake = Snake::from_segments([
            Position::new(2, 2),
            Position::new(1, 2),
            Position::new(0, 2),
        ])
        .unwrap();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(2, 2));
        assert_eq!(snake.segments().last(), Some(Position::new(0, 2)));
        assert!(snake.occupies(Position::new(0, 2)));
        assert!(!snake.occupies(Position::new(3, 2)));

        assert!(Snake::from_segments([]).is_none());
    }

    #[test]
    fn test_snake_never_empties() {
        let mut snake = Snake::new(Position::new(1, 1));
        snake.pop_tail();
        assert_eq!(snake.len(), 1);

        snake.push_head(Position::new(2, 1));
        snake.pop_tail();
        assert_eq!(snake.segments().collect::<Vec<_>>(), vec![Position::new(2, 1)]);
    }

    #[test]
    fn test_finished_statuses() {
        assert!(SessionStatus::GameOver.is_finished());
        assert!(SessionStatus::Won.is_finished());
        assert!(!SessionStatus::Paused.is_finished());
        assert!(!SessionStatus::AwaitingInput.is_finished());
    }
}
