//! Screen geometry shared by the renderer and pointer input.

use ratatui::layout::{Constraint, Layout, Position as Cell, Rect};

use crate::game::{Direction, Grid, MAX_GRID_SIDE};

/// Terminal columns per tile; rows are one line each
pub const COLUMNS_PER_TILE: u16 = 2;
/// Width of one on-screen direction button, `[ ↑ ]`
pub const BUTTON_WIDTH: u16 = 5;
const BUTTON_GAP: u16 = 1;
const HEADER_ROWS: u16 = 3;
/// Button row plus the help line
const FOOTER_ROWS: u16 = 3;
/// Board border, top and bottom or left and right
const BORDER: u16 = 2;

/// Header, board area and footer of a screen
pub fn screen_sections(screen: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Length(HEADER_ROWS),
        Constraint::Min(0),
        Constraint::Length(FOOTER_ROWS),
    ])
    .areas(screen)
}

/// The ↑ ↓ ← → buttons, centered on the first footer row
pub fn direction_buttons(screen: Rect) -> [(Direction, Rect); 4] {
    let [_, _, footer] = screen_sections(screen);
    let row_width = BUTTON_WIDTH * 4 + BUTTON_GAP * 3;
    let left = footer.x + footer.width.saturating_sub(row_width) / 2;

    let button = |slot: u16| {
        let x = left.saturating_add(slot * (BUTTON_WIDTH + BUTTON_GAP));
        Rect::new(x, footer.y, BUTTON_WIDTH, footer.height.min(1)).intersection(footer)
    };

    [
        (Direction::Up, button(0)),
        (Direction::Down, button(1)),
        (Direction::Left, button(2)),
        (Direction::Right, button(3)),
    ]
}

/// Which direction button, if any, covers the cell at `column`, `row`
pub fn button_at(screen: Rect, column: u16, row: u16) -> Option<Direction> {
    direction_buttons(screen)
        .into_iter()
        .find(|(_, rect)| rect.contains(Cell::new(column, row)))
        .map(|(direction, _)| direction)
}

/// Largest square grid that fits the terminal, never smaller than 2x2
pub fn grid_for_area(columns: u16, rows: u16) -> Grid {
    let across = columns.saturating_sub(BORDER) / COLUMNS_PER_TILE;
    let down = rows.saturating_sub(HEADER_ROWS + FOOTER_ROWS + BORDER);
    let side = u32::from(across.min(down)).clamp(2, MAX_GRID_SIDE);
    Grid::new(side, side)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_grid() {
        assert_eq!(grid_for_area(80, 24), Grid::new(16, 16));
        assert_eq!(grid_for_area(202, 60), Grid::new(52, 52));
        assert_eq!(grid_for_area(30, 60), Grid::new(14, 14));
    }

    #[test]
    fn test_tiny_terminal() {
        assert_eq!(grid_for_area(0, 0), Grid::new(2, 2));
        assert_eq!(grid_for_area(5, 7), Grid::new(2, 2));
    }

    #[test]
    fn test_huge_terminal_is_capped() {
        let grid = grid_for_area(u16::MAX, u16::MAX);
        assert_eq!(grid, Grid::new(MAX_GRID_SIDE, MAX_GRID_SIDE));
    }

    #[test]
    fn test_button_row() {
        let screen = Rect::new(0, 0, 60, 20);
        let buttons = direction_buttons(screen);

        // 23 columns of buttons centered in 60, on the first footer row
        assert_eq!(buttons[0], (Direction::Up, Rect::new(18, 17, 5, 1)));
        assert_eq!(buttons[3], (Direction::Right, Rect::new(36, 17, 5, 1)));

        assert_eq!(button_at(screen, 18, 17), Some(Direction::Up));
        assert_eq!(button_at(screen, 26, 17), Some(Direction::Down));
        assert_eq!(button_at(screen, 32, 17), Some(Direction::Left));
        assert_eq!(button_at(screen, 40, 17), Some(Direction::Right));
        assert_eq!(button_at(screen, 23, 17), None);
        assert_eq!(button_at(screen, 18, 18), None);
        assert_eq!(button_at(screen, 18, 5), None);
    }

    #[test]
    fn test_no_buttons_on_an_empty_screen() {
        assert_eq!(button_at(Rect::default(), 0, 0), None);
    }
}
