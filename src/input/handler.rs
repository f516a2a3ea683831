use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::game::Direction;
use crate::layout::button_at;

use super::InputEvent;

/// Pointer travel units per terminal cell. Cells are roughly twice as tall
/// as they are wide, so rows count double.
const UNITS_PER_COLUMN: f32 = 4.0;
const UNITS_PER_ROW: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    Game(InputEvent),
    Quit,
    None,
}

pub struct InputHandler {
    pointer_start: Option<(u16, u16)>,
    /// Terminal area the direction buttons are laid out in
    screen: Rect,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            pointer_start: None,
            screen: Rect::default(),
        }
    }

    pub fn set_screen(&mut self, screen: Rect) {
        self.screen = screen;
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Game(InputEvent::Turn(Direction::Up)),
            KeyCode::Down => KeyAction::Game(InputEvent::Turn(Direction::Down)),
            KeyCode::Left => KeyAction::Game(InputEvent::Turn(Direction::Left)),
            KeyCode::Right => KeyAction::Game(InputEvent::Turn(Direction::Right)),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => {
                KeyAction::Game(InputEvent::Turn(Direction::Up))
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                KeyAction::Game(InputEvent::Turn(Direction::Down))
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                KeyAction::Game(InputEvent::Turn(Direction::Left))
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::Game(InputEvent::Turn(Direction::Right))
            }

            // Controls
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => {
                KeyAction::Game(InputEvent::TogglePause)
            }
            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => {
                KeyAction::Game(InputEvent::Restart)
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }

    /// Track a left-button press and release as one pointer gesture.
    ///
    /// A press on a direction button turns right away. Any other press
    /// emits a swipe event (which may turn out to be a tap) on release.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Option<InputEvent> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(direction) = button_at(self.screen, mouse.column, mouse.row) {
                    self.pointer_start = None;
                    return Some(InputEvent::Turn(direction));
                }
                self.pointer_start = Some((mouse.column, mouse.row));
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let (start_col, start_row) = self.pointer_start.take()?;
                let dx = (f32::from(mouse.column) - f32::from(start_col)) * UNITS_PER_COLUMN;
                let dy = (f32::from(mouse.row) - f32::from(start_row)) * UNITS_PER_ROW;
                Some(InputEvent::Swipe { dx, dy })
            }
            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        for (code, dir) in [
            (KeyCode::Up, Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Right, Direction::Right),
        ] {
            assert_eq!(
                handler.handle_key_event(key(code)),
                KeyAction::Game(InputEvent::Turn(dir))
            );
        }
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(key(KeyCode::Char('w'))),
            KeyAction::Game(InputEvent::Turn(Direction::Up))
        );
        assert_eq!(
            handler.handle_key_event(key(KeyCode::Char('a'))),
            KeyAction::Game(InputEvent::Turn(Direction::Left))
        );

        let s_upper = KeyEvent::new(KeyCode::Char('S'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(s_upper),
            KeyAction::Game(InputEvent::Turn(Direction::Down))
        );
    }

    #[test]
    fn test_control_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(key(KeyCode::Char('p'))),
            KeyAction::Game(InputEvent::TogglePause)
        );
        assert_eq!(
            handler.handle_key_event(key(KeyCode::Enter)),
            KeyAction::Game(InputEvent::Restart)
        );
        assert_eq!(handler.handle_key_event(key(KeyCode::Esc)), KeyAction::Quit);
        assert_eq!(
            handler.handle_key_event(key(KeyCode::Char('x'))),
            KeyAction::None
        );

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_drag_becomes_swipe() {
        let mut handler = InputHandler::new();

        assert_eq!(
            handler.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 5)),
            None
        );
        assert_eq!(
            handler.handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 4, 6)),
            Some(InputEvent::Swipe { dx: -24.0, dy: 8.0 })
        );
    }

    #[test]
    fn test_button_click_turns() {
        let mut handler = InputHandler::new();
        handler.set_screen(Rect::new(0, 0, 60, 20));

        // Up button spans columns 18..23 on row 17
        assert_eq!(
            handler.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 20, 17)),
            Some(InputEvent::Turn(Direction::Up))
        );
        assert_eq!(
            handler.handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 20, 17)),
            None
        );

        assert_eq!(
            handler.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 37, 17)),
            Some(InputEvent::Turn(Direction::Right))
        );

        // Off the buttons it is still a drag
        assert_eq!(
            handler.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 20, 10)),
            None
        );
        assert_eq!(
            handler.handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 20, 10)),
            Some(InputEvent::Swipe { dx: 0.0, dy: 0.0 })
        );
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut handler = InputHandler::new();
        assert_eq!(
            handler.handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 4, 6)),
            None
        );
        assert_eq!(
            handler.handle_mouse_event(mouse(MouseEventKind::Moved, 4, 6)),
            None
        );
    }
}
