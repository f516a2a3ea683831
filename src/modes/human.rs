use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::info;

use crate::game::GameConfig;
use crate::input::{InputHandler, KeyAction};
use crate::layout::grid_for_area;
use crate::notify::Notifier;
use crate::render::Renderer;
use crate::session::GameSession;
use crate::store::ScoreStore;

/// Frame callback rate; the simulation runs at its own tick interval
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// How the terminal front-end picks the board size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanOptions {
    /// Follow the terminal size instead of the configured grid
    pub fit_to_terminal: bool,
}

pub struct HumanMode {
    session: GameSession,
    renderer: Renderer,
    input_handler: InputHandler,
    options: HumanOptions,
    started: Instant,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(
        config: GameConfig,
        options: HumanOptions,
        store: Box<dyn ScoreStore>,
        notifier: Box<dyn Notifier>,
    ) -> Result<Self> {
        let session = GameSession::new(config, store, notifier, Duration::ZERO)
            .context("Invalid game configuration")?;

        Ok(Self {
            session,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            options,
            started: Instant::now(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let (columns, rows) = crossterm::terminal::size().context("Failed to read terminal size")?;
        self.screen_resized(columns, rows);

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    /// Time since the mode started; the session's timebase
    fn now(&self) -> Duration {
        self.started.elapsed()
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut frame_timer = interval(FRAME_INTERVAL);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Frame: run due ticks, then draw
                _ = frame_timer.tick() => {
                    if self.session.wants_frames() {
                        let now = self.now();
                        self.session.frame(now);
                    }
                    let snapshot = self.session.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        let snapshot = self.session.snapshot();
        info!(score = snapshot.score, high_score = snapshot.high_score, "Quit");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let now = self.now();
        match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match self.input_handler.handle_key_event(key) {
                    KeyAction::Game(input) => {
                        self.session.handle(input, now);
                    }
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::None => {}
                }
            }
            Event::Mouse(mouse) => {
                if let Some(input) = self.input_handler.handle_mouse_event(mouse) {
                    self.session.handle(input, now);
                }
            }
            Event::Resize(columns, rows) => self.screen_resized(columns, rows),
            _ => {}
        }
    }

    fn screen_resized(&mut self, columns: u16, rows: u16) {
        self.input_handler.set_screen(Rect::new(0, 0, columns, rows));
        if self.options.fit_to_terminal {
            let now = self.now();
            self.session.resize(grid_for_area(columns, rows), now);
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
