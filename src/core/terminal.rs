//! Terminal rendering and event loop for dirpilot.
//!
//! Handles setup/teardown of raw mode, alternate screen, redraws,
//! and events (keypress, resize) to app logic.
//!
//! The loop is synchronous: draw, block on the next event, dispatch. External
//! programs run inside a key handler and get the terminal through [CrosstermTerminal].

use crate::app::{AppState, KeypressResult};
use crate::core::proc::TerminalControl;
use crate::ui;

use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use std::io::{self, Stdout};

/// The real terminal, as handed to the process bridge.
pub struct CrosstermTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl CrosstermTerminal {
    /// Enters raw mode and the alternate screen.
    pub fn setup() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }

    /// Leaves raw mode and the alternate screen for good.
    pub fn teardown(mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, Show)
    }
}

impl TerminalControl for CrosstermTerminal {
    fn release(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, Show)
    }

    fn restore(&mut self) -> io::Result<()> {
        execute!(self.terminal.backend_mut(), EnterAlternateScreen, Hide)?;
        enable_raw_mode()?;
        // whatever the child printed is gone, force a full repaint
        self.terminal.clear()
    }
}

/// Initializes the terminal in raw mode and alternate screen and runs the main event loop.
///
/// Blocks until quit. Handles all input and UI rendering.
///
/// Returns an std::io::Error if terminal setup or teardown fails, or the terminal
/// stops being usable while running.
pub fn run_terminal(app: &mut AppState) -> io::Result<()> {
    let mut term = CrosstermTerminal::setup()?;
    tracing::info!("terminal ready");

    let result = event_loop(&mut term, app);

    term.teardown()?;
    tracing::info!("terminal restored, exiting");
    result
}

/// Main event loop of dirpilot: draws the UI, blocks for the next event and dispatches it.
/// Returns on quit.
fn event_loop(term: &mut CrosstermTerminal, app: &mut AppState) -> io::Result<()> {
    loop {
        draw(&mut term.terminal, app)?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if app.handle_keypress(key, term) == KeypressResult::Quit {
                    break;
                }
            }
            // the next draw picks up the new size
            Event::Resize(_, _) => {}
            _ => {}
        }
    }
    Ok(())
}

/// Draws one frame. The viewport is updated from the frame area first, so the
/// selection is re-clamped before anything is rendered.
pub fn draw<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState) -> Result<(), B::Error> {
    terminal.draw(|f| {
        app.update_viewport(f.area());
        ui::render(f, app);
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use ratatui::backend::TestBackend;
    use std::error;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn draw_updates_viewport() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        for i in 0..12 {
            File::create(dir.path().join(format!("f{i:02}")))?;
        }
        let config = Config::default();
        let mut app = AppState::from_dir(&config, dir.path());
        let mut terminal = Terminal::new(TestBackend::new(60, 9))?;

        draw(&mut terminal, &mut app)?;
        assert_eq!(app.metrics().list_height, 5);
        assert!(!app.metrics().too_small);

        terminal.backend_mut().resize(10, 3);
        draw(&mut terminal, &mut app)?;
        assert!(app.metrics().too_small);
        Ok(())
    }
}
