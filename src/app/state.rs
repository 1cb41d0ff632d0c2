//! Application State and main controller module for dirpilot.
//!
//! This module defines the [AppState] struct, the single object owned by the event loop:
//! - Configuration and the keymap built from it
//! - [NavState] with the current listing, selection and scroll offset
//! - The footer [Status] and the active [Prompt], if any
//! - The current viewport metrics, updated every frame
//!
//! Every transition is a method on [AppState]. Nothing in here can end the event loop
//! except [KeypressResult::Quit]: all failures end up as status text.

use crate::app::NavState;
use crate::app::actions::{Prompt, Status};
use crate::app::keymap::{Action, Keymap};
use crate::config::Config;
use crate::core::proc::TerminalControl;
use crate::errors::ListError;
use crate::ui::layout::ViewportGeometry;

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Result of handling one key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypressResult {
    Continue,
    Quit,
}

/// Viewport metrics derived from the last frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutMetrics {
    pub list_height: usize,
    pub too_small: bool,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            list_height: 1,
            too_small: false,
        }
    }
}

/// Application state of the browser.
pub struct AppState<'a> {
    pub(super) config: &'a Config,
    pub(super) keymap: Keymap,
    pub(super) nav: NavState,
    pub(super) status: Status,
    pub(super) prompt: Option<Prompt>,
    pub(super) metrics: LayoutMetrics,
}

impl<'a> AppState<'a> {
    /// Starts browsing the current working directory.
    pub fn new(config: &'a Config) -> std::io::Result<Self> {
        let current_dir = std::env::current_dir()?;
        Ok(Self::from_dir(config, &current_dir))
    }

    /// Starts browsing `initial_path` and runs the initial refresh.
    pub fn from_dir(config: &'a Config, initial_path: &Path) -> Self {
        let mut app = Self {
            config,
            keymap: Keymap::from_config(config),
            nav: NavState::new(initial_path.to_path_buf()),
            status: Status::default(),
            prompt: None,
            metrics: LayoutMetrics::default(),
        };
        app.refresh(initial_path.to_path_buf(), None);
        if app.nav.entries().is_empty() && !app.status.is_error() {
            app.status.info("Directory is empty.");
        }
        app
    }

    // Getters / accessors

    #[inline]
    pub fn config(&self) -> &Config {
        self.config
    }

    #[inline]
    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    #[inline]
    pub fn status(&self) -> &Status {
        &self.status
    }

    #[inline]
    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    #[inline]
    pub fn metrics(&self) -> LayoutMetrics {
        self.metrics
    }

    /// Updates the viewport from the terminal area and re-clamps scrolling.
    ///
    /// Called once per frame before rendering, so a resize is picked up on the next draw.
    pub fn update_viewport(&mut self, area: Rect) {
        self.metrics = match ViewportGeometry::compute(area) {
            Some(geometry) => LayoutMetrics {
                list_height: geometry.list_height(),
                too_small: false,
            },
            None => LayoutMetrics {
                list_height: self.metrics.list_height,
                too_small: true,
            },
        };
        if !self.metrics.too_small {
            self.nav.clamp_scroll(self.metrics.list_height);
        }
    }

    /// Handles one key press and returns whether the loop should go on.
    ///
    /// A pending prompt receives every key. Otherwise the status is cleared and the key
    /// is dispatched through the keymap. While the terminal is too small only quit works.
    pub fn handle_keypress<T: TerminalControl + ?Sized>(
        &mut self,
        key: KeyEvent,
        term: &mut T,
    ) -> KeypressResult {
        if self.metrics.too_small {
            return if self.keymap.is_quit(key) {
                KeypressResult::Quit
            } else {
                KeypressResult::Continue
            };
        }

        if self.prompt.is_some() {
            self.handle_prompt_key(key);
            return KeypressResult::Continue;
        }

        self.status.clear();
        let Some(action) = self.keymap.lookup(key) else {
            return KeypressResult::Continue;
        };

        let height = self.metrics.list_height;
        match action {
            Action::Quit => return KeypressResult::Quit,
            Action::MoveUp => {
                self.nav.move_up();
            }
            Action::MoveDown => {
                self.nav.move_down();
            }
            Action::PageUp => self.nav.page_up(height),
            Action::PageDown => self.nav.page_down(height),
            Action::Open => self.handle_open(term),
            Action::Back => self.handle_back(),
            Action::Delete => self.prompt_delete(),
            Action::Rename => self.prompt_rename(),
            Action::Copy => self.prompt_copy(),
        }
        KeypressResult::Continue
    }

    /// Re-lists `path` and focuses `select_name` if given.
    ///
    /// The single convergence point after navigation, external programs and file operations.
    /// A failure replaces the status with the refresh error and leaves an empty listing.
    pub(crate) fn refresh(&mut self, path: PathBuf, select_name: Option<&OsStr>) -> bool {
        match self
            .nav
            .refresh(&path, select_name, self.metrics.list_height)
        {
            Ok(()) => true,
            Err(e) => {
                self.status.error(refresh_error(&e));
                false
            }
        }
    }

    pub(crate) fn refresh_current(&mut self, select_name: Option<&OsStr>) -> bool {
        let path = self.nav.current_dir().to_path_buf();
        self.refresh(path, select_name)
    }
}

fn refresh_error(e: &ListError) -> String {
    format!("Error refreshing: {}", e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::proc::tests::RecordingTerminal;

    use crossterm::event::{KeyCode, KeyModifiers};
    use std::error;
    use std::fs::File;
    use tempfile::tempdir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn from_dir_sets_initial_state() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("a.txt"))?;
        let config = Config::default();
        let app = AppState::from_dir(&config, dir.path());

        assert_eq!(app.nav().current_dir(), dir.path());
        assert_eq!(app.nav().entries().len(), 1);
        assert!(app.status().is_empty());
        assert!(app.prompt().is_none());
        Ok(())
    }

    #[test]
    fn empty_start_dir_says_so() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let config = Config::default();
        let app = AppState::from_dir(&config, dir.path());
        assert_eq!(app.status().text(), "Directory is empty.");
        assert!(!app.status().is_error());
        Ok(())
    }

    #[test]
    fn unmapped_key_clears_status() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let config = Config::default();
        let mut app = AppState::from_dir(&config, dir.path());
        let mut term = RecordingTerminal::default();

        let res = app.handle_keypress(key(KeyCode::Char('z')), &mut term);
        assert_eq!(res, KeypressResult::Continue);
        assert!(app.status().is_empty());
        assert!(term.calls.is_empty());
        Ok(())
    }

    #[test]
    fn too_small_only_accepts_quit() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        for name in ["a", "b", "c"] {
            File::create(dir.path().join(name))?;
        }
        let config = Config::default();
        let mut app = AppState::from_dir(&config, dir.path());
        let mut term = RecordingTerminal::default();

        app.update_viewport(Rect::new(0, 0, 10, 3));
        assert!(app.metrics().too_small);

        app.handle_keypress(key(KeyCode::Down), &mut term);
        assert_eq!(app.nav().selected_idx(), 0);
        assert_eq!(
            app.handle_keypress(key(KeyCode::Char('q')), &mut term),
            KeypressResult::Quit
        );

        app.update_viewport(Rect::new(0, 0, 80, 24));
        assert!(!app.metrics().too_small);
        assert_eq!(app.metrics().list_height, 20);
        app.handle_keypress(key(KeyCode::Down), &mut term);
        assert_eq!(app.nav().selected_idx(), 1);
        Ok(())
    }

    #[test]
    fn resize_reclamps_scroll() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        for i in 0..30 {
            File::create(dir.path().join(format!("f{i:02}")))?;
        }
        let config = Config::default();
        let mut app = AppState::from_dir(&config, dir.path());
        let mut term = RecordingTerminal::default();

        app.update_viewport(Rect::new(0, 0, 80, 40));
        for _ in 0..25 {
            app.handle_keypress(key(KeyCode::Down), &mut term);
        }
        assert_eq!(app.nav().scroll_offset(), 0);

        app.update_viewport(Rect::new(0, 0, 80, 10));
        let h = app.metrics().list_height;
        assert_eq!(h, 6);
        let nav = app.nav();
        assert!(nav.scroll_offset() <= nav.selected_idx());
        assert!(nav.selected_idx() < nav.scroll_offset() + h);
        Ok(())
    }
}
