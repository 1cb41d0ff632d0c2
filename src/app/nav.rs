//! Navigation state and file list logic for dirpilot.
//!
//! Owns the current directory, its entries, the selection and the scroll offset.
//! Every directory change goes through [NavState::replace] or [NavState::refresh],
//! which swap the whole listing at once.
//!
//! Invariants kept by every method here:
//! - `selected < entries.len()` when there are entries, `selected == 0` otherwise
//! - after [NavState::clamp_scroll] with height `h > 0`:
//!   `scroll <= selected <= scroll + h - 1`

use crate::core::{DirEntry, list_dir};
use crate::errors::ListError;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Holds the navigation, selection and file list state of the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavState {
    current_dir: PathBuf,
    entries: Vec<DirEntry>,
    selected: usize,
    scroll: usize,
}

impl NavState {
    pub fn new(path: PathBuf) -> Self {
        Self {
            current_dir: path,
            entries: Vec::new(),
            selected: 0,
            scroll: 0,
        }
    }

    // Getters / Accessors

    #[inline]
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    #[inline]
    pub fn entries(&self) -> &[DirEntry] {
        &self.entries
    }

    #[inline]
    pub fn selected_idx(&self) -> usize {
        self.selected
    }

    #[inline]
    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    pub fn selected_entry(&self) -> Option<&DirEntry> {
        self.entries.get(self.selected)
    }

    // Navigation functions

    pub fn move_up(&mut self) -> bool {
        if self.selected > 0 {
            self.selected -= 1;
            return true;
        }
        false
    }

    pub fn move_down(&mut self) -> bool {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
            return true;
        }
        false
    }

    /// Moves the selection one viewport up and keeps it visible.
    pub fn page_up(&mut self, height: usize) {
        self.selected = self.selected.saturating_sub(height.max(1));
        self.clamp_scroll(height);
    }

    /// Moves the selection one viewport down and keeps it visible.
    pub fn page_down(&mut self, height: usize) {
        let last = self.entries.len().saturating_sub(1);
        self.selected = (self.selected + height.max(1)).min(last);
        self.clamp_scroll(height);
    }

    /// Selects `idx`, clamped to the listing.
    pub fn select_index(&mut self, idx: usize) {
        self.selected = idx.min(self.entries.len().saturating_sub(1));
    }

    /// Re-clamps selection and scroll offset for a viewport of `height` rows.
    ///
    /// Called every frame with the current terminal size, so a resize never leaves the
    /// selection off-screen. A height of zero only clamps the selection.
    pub fn clamp_scroll(&mut self, height: usize) {
        self.select_index(self.selected);
        if self.scroll > self.selected {
            self.scroll = self.selected;
        }
        if height > 0 && self.selected >= self.scroll + height {
            self.scroll = self.selected + 1 - height;
        }
    }

    /// Replaces the whole listing with `entries` for `path`, selecting the first entry.
    pub fn replace(&mut self, path: PathBuf, entries: Vec<DirEntry>) {
        self.current_dir = path;
        self.entries = entries;
        self.selected = 0;
        self.scroll = 0;
    }

    /// Selects the entry named `name` and scrolls it into view.
    ///
    /// # Returns
    /// false if no entry has that name, in which case nothing changes.
    pub fn focus_name(&mut self, name: &OsStr, height: usize) -> bool {
        match self.entries.iter().position(|e| e.name() == name) {
            Some(idx) => {
                self.selected = idx;
                self.clamp_scroll(height);
                true
            }
            None => false,
        }
    }

    /// Re-lists `path` and rebuilds the state from scratch.
    ///
    /// On success the selection is reset to the top, then moved to `select_name` if
    /// that entry exists. On failure the listing is emptied and the error returned.
    /// Calling this twice with no filesystem change in between yields the same state.
    pub fn refresh(
        &mut self,
        path: &Path,
        select_name: Option<&OsStr>,
        height: usize,
    ) -> Result<(), ListError> {
        match list_dir(path) {
            Ok(entries) => {
                self.replace(path.to_path_buf(), entries);
                if let Some(name) = select_name {
                    self.focus_name(name, height);
                }
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "refresh failed");
                self.replace(path.to_path_buf(), Vec::new());
                Err(e)
            }
        }
    }
}
