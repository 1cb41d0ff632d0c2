//! Input action handler methods for dirpilot.
//!
//! This module implements [AppState] methods for opening entries, going to the parent,
//! the footer prompts and the file operations that follow them.

use crate::app::actions::{Prompt, PromptKind};
use crate::app::state::AppState;
use crate::core::fileops::{self, CopyPlan};
use crate::core::proc::{ExternalCommand, LaunchMode, TerminalControl, exit_code_str, run_external};
use crate::core::{DirEntry, list_dir};
use crate::errors::{FileOpError, ListError};
use crate::utils::parent_path;

use crossterm::event::{KeyCode::*, KeyEvent, KeyModifiers};

impl<'a> AppState<'a> {
    // Navigation

    /// Opens the selected entry.
    ///
    /// Directories are entered, files with the script suffix are run with the interpreter,
    /// anything else is shown in the pager.
    pub(super) fn handle_open<T: TerminalControl + ?Sized>(&mut self, term: &mut T) {
        let Some(entry) = self.nav.selected_entry().cloned() else {
            return;
        };

        if !entry.is_accessible() {
            self.status.error(format!(
                "Cannot open inaccessible item: {}",
                entry.name_str()
            ));
            return;
        }

        if entry.is_dir() {
            self.enter_dir(&entry);
        } else if entry.has_suffix(self.config.general().script_suffix()) {
            self.launch(LaunchMode::Run, &entry, term);
        } else {
            self.launch(LaunchMode::View, &entry, term);
        }
    }

    fn enter_dir(&mut self, entry: &DirEntry) {
        match list_dir(entry.path()) {
            Ok(entries) => {
                tracing::debug!(path = %entry.path().display(), "entering directory");
                self.nav.replace(entry.path().to_path_buf(), entries);
            }
            Err(ListError::AccessDenied(path)) => {
                self.status
                    .error(format!("Permission denied: {}", path.display()));
            }
            Err(e) => {
                tracing::debug!(error = %e, "cannot enter directory");
                if e.path().is_dir() {
                    self.status
                        .error(format!("Permission denied: {}", e.path().display()));
                } else {
                    self.status
                        .error(format!("Cannot open: {}", entry.name_str()));
                }
            }
        }
    }

    /// Goes to the parent directory and focuses the directory we came from.
    ///
    /// At the root this does nothing. If the parent cannot be listed the state is unchanged.
    pub(super) fn handle_back(&mut self) {
        let current = self.nav.current_dir().to_path_buf();
        let parent = parent_path(&current);
        if parent == current {
            return;
        }

        match list_dir(&parent) {
            Ok(entries) => {
                let exited_name = current.file_name().map(|n| n.to_os_string());
                self.nav.replace(parent, entries);
                if let Some(name) = exited_name {
                    self.nav.focus_name(&name, self.metrics.list_height);
                }
            }
            Err(_) => {
                self.status
                    .error(format!("Permission denied: {}", parent.display()));
            }
        }
    }

    /// Hands the terminal to the interpreter or the pager for `entry`.
    ///
    /// A missing tool is reported without suspending. Otherwise the listing is always
    /// refreshed afterwards with `entry` focused, whatever the outcome of the child.
    fn launch<T: TerminalControl + ?Sized>(
        &mut self,
        mode: LaunchMode,
        entry: &DirEntry,
        term: &mut T,
    ) {
        let general = self.config.general();
        let (tool, pause) = match mode {
            LaunchMode::Run => (general.interpreter(), general.pause_after_run()),
            LaunchMode::View => (general.pager(), false),
        };

        let command = match ExternalCommand::resolve(tool) {
            Ok(cmd) => cmd.pause_after(pause),
            Err(e) => {
                tracing::warn!(tool, "external tool not found");
                self.status.error(e.to_string());
                return;
            }
        };

        let name = entry.name_str().into_owned();
        match (mode, run_external(term, &command, entry.path())) {
            (LaunchMode::Run, Ok(status)) => self.status.info(format!(
                "Returned from '{}' (code: {}).",
                name,
                exit_code_str(status)
            )),
            (LaunchMode::View, Ok(status)) => self.status.info(format!(
                "Closed viewer for '{}' (code: {}).",
                name,
                exit_code_str(status)
            )),
            (LaunchMode::Run, Err(e)) => self.status.error(format!("Error running script: {}", e)),
            (LaunchMode::View, Err(e)) => self.status.error(format!("Error viewing file: {}", e)),
        }

        self.refresh_current(Some(entry.name()));
    }

    // Prompts

    pub(super) fn prompt_delete(&mut self) {
        let Some(entry) = self.nav.selected_entry().cloned() else {
            return;
        };
        if let Err(e) = fileops::ensure_accessible(&entry, "delete") {
            self.status.error(e.to_string());
            return;
        }
        let label = format!("DELETE '{}'?", entry.name_str());
        let prev_idx = self.nav.selected_idx();
        self.prompt = Some(Prompt::new(
            PromptKind::ConfirmDelete { entry, prev_idx },
            label,
        ));
    }

    pub(super) fn prompt_rename(&mut self) {
        let Some(entry) = self.nav.selected_entry().cloned() else {
            return;
        };
        if let Err(e) = fileops::ensure_accessible(&entry, "rename") {
            self.status.error(e.to_string());
            return;
        }
        let label = format!("New name/path for '{}': ", entry.name_str());
        self.prompt = Some(Prompt::new(PromptKind::RenameTo { entry }, label));
    }

    pub(super) fn prompt_copy(&mut self) {
        let Some(entry) = self.nav.selected_entry().cloned() else {
            return;
        };
        if let Err(e) = fileops::ensure_accessible(&entry, "copy") {
            self.status.error(e.to_string());
            return;
        }
        if entry.is_dir() {
            self.status
                .error(FileOpError::DirectoryCopyUnsupported.to_string());
            return;
        }
        let label = format!("Copy '{}' TO (path/dir): ", entry.name_str());
        self.prompt = Some(Prompt::new(PromptKind::CopyTo { entry }, label));
    }

    /// Feeds a key into the active prompt. Enter submits, Esc cancels.
    pub(super) fn handle_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            Enter => {
                if let Some(prompt) = self.prompt.take() {
                    self.status.clear();
                    self.submit_prompt(prompt);
                }
                return;
            }
            Esc => {
                if let Some(prompt) = self.prompt.take() {
                    self.status.info(prompt.kind().cancel_message());
                }
                return;
            }
            _ => {}
        }

        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        match key.code {
            Backspace => prompt.backspace(),
            Delete => prompt.delete(),
            Left => prompt.move_left(),
            Right => prompt.move_right(),
            Home => prompt.home(),
            End => prompt.end(),
            Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                prompt.insert(c)
            }
            _ => {}
        }
    }

    fn submit_prompt(&mut self, prompt: Prompt) {
        let confirmed = prompt.confirmed();
        let answer = prompt.answer().map(str::to_owned);
        let cancel = prompt.kind().cancel_message();

        match prompt.into_kind() {
            PromptKind::ConfirmDelete { entry, prev_idx } => {
                if confirmed {
                    self.delete(&entry, prev_idx);
                } else {
                    self.status.info(cancel);
                }
            }
            PromptKind::RenameTo { entry } => match answer {
                Some(dest) => self.rename(&entry, &dest),
                None => self.status.info(cancel),
            },
            PromptKind::CopyTo { entry } => match answer {
                Some(dest) => self.plan_copy(entry, &dest),
                None => self.status.info(cancel),
            },
            PromptKind::ConfirmOverwrite { entry, plan, dest } => {
                if confirmed {
                    self.copy(&entry, &plan, &dest);
                } else {
                    self.status.info(cancel);
                }
            }
        }
    }

    // File operations

    fn delete(&mut self, entry: &DirEntry, prev_idx: usize) {
        match fileops::delete_entry(entry) {
            Ok(()) => {
                let kind = if entry.is_dir() { "Dir" } else { "File" };
                self.status
                    .info(format!("{} '{}' deleted.", kind, entry.name_str()));
                if self.refresh_current(None) {
                    self.nav.select_index(prev_idx);
                    self.nav.clamp_scroll(self.metrics.list_height);
                }
            }
            Err(e @ FileOpError::DirectoryNotEmpty(_)) | Err(e @ FileOpError::Inaccessible(_)) => {
                self.status.error(e.to_string());
            }
            Err(e) => self.status.error(format!("Error deleting: {}", e)),
        }
    }

    fn rename(&mut self, entry: &DirEntry, dest: &str) {
        let current = self.nav.current_dir().to_path_buf();
        let result = fileops::plan_move(entry, &current, dest)
            .and_then(|plan| fileops::execute_move(&plan).map(|_| plan));

        match result {
            Ok(plan) => {
                self.status.info(format!("Moved/Renamed to '{}'.", dest));
                let focus = plan.focus_name();
                self.refresh(current, focus.as_deref().map(std::ffi::OsStr::new));
            }
            Err(FileOpError::Io(e)) => self.status.error(format!("Error moving: {}", e)),
            Err(e) => self.status.error(e.to_string()),
        }
    }

    fn plan_copy(&mut self, entry: DirEntry, dest: &str) {
        let current = self.nav.current_dir().to_path_buf();
        match fileops::plan_copy(&entry, &current, dest) {
            Ok(plan) if plan.overwrites => {
                let base = plan
                    .dest
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let label = format!("'{}' exists. Overwrite?", base);
                self.prompt = Some(Prompt::new(
                    PromptKind::ConfirmOverwrite {
                        entry,
                        plan,
                        dest: dest.to_string(),
                    },
                    label,
                ));
            }
            Ok(plan) => self.copy(&entry, &plan, dest),
            Err(FileOpError::Io(e)) => self.status.error(format!("Error copying: {}", e)),
            Err(e) => self.status.error(e.to_string()),
        }
    }

    /// Copies and re-focuses the source entry in the current directory, even when the
    /// copy went elsewhere. `dest` is the destination as typed.
    fn copy(&mut self, entry: &DirEntry, plan: &CopyPlan, dest: &str) {
        match fileops::execute_copy(plan) {
            Ok(()) => {
                self.status.info(format!("Copied to '{}'.", dest));
                self.refresh_current(Some(entry.name()));
            }
            Err(FileOpError::Io(e)) => self.status.error(format!("Error copying: {}", e)),
            Err(e) => self.status.error(e.to_string()),
        }
    }
}
