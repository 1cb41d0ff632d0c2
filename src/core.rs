//! Core runtime logic for dirpilot.
//!
//! This module contains the non-UI "engine" pieces used by the application:
//! - [fm]: directory listing and entry metadata (see [list_dir], [DirEntry]).
//! - [formatter]: fixed-width formatting of permissions, sizes and times.
//! - [fileops]: delete, rename/move and copy.
//! - [proc]: handing the terminal to the interpreter or the pager.
//! - [terminal]: terminal setup/teardown and the main crossterm/ratatui event loop.

pub mod fileops;
pub mod fm;
pub mod formatter;
pub mod proc;
pub mod terminal;

pub use fm::{DirEntry, compare_entries, list_dir, sort_entries};
pub use formatter::{
    MISSING_TIME, format_mtime, format_permissions, format_size, right_align,
    sanitize_to_exact_width,
};
