//! Miscellaneous utility functions for dirpilot.
//!
//! - [helpers]: color parsing, lexical path normalization, home lookup
//! - [cli]: the tiny argument parser (`--help`, `--version`)
//! - [logging]: the optional file logger

pub mod cli;
pub mod helpers;
pub mod logging;

pub use helpers::{get_home, normalize_path, parent_path, parse_color};
