//! File logging for dirpilot.
//!
//! The terminal belongs to the UI, so logs only ever go to a file. Logging is off
//! unless `DIRPILOT_LOG` names a file.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Level;

pub const LOG_ENV: &str = "DIRPILOT_LOG";
pub const LOG_LEVEL_ENV: &str = "DIRPILOT_LOG_LEVEL";

/// Installs the global `tracing` subscriber if `DIRPILOT_LOG` is set.
///
/// A log file that cannot be opened disables logging instead of failing startup.
pub fn init_logging() {
    let Some(path) = std::env::var_os(LOG_ENV).map(PathBuf::from) else {
        return;
    };
    let level = parse_level(std::env::var(LOG_LEVEL_ENV).ok().as_deref());

    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("[dirpilot] Cannot open log file {}: {}", path.display(), e);
            return;
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .try_init();
}

fn parse_level(value: Option<&str>) -> Level {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("trace") => Level::TRACE,
        Some("info") => Level::INFO,
        Some("warn") | Some("warning") => Level::WARN,
        Some("error") => Level::ERROR,
        _ => Level::DEBUG,
    }
}
