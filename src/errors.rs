//! Error types for dirpilot.
//!
//! Nothing in here is fatal. Listing, process and file operation failures are all
//! turned into footer status text by [crate::app::AppState] and the event loop keeps going.
//! The only fatal errors are terminal setup/teardown failures, which stay plain [std::io::Error].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A directory could not be listed.
///
/// A vanished directory is not an error: the lister reports it as an empty listing.
#[derive(Error, Debug)]
pub enum ListError {
    #[error("Permission denied: {}", .0.display())]
    AccessDenied(PathBuf),

    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ListError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            ListError::AccessDenied(path) => path,
            ListError::Io { path, .. } => path,
        }
    }
}

/// Errors of the process bridge.
///
/// [BridgeError::ToolMissing] is always raised before the terminal is handed over.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Error: '{0}' command not found.")]
    ToolMissing(String),

    #[error("{0}")]
    Spawn(#[source] io::Error),

    #[error("terminal could not be restored: {0}")]
    Terminal(#[source] io::Error),
}

/// Errors of delete, rename/move and copy.
#[derive(Error, Debug)]
pub enum FileOpError {
    #[error("Cannot {0} inaccessible item.")]
    Inaccessible(&'static str),

    #[error("Error: Dir '{0}' not empty.")]
    DirectoryNotEmpty(String),

    #[error("Source and destination are same.")]
    SameSourceAndDestination,

    #[error("Directory copy not implemented.")]
    DirectoryCopyUnsupported,

    #[error(transparent)]
    Io(#[from] io::Error),
}
