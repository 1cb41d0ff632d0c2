//! Application state and input handling for dirpilot.
//!
//! - [state]: [AppState], the single owner of everything the event loop mutates
//! - [nav]: the directory listing, selection and scroll offset
//! - [actions]: footer prompts and the status message
//! - [handlers]: opening entries, going up and the file operations
//! - [keymap]: key to [keymap::Action] mapping built from the config

pub mod actions;
pub mod handlers;
pub mod keymap;
pub mod nav;
pub mod state;

pub use nav::NavState;
pub use state::{AppState, KeypressResult, LayoutMetrics};
