//! Terminal UI for dirpilot.
//!
//! - [layout]: the per-frame screen geometry and column offsets
//! - [render]: the `render` entry point drawing header, list and footer
//! - [widgets]: the footer (prompt, status or help line)
//!
//! Everything in here only reads [crate::app::AppState].

pub mod layout;
pub mod render;
pub mod widgets;

pub use render::render;
