//! Configuration for dirpilot.
//!
//! Settings come from an optional `dirpilot.toml`. Without one, dirpilot runs on the
//! built-in defaults and never writes anything to disk.
//!
//! - [load]: locating, reading and parsing the file into [Config]
//! - [general]: interpreter, script suffix, pager
//! - [theme]: colors of the list, selection and status line
//! - [input]: key bindings per action

pub mod general;
pub mod input;
pub mod load;
pub mod theme;

pub use general::General;
pub use input::Keys;
pub use load::{Config, RawConfig};
pub use theme::Theme;
