//! Input configuration options for dirpilot
//!
//! This module defines the key bindings which are read from the dirpilot.toml
//! configuration file. Keys are parsed into crossterm key codes by [crate::app::keymap].

use serde::Deserialize;

/// Input configuration options of all actions
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Keys {
    quit: Vec<String>,
    up: Vec<String>,
    down: Vec<String>,
    page_up: Vec<String>,
    page_down: Vec<String>,
    open: Vec<String>,
    parent: Vec<String>,
    delete: Vec<String>,
    rename: Vec<String>,
    copy: Vec<String>,
}

macro_rules! accessor {
    ($($name:ident),+ $(,)?) => {
        impl Keys {
            $(
                #[inline]
                pub fn $name(&self) -> &[String] {
                    &self.$name
                }
            )+
        }
    };
}

accessor!(
    quit, up, down, page_up, page_down, open, parent, delete, rename, copy,
);

/// Default input configuration options
impl Default for Keys {
    fn default() -> Self {
        Keys {
            quit: vec!["q".into()],
            up: vec!["Up".into()],
            down: vec!["Down".into()],
            page_up: vec!["PageUp".into()],
            page_down: vec!["PageDown".into()],
            open: vec!["Enter".into(), "Right".into()],
            parent: vec!["Backspace".into(), "Left".into(), "u".into()],
            delete: vec!["d".into()],
            rename: vec!["r".into()],
            copy: vec!["c".into()],
        }
    }
}
