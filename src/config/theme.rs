//! Theme configuration options for dirpilot
//!
//! Colors are given as names ("blue") or hex codes ("#RRGGBB", "#RGB") and are
//! parsed once when the config is loaded.
//! # Examples
//! ```toml
//! [theme]
//! directory = "cyan"
//! selection_bg = "#3c3836"
//! ```

use crate::utils::parse_color;

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Deserializer};

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Theme {
    #[serde(deserialize_with = "deserialize_color_field")]
    directory: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    executable: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    selection_fg: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    selection_bg: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    error: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    header: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            directory: Color::Blue,
            executable: Color::Green,
            selection_fg: Color::Black,
            selection_bg: Color::White,
            error: Color::Red,
            header: Color::Reset,
        }
    }
}

impl Theme {
    #[inline]
    pub fn directory_style(&self) -> Style {
        Style::default().fg(self.directory)
    }

    /// Style of executables and interpreter scripts.
    #[inline]
    pub fn executable_style(&self) -> Style {
        Style::default().fg(self.executable)
    }

    #[inline]
    pub fn selection_style(&self) -> Style {
        Style::default().fg(self.selection_fg).bg(self.selection_bg)
    }

    /// Attention style for error statuses.
    #[inline]
    pub fn error_style(&self) -> Style {
        Style::default()
            .fg(self.error)
            .add_modifier(Modifier::BOLD)
    }

    #[inline]
    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header)
            .add_modifier(Modifier::BOLD)
    }
}

fn deserialize_color_field<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_color(&s))
}
