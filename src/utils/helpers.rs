//! Helpers for dirpilot.
//!
//! Provides small utility functions:
//! - Color parsing from strings or hex codes
//! - Lexical path normalization (`.` and `..` without touching the filesystem)
//! - The home directory lookup used by the config loader
//!
//! These helpers are used throughout dirpilot.

use ratatui::style::Color;
use std::path::{Component, Path, PathBuf};

/// Parses a string (color name or hex) into a ratatui::style::Color
///
/// Supports standard names (red, green, etc.) as well as hex values (#RRGGBB or #RGB)
pub fn parse_color(s: &str) -> Color {
    match s.to_lowercase().as_str() {
        "default" | "reset" => Color::Reset,
        "yellow" => Color::Yellow,
        "red" => Color::Red,
        "blue" => Color::Blue,
        "green" => Color::Green,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "black" => Color::Black,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        _ => {
            if let Some(color) = s.strip_prefix('#') {
                let expanded = match color.len() {
                    6 => color.to_string(),
                    3 => color.chars().flat_map(|c| [c, c]).collect(),
                    _ => return Color::Reset,
                };
                if let Ok(rgb) = u32::from_str_radix(&expanded, 16) {
                    return Color::Rgb(
                        ((rgb >> 16) & 0xFF) as u8,
                        ((rgb >> 8) & 0xFF) as u8,
                        (rgb & 0xFF) as u8,
                    );
                }
            }
            // fallback
            Color::Reset
        }
    }
}

/// Normalizes a path lexically: drops `.` components and resolves `..` against
/// the preceding component. A `..` at the root stays at the root.
///
/// Symlinks are not resolved, so `a/link/..` becomes `a`.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    out.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    out.pop();
                } else if out.as_os_str().is_empty() || !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Parent of `path` after normalization, or `path` itself at the root.
pub fn parent_path(path: &Path) -> PathBuf {
    let normalized = normalize_path(path);
    match normalized.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => normalized,
    }
}

#[inline]
pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Helper utils tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_color_names_and_hex() {
        assert_eq!(parse_color("Blue"), Color::Blue);
        assert_eq!(parse_color("default"), Color::Reset);
        assert_eq!(parse_color("#ff0080"), Color::Rgb(255, 0, 128));
        assert_eq!(parse_color("#0f0"), Color::Rgb(0, 255, 0));
        assert_eq!(parse_color("#12"), Color::Reset);
        assert_eq!(parse_color("chartreuse"), Color::Reset);
    }

    #[test]
    fn normalize_path_lexically() {
        assert_eq!(normalize_path(Path::new("/a/b/../c/./d")), PathBuf::from("/a/c/d"));
        assert_eq!(normalize_path(Path::new("/../..")), PathBuf::from("/"));
        assert_eq!(normalize_path(Path::new("a/../..")), PathBuf::from(".."));
        assert_eq!(normalize_path(Path::new("./")), PathBuf::from("."));
        assert_eq!(normalize_path(Path::new("/x/y/")), PathBuf::from("/x/y"));
    }

    #[test]
    fn parent_path_stops_at_root() {
        assert_eq!(parent_path(Path::new("/usr/lib")), PathBuf::from("/usr"));
        assert_eq!(parent_path(Path::new("/usr")), PathBuf::from("/"));
        assert_eq!(parent_path(Path::new("/")), PathBuf::from("/"));
    }
}
