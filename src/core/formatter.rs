//! Display formatting for directory entries in dirpilot.
//!
//! Turns the raw fields of a [crate::core::DirEntry] into the fixed-width strings
//! drawn in the permission, size and date columns, and fits names to a column width.

use chrono::{DateTime, Local};
use humansize::{FixedAt, WINDOWS, format_size as humansize_format};
use unicode_width::UnicodeWidthChar;

use std::time::SystemTime;

/// Placeholder for an absent modification time. Same width as a formatted date.
pub const MISSING_TIME: &str = "--- -- --:--";

const KIB: u64 = 1024;

const S_IFMT: u32 = 0o170000;
const S_IFDIR: u32 = 0o040000;
const S_IFREG: u32 = 0o100000;
const S_IFLNK: u32 = 0o120000;

/// Formats raw mode bits in a unix-like format, eg. `drwxr-xr-x`.
///
/// The first char is `d`, `-`, `l` or `?` for anything else (including a zero mode).
pub fn format_permissions(mode: u32) -> String {
    let first = match mode & S_IFMT {
        S_IFDIR => 'd',
        S_IFREG => '-',
        S_IFLNK => 'l',
        _ => '?',
    };
    let mut chars = [first, '-', '-', '-', '-', '-', '-', '-', '-', '-'];
    let shifts = [6, 3, 0];
    for (i, &shift) in shifts.iter().enumerate() {
        let base = 1 + i * 3;
        if (mode >> (shift + 2)) & 1u32 != 0 {
            chars[base] = 'r';
        }
        if (mode >> (shift + 1)) & 1u32 != 0 {
            chars[base + 1] = 'w';
        }
        if (mode >> shift) & 1u32 != 0 {
            chars[base + 2] = 'x';
        }
    }
    chars.iter().collect()
}

/// Formats a file size into at most 7 columns.
///
/// Bytes below 1024 are shown as `512B`, larger sizes in base 1024 with exactly one
/// decimal and a single uppercase unit (`1.5K`, `5.0M`). `T` is the largest unit.
/// Unknown sizes are shown as `?`.
pub fn format_size(size: Option<u64>) -> String {
    let Some(bytes) = size else {
        return "?".to_string();
    };
    if bytes < KIB {
        return format!("{}B", bytes);
    }

    let (fixed_at, unit) = match bytes {
        b if b < KIB.pow(2) => (FixedAt::Kilo, 'K'),
        b if b < KIB.pow(3) => (FixedAt::Mega, 'M'),
        b if b < KIB.pow(4) => (FixedAt::Giga, 'G'),
        _ => (FixedAt::Tera, 'T'),
    };
    let opts = WINDOWS
        .decimal_places(1)
        .space_after_value(false)
        .fixed_at(Some(fixed_at));
    let formatted = humansize_format(bytes, opts);

    // keep the number (humansize drops a trailing ".0"), the unit letter is ours
    let number = formatted.trim_end_matches(|c: char| !c.is_ascii_digit());
    if number.contains('.') {
        format!("{}{}", number, unit)
    } else {
        format!("{}.0{}", number, unit)
    }
}

/// Formats a modification time as `Mon DD HH:MM` in local time.
pub fn format_mtime(modified: Option<SystemTime>) -> String {
    modified
        .map(|mtime| {
            let dt: DateTime<Local> = DateTime::from(mtime);
            dt.format("%b %d %H:%M").to_string()
        })
        .unwrap_or_else(|| MISSING_TIME.to_string())
}

/// Fits `line` into exactly `width` terminal columns.
///
/// Control characters are dropped, tabs become spaces, wide chars that would
/// overflow are cut and the rest is padded with spaces.
pub fn sanitize_to_exact_width(line: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut current_w = 0;

    for char in line.chars() {
        if char == '\t' {
            let space_count = 4 - (current_w % 4);
            if current_w + space_count > width {
                break;
            }
            out.push_str(&" ".repeat(space_count));
            current_w += space_count;
            continue;
        }

        if char.is_control() {
            continue;
        }

        let w = char.width().unwrap_or(0);
        if current_w + w > width {
            break;
        }

        out.push(char);
        current_w += w;
    }

    if current_w < width {
        out.push_str(&" ".repeat(width - current_w));
    }

    out
}

/// Right-aligns `s` in `width` columns, cutting from the left if it does not fit.
pub fn right_align(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.chars().skip(len - width).collect()
    } else {
        format!("{}{}", " ".repeat(width - len), s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permissions_for_common_modes() {
        assert_eq!(format_permissions(0o040755), "drwxr-xr-x");
        assert_eq!(format_permissions(0o100644), "-rw-r--r--");
        assert_eq!(format_permissions(0o120777), "lrwxrwxrwx");
        assert_eq!(format_permissions(0o100700), "-rwx------");
    }

    #[test]
    fn permissions_unknown_mode() {
        assert_eq!(format_permissions(0), "?---------");
        assert_eq!(format_permissions(0).len(), 10);
    }

    #[test]
    fn size_formats() {
        assert_eq!(format_size(None), "?");
        assert_eq!(format_size(Some(0)), "0B");
        assert_eq!(format_size(Some(512)), "512B");
        assert_eq!(format_size(Some(1023)), "1023B");

        assert_eq!(format_size(Some(1024)), "1.0K");
        assert_eq!(format_size(Some(1536)), "1.5K");
        assert_eq!(format_size(Some(5 * 1024 * 1024)), "5.0M");
        assert_eq!(format_size(Some(3 * 1024 * 1024 * 1024 / 2)), "1.5G");
        assert_eq!(format_size(Some(1_048_575)), "1024.0K");
        assert_eq!(format_size(Some(2 * 1024u64.pow(4))), "2.0T");
        assert_eq!(format_size(Some(2_199_023_255_552_000)), "2000.0T");
    }

    #[test]
    fn mtime_formats() {
        assert_eq!(format_mtime(None), MISSING_TIME);
        let now = format_mtime(Some(SystemTime::now()));
        assert_eq!(now.chars().count(), 12, "got {now}");
    }

    #[test]
    fn exact_width_sanitization() {
        let cases = ["short.txt", "very_long_filename.txt", "🦀_crab.rs", "\t_tab"];
        for input in cases {
            let result = sanitize_to_exact_width(input, 10);
            let actual_width = unicode_width::UnicodeWidthStr::width(result.as_str());
            assert_eq!(actual_width, 10, "input '{}' gave '{}'", input, result);
            assert!(!result.chars().any(|c| c.is_control()));
        }
    }

    #[test]
    fn right_align_pads_and_cuts() {
        assert_eq!(right_align("12B", 7), "    12B");
        assert_eq!(right_align("?", 3), "  ?");
        assert_eq!(right_align("123456789", 7), "3456789");
    }
}
