//! Directory listing logic for dirpilot.
//!
//! Provides the [DirEntry] struct which is used throughout dirpilot and the
//! [list_dir] function which produces a fully sorted listing of a directory.
//!
//! A listing is all-or-nothing for the directory itself, but never for its items:
//! an item whose `lstat` fails is still returned, flagged inaccessible.

use crate::errors::ListError;

use std::borrow::Cow;
use std::cmp::Ordering;
use std::ffi::{OsStr, OsString};
use std::fs::{self, Metadata};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Represents a single entry in a directory listing.
///
/// Entries are immutable once [list_dir] produced them. A new listing replaces the old set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    name: OsString,
    path: PathBuf,
    is_dir: bool,
    size: Option<u64>,
    modified: Option<SystemTime>,
    mode: u32,
    accessible: bool,
}

impl DirEntry {
    /// Used to check the execute bits of user, group and other.
    pub(crate) const EXEC_FLAG: u32 = 0o111;

    pub(crate) fn from_metadata(name: OsString, path: PathBuf, md: &Metadata) -> Self {
        let is_dir = md.is_dir();
        DirEntry {
            name,
            path,
            is_dir,
            size: if is_dir { None } else { Some(md.len()) },
            modified: md.modified().ok(),
            mode: raw_mode(md),
            accessible: true,
        }
    }

    /// An item that showed up in the listing but could not be stat'ed.
    pub(crate) fn inaccessible(name: OsString, path: PathBuf) -> Self {
        DirEntry {
            name,
            path,
            is_dir: false,
            size: None,
            modified: None,
            mode: 0,
            accessible: false,
        }
    }

    // Accessors

    #[inline]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    #[inline]
    pub fn name_str(&self) -> Cow<'_, str> {
        self.name.to_string_lossy()
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Size in bytes. Always `None` for directories and inaccessible items.
    #[inline]
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    #[inline]
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    /// Raw `st_mode` bits, zero if unknown.
    #[inline]
    pub fn mode(&self) -> u32 {
        self.mode
    }

    #[inline]
    pub fn is_accessible(&self) -> bool {
        self.accessible
    }

    #[inline]
    pub fn is_executable(&self) -> bool {
        !self.is_dir && self.mode & Self::EXEC_FLAG != 0
    }

    /// True for regular files whose name ends with `suffix`.
    pub fn has_suffix(&self, suffix: &str) -> bool {
        !self.is_dir && !suffix.is_empty() && self.name_str().ends_with(suffix)
    }
}

#[cfg(unix)]
fn raw_mode(md: &Metadata) -> u32 {
    use std::os::unix::fs::MetadataExt;
    md.mode()
}

#[cfg(not(unix))]
fn raw_mode(md: &Metadata) -> u32 {
    // Synthesize the unix type and permission bits so the permission column stays meaningful.
    let type_bits = if md.is_dir() { 0o040000 } else { 0o100000 };
    let perm_bits = if md.permissions().readonly() { 0o444 } else { 0o644 };
    type_bits | perm_bits
}

/// Orders entries directories first, then by case-insensitive name.
///
/// Names that only differ in case fall back to a byte-wise comparison so the order is total.
pub fn compare_entries(a: &DirEntry, b: &DirEntry) -> Ordering {
    match (a.is_dir, b.is_dir) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }
    let (la, lb) = (a.name_str().to_lowercase(), b.name_str().to_lowercase());
    la.cmp(&lb).then_with(|| a.name.cmp(&b.name))
}

pub fn sort_entries(entries: &mut [DirEntry]) {
    entries.sort_by(compare_entries);
}

/// Reads the contents of the provided directory and returns them sorted.
///
/// # Returns
/// * `Ok(entries)` for a readable directory, empty if it is empty or vanished.
/// * `Err(ListError::AccessDenied)` if the directory itself is unreadable.
/// * `Err(ListError::Io)` for any other failure to open the directory.
pub fn list_dir(path: &Path) -> Result<Vec<DirEntry>, ListError> {
    let read = match fs::read_dir(path) {
        Ok(read) => read,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "directory vanished, listing as empty");
            return Ok(Vec::new());
        }
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            return Err(ListError::AccessDenied(path.to_path_buf()));
        }
        Err(source) => {
            return Err(ListError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let mut entries = Vec::with_capacity(64);
    for item in read {
        let item = match item {
            Ok(item) => item,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable directory item");
                continue;
            }
        };

        let name = item.file_name();
        let full_path = path.join(&name);
        let entry = match fs::symlink_metadata(&full_path) {
            Ok(md) => DirEntry::from_metadata(name, full_path, &md),
            Err(e) => {
                tracing::debug!(path = %full_path.display(), error = %e, "stat failed, flagging inaccessible");
                DirEntry::inaccessible(name, full_path)
            }
        };
        entries.push(entry);
    }

    sort_entries(&mut entries);
    Ok(entries)
}
