//! Filesystem side of delete, rename/move and copy.
//!
//! Each operation is split into a planning step which validates the target and
//! resolves the destination without touching the filesystem, and an execute step
//! which performs the syscalls. The controller runs the prompts in between.
//!
//! There is no rollback: a failed syscall leaves the filesystem as the syscall left it.

use crate::core::DirEntry;
use crate::errors::FileOpError;
use crate::utils::normalize_path;

use filetime::FileTime;

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Checks that an entry may be targeted by `op` at all.
pub fn ensure_accessible(entry: &DirEntry, op: &'static str) -> Result<(), FileOpError> {
    if entry.is_accessible() {
        Ok(())
    } else {
        Err(FileOpError::Inaccessible(op))
    }
}

/// Deletes a file or an empty directory.
///
/// Non-empty directories are rejected before anything is removed.
pub fn delete_entry(entry: &DirEntry) -> Result<(), FileOpError> {
    ensure_accessible(entry, "delete")?;
    let path = entry.path();
    if entry.is_dir() {
        if fs::read_dir(path)?.next().is_some() {
            return Err(FileOpError::DirectoryNotEmpty(entry.name_str().into_owned()));
        }
        fs::remove_dir(path)?;
    } else {
        fs::remove_file(path)?;
    }
    tracing::info!(path = %path.display(), "deleted");
    Ok(())
}

/// A validated rename/move, ready to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    pub src: PathBuf,
    pub dest: PathBuf,
}

impl MovePlan {
    /// Name to focus after the move: the base name of the resolved destination.
    pub fn focus_name(&self) -> Option<String> {
        self.dest
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
    }
}

/// Resolves a rename/move destination typed by the user.
///
/// Input without a path separator is a sibling name in `current_dir`. Anything
/// else is resolved relative to `current_dir` (absolute input stays absolute) and normalized.
pub fn resolve_move_destination(current_dir: &Path, input: &str) -> PathBuf {
    if contains_separator(input) {
        normalize_path(&current_dir.join(input))
    } else {
        current_dir.join(input)
    }
}

pub fn plan_move(entry: &DirEntry, current_dir: &Path, input: &str) -> Result<MovePlan, FileOpError> {
    ensure_accessible(entry, "rename")?;
    let dest = resolve_move_destination(current_dir, input);
    if same_path(entry.path(), &dest) {
        return Err(FileOpError::SameSourceAndDestination);
    }
    Ok(MovePlan {
        src: entry.path().to_path_buf(),
        dest,
    })
}

/// Moves `plan.src` to `plan.dest`.
///
/// An existing directory as destination receives the source inside it.
/// Files fall back to copy + remove when the rename crosses filesystems.
///
/// # Returns
/// The final path of the moved item.
pub fn execute_move(plan: &MovePlan) -> Result<PathBuf, FileOpError> {
    let target = match (plan.dest.is_dir(), plan.src.file_name()) {
        (true, Some(name)) => plan.dest.join(name),
        _ => plan.dest.clone(),
    };
    if same_path(&plan.src, &target) {
        return Err(FileOpError::SameSourceAndDestination);
    }

    match fs::rename(&plan.src, &target) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::CrossesDevices && plan.src.is_file() => {
            tracing::debug!(src = %plan.src.display(), "rename crosses devices, copying instead");
            copy_with_metadata(&plan.src, &target)?;
            fs::remove_file(&plan.src)?;
        }
        Err(e) => return Err(e.into()),
    }
    tracing::info!(src = %plan.src.display(), dest = %target.display(), "moved");
    Ok(target)
}

/// A validated single-file copy, ready to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyPlan {
    pub src: PathBuf,
    pub dest: PathBuf,
    /// The destination exists and has to be confirmed first.
    pub overwrites: bool,
}

/// Resolves a copy destination typed by the user.
///
/// The input is resolved relative to `current_dir` and normalized. If it names an
/// existing directory the source's base name is appended.
pub fn resolve_copy_destination(current_dir: &Path, input: &str, src_name: &str) -> PathBuf {
    let dest = normalize_path(&current_dir.join(input));
    if dest.is_dir() { dest.join(src_name) } else { dest }
}

pub fn plan_copy(entry: &DirEntry, current_dir: &Path, input: &str) -> Result<CopyPlan, FileOpError> {
    ensure_accessible(entry, "copy")?;
    if entry.is_dir() {
        return Err(FileOpError::DirectoryCopyUnsupported);
    }
    let dest = resolve_copy_destination(current_dir, input, &entry.name_str());
    if same_path(entry.path(), &dest) {
        return Err(FileOpError::SameSourceAndDestination);
    }
    let overwrites = fs::symlink_metadata(&dest).is_ok();
    Ok(CopyPlan {
        src: entry.path().to_path_buf(),
        dest,
        overwrites,
    })
}

pub fn execute_copy(plan: &CopyPlan) -> Result<(), FileOpError> {
    copy_with_metadata(&plan.src, &plan.dest)?;
    tracing::info!(src = %plan.src.display(), dest = %plan.dest.display(), "copied");
    Ok(())
}

/// Copies a file with its permissions and access/modification times.
///
/// Timestamps are best effort: a filesystem that rejects them does not fail the copy.
pub fn copy_with_metadata(src: &Path, dest: &Path) -> io::Result<()> {
    fs::copy(src, dest)?;
    let md = fs::metadata(src)?;
    let atime = FileTime::from_last_access_time(&md);
    let mtime = FileTime::from_last_modification_time(&md);
    if let Err(e) = filetime::set_file_times(dest, atime, mtime) {
        tracing::debug!(dest = %dest.display(), error = %e, "could not preserve timestamps");
    }
    Ok(())
}

fn contains_separator(input: &str) -> bool {
    input.contains(MAIN_SEPARATOR) || input.contains('/')
}

fn same_path(a: &Path, b: &Path) -> bool {
    normalize_path(a) == normalize_path(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::list_dir;

    use std::error;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn entry_named(dir: &Path, name: &str) -> Result<DirEntry, Box<dyn error::Error>> {
        list_dir(dir)?
            .into_iter()
            .find(|e| e.name_str() == name)
            .ok_or_else(|| format!("{name} not listed").into())
    }

    #[test]
    fn delete_file_and_empty_dir() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("gone.txt"))?;
        fs::create_dir(dir.path().join("empty"))?;

        delete_entry(&entry_named(dir.path(), "gone.txt")?)?;
        delete_entry(&entry_named(dir.path(), "empty")?)?;
        assert!(list_dir(dir.path())?.is_empty());
        Ok(())
    }

    #[test]
    fn delete_non_empty_dir_is_rejected() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("full"))?;
        File::create(dir.path().join("full/keep.txt"))?;

        let result = delete_entry(&entry_named(dir.path(), "full")?);
        assert!(matches!(result, Err(FileOpError::DirectoryNotEmpty(ref n)) if n == "full"));
        assert!(dir.path().join("full/keep.txt").exists());
        Ok(())
    }

    #[test]
    fn inaccessible_entries_are_rejected() {
        let e = DirEntry::inaccessible("ghost".into(), PathBuf::from("/nowhere/ghost"));
        assert!(matches!(delete_entry(&e), Err(FileOpError::Inaccessible("delete"))));
        assert!(matches!(
            plan_move(&e, Path::new("/nowhere"), "x"),
            Err(FileOpError::Inaccessible("rename"))
        ));
        assert!(matches!(
            plan_copy(&e, Path::new("/nowhere"), "x"),
            Err(FileOpError::Inaccessible("copy"))
        ));
    }

    #[test]
    fn move_destination_resolution() {
        let cwd = Path::new("/home/user/work");
        assert_eq!(
            resolve_move_destination(cwd, "new.txt"),
            PathBuf::from("/home/user/work/new.txt")
        );
        assert_eq!(
            resolve_move_destination(cwd, "../other/new.txt"),
            PathBuf::from("/home/user/other/new.txt")
        );
        assert_eq!(
            resolve_move_destination(cwd, "/tmp/./x"),
            PathBuf::from("/tmp/x")
        );
    }

    #[test]
    fn rename_to_self_is_rejected() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("same.txt"))?;
        let entry = entry_named(dir.path(), "same.txt")?;

        assert!(matches!(
            plan_move(&entry, dir.path(), "same.txt"),
            Err(FileOpError::SameSourceAndDestination)
        ));
        assert!(matches!(
            plan_move(&entry, dir.path(), "./same.txt"),
            Err(FileOpError::SameSourceAndDestination)
        ));
        Ok(())
    }

    #[test]
    fn rename_and_move_into_dir() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("a.txt"))?;
        fs::create_dir(dir.path().join("sub"))?;

        let plan = plan_move(&entry_named(dir.path(), "a.txt")?, dir.path(), "b.txt")?;
        assert_eq!(plan.focus_name().as_deref(), Some("b.txt"));
        execute_move(&plan)?;
        assert!(dir.path().join("b.txt").exists());

        let plan = plan_move(&entry_named(dir.path(), "b.txt")?, dir.path(), "./sub")?;
        let target = execute_move(&plan)?;
        assert_eq!(target, dir.path().join("sub/b.txt"));
        assert!(!dir.path().join("b.txt").exists());
        Ok(())
    }

    #[test]
    fn copy_into_directory_appends_name() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let mut f = File::create(dir.path().join("data.csv"))?;
        writeln!(f, "1,2,3")?;
        fs::create_dir(dir.path().join("backup"))?;

        let plan = plan_copy(&entry_named(dir.path(), "data.csv")?, dir.path(), "backup")?;
        assert_eq!(plan.dest, dir.path().join("backup/data.csv"));
        assert!(!plan.overwrites);

        execute_copy(&plan)?;
        assert_eq!(fs::read_to_string(&plan.dest)?, "1,2,3\n");
        assert!(dir.path().join("data.csv").exists());
        Ok(())
    }

    #[test]
    fn copy_to_same_path_is_rejected_untouched() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("one.txt"))?;
        let entry = entry_named(dir.path(), "one.txt")?;

        let result = plan_copy(&entry, dir.path(), ".");
        assert!(matches!(result, Err(FileOpError::SameSourceAndDestination)));
        assert_eq!(list_dir(dir.path())?.len(), 1);
        Ok(())
    }

    #[test]
    fn copy_of_directory_is_unsupported() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("tree"))?;
        let result = plan_copy(&entry_named(dir.path(), "tree")?, dir.path(), "tree2");
        assert!(matches!(result, Err(FileOpError::DirectoryCopyUnsupported)));
        Ok(())
    }

    #[test]
    fn copy_flags_overwrite_and_keeps_mtime() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let src = dir.path().join("src.txt");
        fs::write(&src, "new")?;
        fs::write(dir.path().join("dst.txt"), "old")?;
        let past = FileTime::from_unix_time(1_000_000_000, 0);
        filetime::set_file_mtime(&src, past)?;

        let plan = plan_copy(&entry_named(dir.path(), "src.txt")?, dir.path(), "dst.txt")?;
        assert!(plan.overwrites);
        execute_copy(&plan)?;

        let md = fs::metadata(dir.path().join("dst.txt"))?;
        assert_eq!(fs::read_to_string(dir.path().join("dst.txt"))?, "new");
        assert_eq!(FileTime::from_last_modification_time(&md), past);
        Ok(())
    }
}
