//! The dirpilot process bridge.
//!
//! Hands the terminal to an external program (the script interpreter or the pager),
//! blocks until it exits and takes the terminal back.
//!
//! The terminal is only ever handed over through [TerminalLease], which restores
//! terminal mode exactly once: either explicitly through [TerminalLease::restore]
//! or, on any early return or panic, when the lease is dropped.
//!
//! Tool lookup happens before the lease is taken, so a missing tool is reported
//! without ever leaving the UI.

use crate::errors::BridgeError;

use std::ffi::OsStr;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// Ownership handoff of the real terminal.
///
/// `release` gives the terminal back to cooked mode so a child can use it,
/// `restore` takes it back and forces a full redraw on the next frame.
pub trait TerminalControl {
    fn release(&mut self) -> io::Result<()>;
    fn restore(&mut self) -> io::Result<()>;
}

/// Scoped ownership of a released terminal.
///
/// While a lease is alive a child process owns the display.
pub struct TerminalLease<'a, T: TerminalControl + ?Sized> {
    term: &'a mut T,
    restored: bool,
}

impl<'a, T: TerminalControl + ?Sized> TerminalLease<'a, T> {
    /// Releases the terminal. If releasing fails halfway, the terminal is restored again
    /// before the error is returned.
    pub fn acquire(term: &'a mut T) -> io::Result<Self> {
        let lease = TerminalLease {
            term,
            restored: false,
        };
        lease.term.release()?;
        Ok(lease)
    }

    /// Restores the terminal and reports whether that worked.
    pub fn restore(mut self) -> io::Result<()> {
        self.restored = true;
        self.term.restore()
    }
}

impl<T: TerminalControl + ?Sized> Drop for TerminalLease<'_, T> {
    fn drop(&mut self) {
        if !self.restored {
            self.restored = true;
            if let Err(e) = self.term.restore() {
                tracing::warn!(error = %e, "terminal restore on drop failed");
            }
        }
    }
}

/// The two ways the bridge is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// Run a script with the configured interpreter.
    Run,
    /// Page a file with the configured pager.
    View,
}

/// A resolved external program ready to be launched on a single path.
#[derive(Debug, Clone)]
pub struct ExternalCommand {
    program: PathBuf,
    pause_after: bool,
}

impl ExternalCommand {
    /// Looks up `name` on `PATH`.
    ///
    /// # Returns
    /// [BridgeError::ToolMissing] if it cannot be found. The terminal is not touched.
    pub fn resolve(name: &str) -> Result<Self, BridgeError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(BridgeError::ToolMissing(name.to_string()));
        }
        match which::which(trimmed) {
            Ok(program) => Ok(ExternalCommand {
                program,
                pause_after: false,
            }),
            Err(_) => Err(BridgeError::ToolMissing(trimmed.to_string())),
        }
    }

    /// Wait for Enter after the child exits, so its output stays on screen.
    pub fn pause_after(mut self, pause: bool) -> Self {
        self.pause_after = pause;
        self
    }
}

/// Runs `command arg` with the terminal handed over, and returns its exit status.
///
/// The terminal is restored on every path: success, non-zero exit, spawn failure.
/// A restore failure after a successful run is reported as [BridgeError::Terminal].
pub fn run_external<T: TerminalControl + ?Sized>(
    term: &mut T,
    command: &ExternalCommand,
    arg: &Path,
) -> Result<ExitStatus, BridgeError> {
    let lease = TerminalLease::acquire(term).map_err(BridgeError::Terminal)?;
    tracing::info!(program = %command.program.display(), arg = %arg.display(), "terminal suspended");

    let status = Command::new(&command.program).arg(arg).status();

    if let Ok(status) = &status
        && command.pause_after
    {
        wait_for_enter(&command.program, *status);
    }

    lease.restore().map_err(BridgeError::Terminal)?;
    tracing::info!("terminal restored");

    match status {
        Ok(status) => {
            tracing::info!(code = ?status.code(), "external program exited");
            Ok(status)
        }
        Err(e) => {
            tracing::warn!(error = %e, "external program failed to start");
            Err(BridgeError::Spawn(e))
        }
    }
}

fn wait_for_enter(program: &Path, status: ExitStatus) {
    let name = program.file_name().unwrap_or(OsStr::new("")).to_string_lossy();
    let mut stdout = io::stdout();
    let _ = writeln!(
        stdout,
        "\n--- {} finished with exit code {} ---",
        name,
        exit_code_str(status)
    );
    let _ = write!(stdout, "--- Press Enter to return ---");
    let _ = stdout.flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}

/// Exit code as shown in the status line. Signals have no code on unix.
pub fn exit_code_str(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => code.to_string(),
        None => "signal".to_string(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Records every release/restore call.
    #[derive(Default)]
    pub(crate) struct RecordingTerminal {
        pub(crate) calls: Vec<&'static str>,
        pub(crate) fail_release: bool,
    }

    impl RecordingTerminal {
        pub(crate) fn count(&self, call: &str) -> usize {
            self.calls.iter().filter(|c| **c == call).count()
        }
    }

    impl TerminalControl for RecordingTerminal {
        fn release(&mut self) -> io::Result<()> {
            self.calls.push("release");
            if self.fail_release {
                return Err(io::Error::other("release failed"));
            }
            Ok(())
        }

        fn restore(&mut self) -> io::Result<()> {
            self.calls.push("restore");
            Ok(())
        }
    }

    fn tool_available(name: &str) -> bool {
        which::which(name).is_ok()
    }

    macro_rules! skip_if_missing {
        ($name:expr) => {
            if !tool_available($name) {
                return Ok(());
            }
        };
    }

    #[test]
    fn missing_tool_never_suspends() -> Result<(), Box<dyn std::error::Error>> {
        let err = ExternalCommand::resolve("definitely-not-a-real-tool-4242")
            .err()
            .ok_or("lookup unexpectedly succeeded")?;
        assert!(matches!(err, BridgeError::ToolMissing(_)));
        assert_eq!(
            err.to_string(),
            "Error: 'definitely-not-a-real-tool-4242' command not found."
        );
        Ok(())
    }

    #[test]
    fn empty_tool_name_is_missing() {
        assert!(matches!(
            ExternalCommand::resolve("  "),
            Err(BridgeError::ToolMissing(_))
        ));
    }

    #[test]
    fn successful_run_restores_once() -> Result<(), Box<dyn std::error::Error>> {
        skip_if_missing!("true");
        let mut term = RecordingTerminal::default();
        let cmd = ExternalCommand::resolve("true")?;

        let status = run_external(&mut term, &cmd, Path::new("."))?;
        assert!(status.success());
        assert_eq!(term.calls, vec!["release", "restore"]);
        Ok(())
    }

    #[test]
    fn nonzero_exit_restores_once() -> Result<(), Box<dyn std::error::Error>> {
        skip_if_missing!("false");
        let mut term = RecordingTerminal::default();
        let cmd = ExternalCommand::resolve("false")?;

        let status = run_external(&mut term, &cmd, Path::new("."))?;
        assert!(!status.success());
        assert_eq!(exit_code_str(status), "1");
        assert_eq!(term.count("release"), 1);
        assert_eq!(term.count("restore"), 1);
        Ok(())
    }

    #[test]
    fn spawn_failure_restores_once() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempfile::tempdir()?;
        // Resolved once, then removed: the spawn itself fails.
        let cmd = ExternalCommand {
            program: tmp.path().join("vanished-tool"),
            pause_after: false,
        };
        let mut term = RecordingTerminal::default();

        let result = run_external(&mut term, &cmd, Path::new("."));
        assert!(matches!(result, Err(BridgeError::Spawn(_))));
        assert_eq!(term.calls, vec!["release", "restore"]);
        Ok(())
    }

    #[test]
    fn failed_release_still_restores() -> Result<(), Box<dyn std::error::Error>> {
        skip_if_missing!("true");
        let mut term = RecordingTerminal {
            fail_release: true,
            ..Default::default()
        };
        let cmd = ExternalCommand::resolve("true")?;

        let result = run_external(&mut term, &cmd, Path::new("."));
        assert!(matches!(result, Err(BridgeError::Terminal(_))));
        assert_eq!(term.calls, vec!["release", "restore"]);
        Ok(())
    }

    #[test]
    fn lease_restores_on_drop() {
        let mut term = RecordingTerminal::default();
        {
            let _lease = TerminalLease::acquire(&mut term);
        }
        assert_eq!(term.calls, vec!["release", "restore"]);
    }
}
