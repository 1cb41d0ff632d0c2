//! Prompt and status line state for dirpilot.
//!
//! Contains the [Prompt] struct tracking a modal footer prompt (confirmations and
//! destination input) and the [Status] shown on the footer between actions.

use crate::core::DirEntry;
use crate::core::fileops::CopyPlan;

/// What a footer prompt is asking for.
///
/// Each variant carries what is needed to finish the operation once the prompt is answered.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptKind {
    /// Yes/no before deleting `entry`. `prev_idx` is restored (clamped) afterwards.
    ConfirmDelete { entry: DirEntry, prev_idx: usize },
    /// New name or path for `entry`.
    RenameTo { entry: DirEntry },
    /// Destination file or directory for copying `entry`.
    CopyTo { entry: DirEntry },
    /// Yes/no before a copy replaces an existing file. `dest` is the input as typed.
    ConfirmOverwrite {
        entry: DirEntry,
        plan: CopyPlan,
        dest: String,
    },
}

impl PromptKind {
    /// Yes/no prompts default to "no" on anything but `y`.
    pub fn is_confirmation(&self) -> bool {
        matches!(
            self,
            PromptKind::ConfirmDelete { .. } | PromptKind::ConfirmOverwrite { .. }
        )
    }

    /// Neutral status shown when the prompt is dismissed or left empty.
    pub fn cancel_message(&self) -> &'static str {
        match self {
            PromptKind::ConfirmDelete { .. } => "Delete cancelled.",
            PromptKind::RenameTo { .. } => "Rename/Move cancelled.",
            PromptKind::CopyTo { .. } | PromptKind::ConfirmOverwrite { .. } => "Copy cancelled.",
        }
    }
}

/// A modal prompt drawn on the footer row.
///
/// Holds the label, the input buffer and the cursor position (in chars).
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    kind: PromptKind,
    label: String,
    buffer: String,
    cursor: usize,
}

impl Prompt {
    pub fn new(kind: PromptKind, label: String) -> Self {
        let label = if kind.is_confirmation() {
            format!("{} (y/N): ", label)
        } else {
            label
        };
        Self {
            kind,
            label,
            buffer: String::new(),
            cursor: 0,
        }
    }

    // Getters / accessors

    pub fn kind(&self) -> &PromptKind {
        &self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The trimmed answer, `None` if it is empty.
    pub fn answer(&self) -> Option<&str> {
        let trimmed = self.buffer.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// True if a confirmation prompt was answered with yes.
    pub fn confirmed(&self) -> bool {
        self.answer().is_some_and(|a| a.eq_ignore_ascii_case("y"))
    }

    pub fn into_kind(self) -> PromptKind {
        self.kind
    }

    // Editing

    pub fn insert(&mut self, c: char) {
        let byte_idx = self.byte_index();
        self.buffer.insert(byte_idx, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let byte_idx = self.byte_index();
        self.buffer.remove(byte_idx);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.buffer.chars().count() {
            let byte_idx = self.byte_index();
            self.buffer.remove(byte_idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.buffer.chars().count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.buffer.chars().count();
    }

    fn byte_index(&self) -> usize {
        self.buffer
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }
}

/// Severity of a status message. Errors are drawn in the attention color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Info,
    Error,
}

/// The transient footer message. Replaced or cleared on every handled key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Status {
    text: String,
    kind: StatusKind,
}

impl Status {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.kind = StatusKind::Info;
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.kind = StatusKind::Info;
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.kind = StatusKind::Error;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn rename_prompt() -> Prompt {
        let entry = DirEntry::inaccessible("x".into(), PathBuf::from("/x"));
        Prompt::new(PromptKind::RenameTo { entry }, "New name: ".into())
    }

    #[test]
    fn editing_with_cursor() {
        let mut p = rename_prompt();
        for c in "héllo".chars() {
            p.insert(c);
        }
        p.move_left();
        p.move_left();
        p.backspace();
        assert_eq!(p.buffer(), "hélo");
        p.home();
        p.insert('>');
        p.end();
        p.insert('!');
        assert_eq!(p.buffer(), ">hélo!");
        p.home();
        p.delete();
        assert_eq!(p.buffer(), "hélo!");
        assert_eq!(p.cursor(), 0);
    }

    #[test]
    fn blank_answer_is_none() {
        let mut p = rename_prompt();
        assert_eq!(p.answer(), None);
        p.insert(' ');
        assert_eq!(p.answer(), None);
        p.insert('a');
        p.insert(' ');
        assert_eq!(p.answer(), Some("a"));
    }

    #[test]
    fn confirmation_defaults_to_no() {
        let entry = DirEntry::inaccessible("x".into(), PathBuf::from("/x"));
        let mut p = Prompt::new(
            PromptKind::ConfirmDelete { entry, prev_idx: 0 },
            "DELETE 'x'?".into(),
        );
        assert_eq!(p.label(), "DELETE 'x'? (y/N): ");
        assert!(!p.confirmed());
        p.insert('n');
        assert!(!p.confirmed());
        p.backspace();
        p.insert('Y');
        assert!(p.confirmed());
    }

    #[test]
    fn status_kinds() {
        let mut s = Status::default();
        assert!(s.is_empty());
        s.error("Permission denied: /root");
        assert!(s.is_error());
        s.info("ok");
        assert!(!s.is_error());
        s.clear();
        assert!(s.is_empty());
    }
}
