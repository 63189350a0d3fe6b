//! Rendered terminal rows.

use serde::{Deserialize, Serialize};

/// Category of a terminal line. The active theme maps each kind to a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// Echo of a submitted command.
    Input,
    /// Plain command output.
    Output,
    /// Failure text.
    Error,
    /// Positive result or highlight.
    Success,
    /// Hints, headers and decoration.
    Info,
}

/// One row of scrollback.
///
/// `content` may be empty (a spacer) or contain embedded newlines, which the
/// host renders as several visual rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalLine {
    pub kind: LineKind,
    pub content: String,
}

impl TerminalLine {
    pub fn new(kind: LineKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }

    pub fn input(content: impl Into<String>) -> Self {
        Self::new(LineKind::Input, content)
    }

    pub fn output(content: impl Into<String>) -> Self {
        Self::new(LineKind::Output, content)
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::new(LineKind::Error, content)
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self::new(LineKind::Success, content)
    }

    pub fn info(content: impl Into<String>) -> Self {
        Self::new(LineKind::Info, content)
    }

    /// An empty `Output` spacer row.
    pub fn blank() -> Self {
        Self::new(LineKind::Output, "")
    }

    pub fn is_blank(&self) -> bool {
        self.content.is_empty()
    }

    /// Visual rows this line occupies once embedded newlines are split.
    pub fn visual_rows(&self) -> impl Iterator<Item = &str> {
        // `lines()` yields nothing for "", but a spacer still takes a row.
        let spacer = self.content.is_empty().then_some("");
        spacer.into_iter().chain(self.content.lines())
    }
}
