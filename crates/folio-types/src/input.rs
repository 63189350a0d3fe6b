//! Host-agnostic key events.
//!
//! Every front end maps its native keyboard input to these variants. The
//! terminal session never sees raw platform input.

use serde::{Deserialize, Serialize};

/// A key event delivered to the terminal session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Character typed into the input line.
    Char(char),
    /// Backspace / delete-left.
    Backspace,
    /// Submit the current input line.
    Enter,
    /// Recall an older history entry.
    Up,
    /// Recall a newer history entry.
    Down,
    /// Complete the command name.
    Tab,
    /// Discard the current input line.
    Escape,
}

impl Key {
    /// Whether this key edits the text of the input line.
    pub fn edits_text(self) -> bool {
        matches!(self, Key::Char(_) | Key::Backspace)
    }
}
