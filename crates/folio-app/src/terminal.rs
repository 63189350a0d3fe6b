//! Console input: raw mode and key mapping.

use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use folio_types::input::Key;

/// Keeps the console in raw mode until dropped.
#[derive(Debug)]
pub struct RawMode(());

impl RawMode {
    pub fn enable() -> io::Result<Self> {
        if let Err(e) = enable_raw_mode() {
            log::error!("Failed to enable raw mode: {e}");
            return Err(e);
        }
        log::debug!("Enabled raw mode");
        Ok(Self(()))
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        log::debug!("Disabled raw mode");
    }
}

/// What a console key press means to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostInput {
    /// Forward to the session.
    Key(Key),
    /// Leave the program (Ctrl+C, Ctrl+D).
    Quit,
}

/// Map a crossterm key event; `None` for keys the terminal ignores.
pub fn map_key(event: KeyEvent) -> Option<HostInput> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let key = match event.code {
        KeyCode::Char('c' | 'd') if ctrl => return Some(HostInput::Quit),
        KeyCode::Char(_) if ctrl => return None,
        KeyCode::Char(ch) => Key::Char(ch),
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter => Key::Enter,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Tab => Key::Tab,
        KeyCode::Esc => Key::Escape,
        _ => return None,
    };
    Some(HostInput::Key(key))
}
