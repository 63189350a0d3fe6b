//! Error types for FOLIO.

use std::io;

/// Errors produced by the FOLIO crates.
#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    #[error("registry error: {0}")]
    Registry(String),

    #[error("command error: {0}")]
    Command(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("theme error: {0}")]
    Theme(String),

    #[error("script error: {0}")]
    Script(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, FolioError>;
