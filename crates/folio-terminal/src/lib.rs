//! Command interpreter and terminal session.
//!
//! The terminal is a registry-based dispatch system. Commands implement the
//! `Command` trait and are registered by name and alias. The session parses
//! input lines, resolves the command name, dispatches `execute()`, and applies
//! whatever the command returned to its scrollback.

mod commands;
pub mod fun_commands;
pub mod info_commands;
mod interpreter;
pub mod link_commands;
mod script;
mod services;
mod session;

#[cfg(test)]
mod test_utils;

/// Register all built-in commands into a registry.
pub use commands::register_builtins;
/// Register the session directives (theme, clear) into a registry.
pub use commands::register_session_commands;
/// Register fun commands (date, joke, quote, matrix, hack, ...) into a registry.
pub use fun_commands::register_fun_commands;
/// Register profile commands (about, contact, skills, projects, github) into a registry.
pub use info_commands::register_info_commands;
/// A single executable command trait.
pub use interpreter::Command;
/// Output produced by a command (lines, clear, signal, stream).
pub use interpreter::CommandOutput;
/// Registry of available commands with name and alias lookup.
pub use interpreter::CommandRegistry;
/// Context passed to every command.
pub use interpreter::Environment;
/// Declarative side effect returned by a command.
pub use interpreter::Signal;
/// Split a command line into name and arguments.
pub use interpreter::parse_line;
/// Register the `open` command into a registry.
pub use link_commands::register_link_commands;
pub use script::{ScriptRunner, ScriptStep, TimedScript};
pub use services::{Clock, FixedClock, RandomSource, SimpleRng, SystemClock, choose};
/// A live terminal instance and the host effects it queues.
pub use session::{Effect, Session};
