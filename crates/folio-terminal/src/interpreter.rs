//! Command trait, registry, and lookup.
//!
//! Commands are registered once at start-up. Names and aliases share one
//! namespace; a collision is a configuration error and fails registration.

use std::collections::HashMap;

use folio_theme::ThemeTable;
use folio_types::config::Profile;
use folio_types::error::{FolioError, Result};
use folio_types::line::TerminalLine;

use crate::script::TimedScript;
use crate::services::{Clock, RandomSource};

/// Output produced by a command.
#[derive(Debug, Clone)]
pub enum CommandOutput {
    /// Lines appended to scrollback.
    Lines(Vec<TerminalLine>),
    /// Signal to empty the scrollback buffer.
    Clear,
    /// Lines plus a side effect for the session or host to apply.
    Signal {
        lines: Vec<TerminalLine>,
        signal: Signal,
    },
    /// Output emitted over time; the session is busy until it finishes.
    Stream(TimedScript),
}

/// Declarative side effect requested by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// Switch the session's active theme.
    ThemeSwap {
        /// Theme key (already validated or well known).
        name: String,
    },
    /// Ask the host to open a URL in a new context.
    Navigate { url: String },
}

/// Read-only session context plus injected services, passed to every command.
pub struct Environment<'a> {
    /// Every registered command (for `help`).
    pub registry: &'a CommandRegistry,
    /// Available color schemes.
    pub themes: &'a ThemeTable,
    /// Key of the theme currently in use.
    pub active_theme: &'a str,
    /// Portfolio owner.
    pub profile: &'a Profile,
    /// Random source for jokes and quotes.
    pub rng: &'a mut dyn RandomSource,
    /// Wall clock for `date`.
    pub clock: &'a dyn Clock,
}

/// A single executable command.
pub trait Command {
    /// The command name (what the user types). Lowercase.
    fn name(&self) -> &str;

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Usage string (e.g. "open \[site\]").
    fn usage(&self) -> &str;

    /// Additional names that resolve to this command.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// Command category, shown by `help <command>`.
    fn category(&self) -> &str {
        "general"
    }

    /// Execute the command with the given arguments and environment.
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput>;
}

/// Registry of available commands.
///
/// Keeps registration order, which is the order of `help` output and of
/// completion candidates.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
    names: HashMap<String, usize>,
    aliases: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command.
    ///
    /// Fails if the name or any alias is malformed or already taken by
    /// another command's name or alias.
    pub fn register(&mut self, cmd: Box<dyn Command>) -> Result<()> {
        let name = cmd.name().to_string();
        check_token(&name, &name)?;
        if name != name.to_lowercase() {
            return Err(FolioError::Registry(format!(
                "command name must be lowercase: {name}"
            )));
        }
        if self.is_taken(&name) {
            return Err(FolioError::Registry(format!("duplicate command name: {name}")));
        }

        let mut aliases: Vec<String> = Vec::with_capacity(cmd.aliases().len());
        for alias in cmd.aliases() {
            check_token(&name, alias)?;
            let alias = alias.to_lowercase();
            if alias == name || aliases.contains(&alias) || self.is_taken(&alias) {
                return Err(FolioError::Registry(format!(
                    "alias '{alias}' of '{name}' collides with an existing command"
                )));
            }
            aliases.push(alias);
        }

        let idx = self.commands.len();
        log::debug!("Registered command {name} (aliases: {aliases:?})");
        self.names.insert(name, idx);
        for alias in aliases {
            self.aliases.insert(alias, idx);
        }
        self.commands.push(cmd);
        Ok(())
    }

    fn is_taken(&self, token: &str) -> bool {
        self.names.contains_key(token) || self.aliases.contains_key(token)
    }

    /// Resolve a typed token to a command: names first, then aliases.
    /// Matching is exact after lowercasing.
    pub fn resolve(&self, token: &str) -> Option<&dyn Command> {
        let token = token.to_lowercase();
        self.names
            .get(&token)
            .or_else(|| self.aliases.get(&token))
            .map(|&idx| self.commands[idx].as_ref())
    }

    /// All command names in registration order. Aliases are not included.
    pub fn names_for_completion(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    /// Names starting with `prefix` (case-insensitive). Empty prefix -> none.
    pub fn complete(&self, prefix: &str) -> Vec<&str> {
        if prefix.is_empty() {
            return Vec::new();
        }
        let prefix = prefix.to_lowercase();
        self.commands
            .iter()
            .map(|c| c.name())
            .filter(|name| name.starts_with(&prefix))
            .collect()
    }

    /// Registered commands in registration order.
    pub fn commands(&self) -> impl Iterator<Item = &dyn Command> {
        self.commands.iter().map(|c| c.as_ref())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

fn check_token(owner: &str, token: &str) -> Result<()> {
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(FolioError::Registry(format!(
            "invalid command token '{token}' (registering '{owner}')"
        )));
    }
    Ok(())
}

/// Split a trimmed command line into a lowercased command name and its
/// arguments. Returns `None` for a blank line.
pub fn parse_line(line: &str) -> Option<(String, Vec<&str>)> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next()?.to_lowercase();
    Some((name, tokens.collect()))
}
