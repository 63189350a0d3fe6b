//! Shared test utilities for command tests.
//!
//! [`TestEnv`] owns everything an [`Environment`] borrows, with a seeded RNG
//! and a frozen clock.

use chrono::NaiveDate;

use folio_theme::ThemeTable;
use folio_types::config::Profile;
use folio_types::error::Result;
use folio_types::line::TerminalLine;

use crate::interpreter::{CommandOutput, CommandRegistry, Environment};
use crate::services::{FixedClock, SimpleRng};

pub struct TestEnv {
    pub registry: CommandRegistry,
    pub themes: ThemeTable,
    pub profile: Profile,
    pub active_theme: String,
    pub rng: SimpleRng,
    pub clock: FixedClock,
}

impl TestEnv {
    pub fn new() -> Self {
        let mut registry = CommandRegistry::new();
        crate::register_builtins(&mut registry).unwrap();
        Self {
            registry,
            themes: ThemeTable::builtin().unwrap(),
            profile: Profile::builtin().unwrap(),
            active_theme: "dracula".to_string(),
            rng: SimpleRng::new(0xF0_11_0),
            clock: FixedClock(fixed_time()),
        }
    }

    /// Resolve `name` and execute it directly, bypassing the session.
    pub fn run(&mut self, name: &str, args: &[&str]) -> Result<CommandOutput> {
        let cmd = self
            .registry
            .resolve(name)
            .unwrap_or_else(|| panic!("command not registered: {name}"));
        let mut env = Environment {
            registry: &self.registry,
            themes: &self.themes,
            active_theme: &self.active_theme,
            profile: &self.profile,
            rng: &mut self.rng,
            clock: &self.clock,
        };
        cmd.execute(args, &mut env)
    }
}

/// 2025-01-01 09:30:00, a Wednesday.
pub fn fixed_time() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

/// Lines of a `Lines` or `Signal` output.
pub fn lines_of(output: CommandOutput) -> Vec<TerminalLine> {
    match output {
        CommandOutput::Lines(lines) | CommandOutput::Signal { lines, .. } => lines,
        other => panic!("expected lines, got {other:?}"),
    }
}
