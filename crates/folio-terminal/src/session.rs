//! Terminal session: scrollback, input line, history, completion and the
//! dispatch loop.
//!
//! A [`Session`] is driven entirely by discrete events from its host: key
//! presses (or whole submitted lines) and frame ticks. It is either idle,
//! accepting input, or busy playing a streamed script, during which every
//! input event is dropped.

use folio_theme::{Theme, ThemeTable};
use folio_types::config::{FolioConfig, Profile};
use folio_types::error::Result;
use folio_types::input::Key;
use folio_types::line::TerminalLine;

use crate::commands::boxed_header;
use crate::interpreter::{CommandOutput, CommandRegistry, Environment, Signal, parse_line};
use crate::script::ScriptRunner;
use crate::services::{Clock, RandomSource, SimpleRng, SystemClock};

/// Side effect the host must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Open `url` outside the terminal.
    Navigate { url: String },
}

/// One live terminal instance.
pub struct Session {
    registry: CommandRegistry,
    themes: ThemeTable,
    profile: Profile,
    prompt: String,

    scrollback: Vec<TerminalLine>,
    input: String,
    history: Vec<String>,
    /// Distance from the newest history entry; `None` when not browsing.
    history_cursor: Option<usize>,
    suggestions: Vec<String>,
    active_theme: String,

    /// Script being played; `Some` means busy.
    runner: Option<ScriptRunner>,
    effects: Vec<Effect>,

    rng: Box<dyn RandomSource>,
    clock: Box<dyn Clock>,
}

impl Session {
    /// Create a session with the system clock and a time-seeded RNG.
    pub fn new(registry: CommandRegistry, themes: ThemeTable, config: &FolioConfig) -> Result<Self> {
        Self::with_services(
            registry,
            themes,
            config,
            Box::new(SimpleRng::from_time()),
            Box::new(SystemClock),
        )
    }

    /// Create a session with explicit random and time sources.
    pub fn with_services(
        registry: CommandRegistry,
        themes: ThemeTable,
        config: &FolioConfig,
        rng: Box<dyn RandomSource>,
        clock: Box<dyn Clock>,
    ) -> Result<Self> {
        let profile = config.resolve_profile()?;
        let active_theme = themes.get_or_fallback(&config.theme).key.clone();
        log::info!(
            "Terminal session: {} commands, {} themes, theme {active_theme}",
            registry.len(),
            themes.len()
        );

        let mut session = Self {
            registry,
            themes,
            profile,
            prompt: config.prompt.clone(),
            scrollback: Vec::new(),
            input: String::new(),
            history: Vec::new(),
            history_cursor: None,
            suggestions: Vec::new(),
            active_theme,
            runner: None,
            effects: Vec::new(),
            rng,
            clock,
        };
        if config.welcome_banner {
            session.scrollback = welcome_lines(&session.profile);
        }
        Ok(session)
    }

    // -- Observers ----------------------------------------------------------

    pub fn scrollback(&self) -> &[TerminalLine] {
        &self.scrollback
    }

    pub fn input_buffer(&self) -> &str {
        &self.input
    }

    /// Completion candidates for the current input, in registry order.
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn is_busy(&self) -> bool {
        self.runner.is_some()
    }

    /// Key of the active theme.
    pub fn active_theme(&self) -> &str {
        &self.active_theme
    }

    /// Palette of the active theme.
    pub fn theme(&self) -> &Theme {
        self.themes.get_or_fallback(&self.active_theme)
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn history_cursor(&self) -> Option<usize> {
        self.history_cursor
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Drain pending host effects, oldest first.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    // -- Input events -------------------------------------------------------

    /// Route a key event to the matching transition.
    pub fn handle_key(&mut self, key: Key) {
        if self.is_busy() {
            return;
        }
        match key {
            Key::Char(ch) => {
                let mut text = self.input.clone();
                text.push(ch);
                self.input_changed(&text);
            },
            Key::Backspace => {
                let mut text = self.input.clone();
                text.pop();
                self.input_changed(&text);
            },
            Key::Enter => self.submit(),
            Key::Up => self.history_up(),
            Key::Down => self.history_down(),
            Key::Tab => self.tab_complete(),
            Key::Escape => self.escape(),
        }
    }

    /// Submit the current input line.
    pub fn submit(&mut self) {
        let line = self.input.clone();
        self.submit_line(&line);
    }

    /// Parse and run one command line.
    pub fn submit_line(&mut self, line: &str) {
        if self.is_busy() {
            log::debug!("Busy; dropped input {line:?}");
            return;
        }
        let trimmed = line.trim().to_string();
        let Some((name, args)) = parse_line(&trimmed) else {
            return;
        };

        self.history.push(trimmed.clone());
        self.history_cursor = None;
        self.input.clear();
        self.suggestions.clear();
        self.scrollback
            .push(TerminalLine::input(format!("{}{trimmed}", self.prompt)));

        log::debug!("dispatch {name} {args:?}");
        let outcome = match self.registry.resolve(&name) {
            Some(cmd) => {
                let mut env = Environment {
                    registry: &self.registry,
                    themes: &self.themes,
                    active_theme: &self.active_theme,
                    profile: &self.profile,
                    rng: self.rng.as_mut(),
                    clock: self.clock.as_ref(),
                };
                Some(cmd.execute(&args, &mut env))
            },
            None => None,
        };

        match outcome {
            None => {
                self.scrollback
                    .push(TerminalLine::error(format!("command not found: {name}")));
                self.scrollback.push(TerminalLine::info(
                    "Type \"help\" to see the available commands.",
                ));
            },
            Some(Ok(output)) => self.apply(output),
            Some(Err(e)) => self.scrollback.push(TerminalLine::error(e.to_string())),
        }
    }

    /// Replace the input text and recompute suggestions.
    pub fn input_changed(&mut self, text: &str) {
        if self.is_busy() {
            return;
        }
        self.set_input(text.to_string());
    }

    /// Recall the next older history entry.
    pub fn history_up(&mut self) {
        if self.is_busy() || self.history.is_empty() {
            return;
        }
        let last = self.history.len() - 1;
        let cursor = self.history_cursor.map_or(0, |c| (c + 1).min(last));
        self.history_cursor = Some(cursor);
        self.set_input(self.history[last - cursor].clone());
    }

    /// Recall the next newer history entry, or leave history browsing.
    pub fn history_down(&mut self) {
        if self.is_busy() {
            return;
        }
        match self.history_cursor {
            None => {},
            Some(0) => {
                self.history_cursor = None;
                self.set_input(String::new());
            },
            Some(c) => {
                let cursor = c - 1;
                self.history_cursor = Some(cursor);
                let last = self.history.len() - 1;
                self.set_input(self.history[last - cursor].clone());
            },
        }
    }

    /// Replace the input with the first suggestion.
    pub fn tab_complete(&mut self) {
        if self.is_busy() || self.input.is_empty() {
            return;
        }
        if let Some(first) = self.suggestions.first() {
            self.input = first.clone();
            self.suggestions.clear();
        }
    }

    /// Discard the input line.
    pub fn escape(&mut self) {
        if self.is_busy() {
            return;
        }
        self.input.clear();
        self.suggestions.clear();
    }

    // -- Time -----------------------------------------------------------------

    /// Advance a streamed script by `dt_ms`. No-op when idle.
    pub fn tick(&mut self, dt_ms: u32) {
        let Some(runner) = self.runner.as_mut() else {
            return;
        };
        self.scrollback.extend(runner.advance(dt_ms));
        if runner.is_done() {
            log::debug!("Script finished");
            self.runner = None;
        }
    }

    // -- Internals ------------------------------------------------------------

    fn set_input(&mut self, text: String) {
        self.suggestions = self
            .registry
            .complete(&text)
            .into_iter()
            .map(str::to_string)
            .collect();
        self.input = text;
    }

    fn apply(&mut self, output: CommandOutput) {
        match output {
            CommandOutput::Lines(lines) => self.scrollback.extend(lines),
            CommandOutput::Clear => self.scrollback.clear(),
            CommandOutput::Signal { lines, signal } => {
                self.scrollback.extend(lines);
                self.apply_signal(signal);
            },
            CommandOutput::Stream(script) => {
                log::debug!("Streaming {} lines", script.len());
                self.runner = Some(ScriptRunner::new(script));
                // Release any zero-delay opening steps right away.
                self.tick(0);
            },
        }
    }

    fn apply_signal(&mut self, signal: Signal) {
        match signal {
            Signal::ThemeSwap { name } => match self.themes.get(&name) {
                Some(theme) => {
                    log::info!("Theme switched: {} -> {}", self.active_theme, theme.key);
                    self.active_theme = theme.key.clone();
                },
                None => log::warn!("Ignoring switch to unknown theme '{name}'"),
            },
            Signal::Navigate { url } => {
                log::info!("Navigate: {url}");
                self.effects.push(Effect::Navigate { url });
            },
        }
    }
}

fn welcome_lines(profile: &Profile) -> Vec<TerminalLine> {
    let mut lines = vec![TerminalLine::blank()];
    lines.extend(boxed_header("WELCOME TO THE TERMINAL PORTFOLIO"));
    lines.push(TerminalLine::blank());
    lines.push(TerminalLine::success(format!(
        "Hello! I'm {}, a developer passionate about technology.",
        profile.name
    )));
    lines.push(TerminalLine::blank());
    lines.push(TerminalLine::info(
        "Type \"help\" or \"man\" to see every available command.",
    ));
    lines.push(TerminalLine::info("Type \"theme\" to see the available themes."));
    lines.push(TerminalLine::blank());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{ScriptStep, TimedScript};
    use crate::services::FixedClock;
    use crate::test_utils::fixed_time;
    use folio_types::line::LineKind;

    fn config() -> FolioConfig {
        FolioConfig {
            welcome_banner: false,
            ..FolioConfig::default()
        }
    }

    fn session_with(config: &FolioConfig) -> Session {
        let mut registry = CommandRegistry::new();
        crate::register_builtins(&mut registry).unwrap();
        Session::with_services(
            registry,
            ThemeTable::builtin().unwrap(),
            config,
            Box::new(SimpleRng::new(7)),
            Box::new(FixedClock(fixed_time())),
        )
        .unwrap()
    }

    fn session() -> Session {
        session_with(&config())
    }

    fn hack_script() -> TimedScript {
        TimedScript::from_toml(include_str!("../scripts/hack.toml")).unwrap()
    }

    fn type_text(s: &mut Session, text: &str) {
        for ch in text.chars() {
            s.handle_key(Key::Char(ch));
        }
    }

    #[test]
    fn starts_idle_and_empty() {
        let s = session();
        assert!(s.scrollback().is_empty());
        assert!(!s.is_busy());
        assert_eq!(s.active_theme(), "dracula");
        assert_eq!(s.history_cursor(), None);
    }

    #[test]
    fn welcome_banner_when_enabled() {
        let s = session_with(&FolioConfig::default());
        let lines = s.scrollback();
        assert!(lines.iter().any(|l| l.content.contains("WELCOME")));
        assert!(lines.iter().any(|l| l.content.contains("\"help\"")));
        assert!(s.history().is_empty());
    }

    #[test]
    fn unknown_config_theme_falls_back() {
        let cfg = FolioConfig {
            theme: "vaporwave".to_string(),
            ..config()
        };
        let s = session_with(&cfg);
        assert_eq!(s.active_theme(), "dracula");
        assert_eq!(s.theme().key, "dracula");
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut s = session();
        s.submit_line("");
        s.submit_line("   \t ");
        assert!(s.scrollback().is_empty());
        assert!(s.history().is_empty());
    }

    #[test]
    fn submission_echoes_and_records_trimmed_line() {
        let mut s = session();
        s.input_changed("  about  ");
        s.submit();
        assert_eq!(s.scrollback()[0], TerminalLine::input("> about"));
        assert!(s.scrollback().len() > 1);
        assert_eq!(s.history(), &["about".to_string()]);
        assert_eq!(s.input_buffer(), "");
        assert!(s.suggestions().is_empty());
    }

    #[test]
    fn command_name_is_case_insensitive() {
        let mut s = session();
        s.submit_line("HELP");
        assert!(s.scrollback().len() > 2);
        assert_ne!(s.scrollback()[1].kind, LineKind::Error);
        // History keeps the text as typed.
        assert_eq!(s.history()[0], "HELP");
    }

    #[test]
    fn unknown_command_is_error_then_info() {
        let mut s = session();
        s.submit_line("frobnicate now");
        let lines = s.scrollback();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].kind, LineKind::Error);
        assert_eq!(lines[1].content, "command not found: frobnicate");
        assert_eq!(lines[2].kind, LineKind::Info);
        assert!(!s.is_busy());
    }

    #[test]
    fn command_errors_become_error_lines() {
        let mut s = session();
        s.submit_line("help nope");
        let lines = s.scrollback();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].kind, LineKind::Error);
    }

    #[test]
    fn help_output_scales_with_registry() {
        let mut s = session();
        s.submit_line("help");
        let count = s.registry().len();
        // Echo + header (3) + blank + 3 per command + tip.
        assert_eq!(s.scrollback().len(), 1 + 4 + 3 * count + 1);
        for name in s.registry().names_for_completion() {
            assert!(s.scrollback().iter().any(|l| l.content.contains(name)));
        }
    }

    #[test]
    fn clear_empties_scrollback() {
        let mut s = session_with(&FolioConfig::default());
        s.submit_line("about");
        s.submit_line("clear");
        assert!(s.scrollback().is_empty());
        s.submit_line("about");
        s.submit_line("CLS");
        assert_eq!(s.scrollback().len(), 0);
        assert_eq!(s.history().len(), 4);
        s.submit_line("about");
        s.submit_line("limpar");
        assert!(s.scrollback().is_empty());
    }

    #[test]
    fn theme_switch_appends_one_success_line() {
        let mut s = session();
        s.submit_line("theme nord");
        assert_eq!(s.active_theme(), "nord");
        s.submit_line("theme dracula");
        assert_eq!(s.active_theme(), "dracula");
        let last = s.scrollback().last().unwrap();
        assert_eq!(last.kind, LineKind::Success);
        assert_eq!(s.scrollback().len(), 4);
    }

    #[test]
    fn unknown_theme_appends_one_error_line() {
        let mut s = session();
        s.submit_line("theme nonexistent");
        assert_eq!(s.active_theme(), "dracula");
        assert_eq!(s.scrollback().len(), 2);
        assert_eq!(s.scrollback()[1].kind, LineKind::Error);
    }

    #[test]
    fn theme_alias_switches_too() {
        let mut s = session();
        s.submit_line("color MONOKAI");
        assert_eq!(s.active_theme(), "monokai");
        assert_eq!(s.theme().key, "monokai");
    }

    #[test]
    fn theme_without_args_lists() {
        let mut s = session();
        s.submit_line("theme");
        assert_eq!(s.active_theme(), "dracula");
        assert!(s.scrollback().len() > 2);
    }

    #[test]
    fn matrix_switches_theme() {
        let mut s = session();
        s.submit_line("neo");
        assert_eq!(s.active_theme(), "matrix");
    }

    #[test]
    fn open_queues_navigation() {
        let mut s = session();
        s.submit_line("open linkedin");
        assert_eq!(
            s.take_effects(),
            vec![Effect::Navigate {
                url: "https://linkedin.com/in/natharuc".to_string()
            }]
        );
        assert!(s.take_effects().is_empty());
        s.submit_line("open nowhere");
        assert!(s.take_effects().is_empty());
    }

    #[test]
    fn sudo_sandwich_differs_from_denial() {
        let mut s = session();
        s.submit_line("sudo make me a sandwich");
        assert_eq!(s.scrollback().last().unwrap().kind, LineKind::Success);
        s.submit_line("sudo rm -rf /");
        let lines = s.scrollback();
        assert_eq!(lines[lines.len() - 2].kind, LineKind::Error);
    }

    // -- Completion ---------------------------------------------------------

    #[test]
    fn suggestions_follow_input() {
        let mut s = session();
        s.input_changed("he");
        assert_eq!(s.suggestions(), &["help".to_string()]);
        s.input_changed("c");
        assert_eq!(
            s.suggestions(),
            &["contact".to_string(), "clear".to_string(), "coffee".to_string()]
        );
        s.input_changed("");
        assert!(s.suggestions().is_empty());
    }

    #[test]
    fn tab_completes_first_suggestion() {
        let mut s = session();
        type_text(&mut s, "he");
        s.handle_key(Key::Tab);
        assert_eq!(s.input_buffer(), "help");
        assert!(s.suggestions().is_empty());
    }

    #[test]
    fn tab_without_suggestions_is_noop() {
        let mut s = session();
        s.tab_complete();
        assert_eq!(s.input_buffer(), "");
        s.input_changed("zzz");
        s.tab_complete();
        assert_eq!(s.input_buffer(), "zzz");
    }

    #[test]
    fn escape_clears_input_and_suggestions() {
        let mut s = session();
        type_text(&mut s, "pro");
        assert!(!s.suggestions().is_empty());
        s.handle_key(Key::Escape);
        assert_eq!(s.input_buffer(), "");
        assert!(s.suggestions().is_empty());
    }

    #[test]
    fn keys_edit_and_submit() {
        let mut s = session();
        type_text(&mut s, "datx");
        s.handle_key(Key::Backspace);
        s.handle_key(Key::Char('e'));
        assert_eq!(s.input_buffer(), "date");
        s.handle_key(Key::Enter);
        assert_eq!(s.history(), &["date".to_string()]);
        assert!(
            s.scrollback()
                .iter()
                .any(|l| l.content == "  Wednesday, January 1, 2025")
        );
    }

    #[test]
    fn backspace_on_empty_input() {
        let mut s = session();
        s.handle_key(Key::Backspace);
        assert_eq!(s.input_buffer(), "");
    }

    // -- History ------------------------------------------------------------

    #[test]
    fn history_up_walks_back_and_holds_oldest() {
        let mut s = session();
        for cmd in ["about", "skills", "date"] {
            s.submit_line(cmd);
        }
        s.history_up();
        assert_eq!(s.input_buffer(), "date");
        s.history_up();
        assert_eq!(s.input_buffer(), "skills");
        s.history_up();
        assert_eq!(s.input_buffer(), "about");
        s.history_up();
        assert_eq!(s.input_buffer(), "about");
        assert_eq!(s.history_cursor(), Some(2));
    }

    #[test]
    fn history_down_returns_to_empty_input() {
        let mut s = session();
        s.submit_line("about");
        s.submit_line("skills");
        s.history_up();
        s.history_up();
        s.history_down();
        assert_eq!(s.input_buffer(), "skills");
        s.history_down();
        assert_eq!(s.input_buffer(), "");
        assert_eq!(s.history_cursor(), None);
        s.input_changed("typed");
        s.history_down();
        assert_eq!(s.input_buffer(), "typed");
    }

    #[test]
    fn history_on_empty_is_noop() {
        let mut s = session();
        s.history_up();
        s.history_down();
        assert_eq!(s.history_cursor(), None);
        assert_eq!(s.input_buffer(), "");
    }

    #[test]
    fn history_recall_recomputes_suggestions() {
        let mut s = session();
        s.submit_line("he");
        s.history_up();
        assert_eq!(s.suggestions(), &["help".to_string()]);
    }

    #[test]
    fn history_keeps_duplicates_and_unknowns() {
        let mut s = session();
        s.submit_line("date");
        s.submit_line("date");
        s.submit_line("nope");
        assert_eq!(s.history(), &["date", "date", "nope"]);
    }

    #[test]
    fn submission_resets_cursor() {
        let mut s = session();
        s.submit_line("about");
        s.history_up();
        s.submit();
        assert_eq!(s.history_cursor(), None);
        assert_eq!(s.history().len(), 2);
    }

    // -- Streaming ----------------------------------------------------------

    fn run_until_idle(s: &mut Session) -> usize {
        let mut frames = 0;
        while s.is_busy() {
            s.tick(16);
            frames += 1;
            assert!(frames < 100_000, "script never finished");
        }
        frames
    }

    #[test]
    fn hack_emits_its_script_in_order() {
        let mut s = session();
        s.submit_line("hack");
        assert!(s.is_busy());
        run_until_idle(&mut s);

        let script = hack_script();
        let expected: Vec<TerminalLine> = script.steps().iter().map(ScriptStep::to_line).collect();
        assert_eq!(&s.scrollback()[1..], expected.as_slice());
    }

    #[test]
    fn busy_session_drops_input() {
        let mut s = session();
        s.submit_line("hacker");
        assert!(s.is_busy());
        let history = s.history().to_vec();

        s.submit_line("about");
        s.input_changed("he");
        s.history_up();
        s.handle_key(Key::Char('x'));
        s.escape();
        assert_eq!(s.history(), history.as_slice());
        assert_eq!(s.input_buffer(), "");
        assert!(s.suggestions().is_empty());
        assert_eq!(s.history_cursor(), None);

        run_until_idle(&mut s);
        // Only the echo and the script made it to scrollback.
        assert_eq!(s.scrollback().len(), 1 + hack_script().len());
        assert!(!s.scrollback().iter().any(|l| l.content == "> about"));

        s.submit_line("about");
        assert_eq!(s.history().len(), 2);
    }

    #[test]
    fn tick_when_idle_is_noop() {
        let mut s = session();
        s.tick(1_000);
        assert!(s.scrollback().is_empty());
    }

    #[test]
    fn one_long_tick_finishes_script() {
        let mut s = session();
        s.submit_line("hack");
        s.tick(u32::MAX);
        assert!(!s.is_busy());
        assert_eq!(s.scrollback().len(), 1 + hack_script().len());
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn history_round_trip(
                entries in proptest::collection::vec("zz[a-z]{1,6}( [a-z]{1,4})?", 1..12),
                extra in 0usize..4,
            ) {
                let mut s = session();
                for e in &entries {
                    s.submit_line(e);
                }
                for (i, expected) in entries.iter().rev().enumerate() {
                    s.history_up();
                    prop_assert_eq!(s.input_buffer(), expected.as_str());
                    prop_assert_eq!(s.history_cursor(), Some(i));
                }
                for _ in 0..extra {
                    s.history_up();
                    prop_assert_eq!(s.input_buffer(), entries[0].as_str());
                }
                for _ in 0..entries.len() {
                    s.history_down();
                }
                prop_assert_eq!(s.input_buffer(), "");
                prop_assert_eq!(s.history_cursor(), None);
            }

            #[test]
            fn cursor_stays_in_bounds(ops in proptest::collection::vec(0u8..3, 0..40)) {
                let mut s = session();
                for op in ops {
                    match op {
                        0 => s.submit_line("zzcmd"),
                        1 => s.history_up(),
                        _ => s.history_down(),
                    }
                    if let Some(c) = s.history_cursor() {
                        prop_assert!(c < s.history().len());
                    }
                }
            }

            #[test]
            fn unknown_tokens_yield_error_then_info(token in "zz[a-z0-9]{0,8}") {
                let mut s = session();
                s.submit_line(&token);
                let lines = s.scrollback();
                prop_assert_eq!(lines.len(), 3);
                prop_assert_eq!(lines[1].kind, LineKind::Error);
                prop_assert_eq!(lines[2].kind, LineKind::Info);
            }
        }
    }
}
