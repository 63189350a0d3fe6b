//! Timed scripts: output emitted line by line over time.
//!
//! A script is plain data (an ordered list of delayed steps) so the content
//! lives in TOML and the timing policy lives in [`ScriptRunner`]. The runner
//! never sleeps; the owner advances it with the elapsed frame time.

use serde::Deserialize;

use folio_types::error::{FolioError, Result};
use folio_types::line::{LineKind, TerminalLine};

/// One delayed line of a script.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScriptStep {
    /// Wait after the previous step before this line appears.
    #[serde(default = "default_delay")]
    pub delay_ms: u32,
    #[serde(default = "default_kind")]
    pub kind: LineKind,
    #[serde(default)]
    pub text: String,
}

fn default_delay() -> u32 {
    100
}
fn default_kind() -> LineKind {
    LineKind::Output
}

impl ScriptStep {
    pub fn new(delay_ms: u32, kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            delay_ms,
            kind,
            text: text.into(),
        }
    }

    pub fn to_line(&self) -> TerminalLine {
        TerminalLine::new(self.kind, self.text.clone())
    }
}

/// An ordered, fixed list of timed steps.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimedScript {
    #[serde(rename = "step")]
    steps: Vec<ScriptStep>,
}

impl TimedScript {
    pub fn new(steps: Vec<ScriptStep>) -> Result<Self> {
        if steps.is_empty() {
            return Err(FolioError::Script("script has no steps".to_string()));
        }
        Ok(Self { steps })
    }

    /// Parse `[[step]]` entries from TOML.
    pub fn from_toml(src: &str) -> Result<Self> {
        let script: TimedScript = toml::from_str(src)?;
        Self::new(script.steps)
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Time from start until the last line appears.
    pub fn total_duration_ms(&self) -> u64 {
        self.steps.iter().map(|s| u64::from(s.delay_ms)).sum()
    }
}

/// Plays a [`TimedScript`] against a caller-supplied clock.
#[derive(Debug, Clone)]
pub struct ScriptRunner {
    script: TimedScript,
    next: usize,
    /// Time accumulated since the last emitted step.
    elapsed_ms: u64,
}

impl ScriptRunner {
    pub fn new(script: TimedScript) -> Self {
        Self {
            script,
            next: 0,
            elapsed_ms: 0,
        }
    }

    /// Advance by `dt_ms` and return the lines that became due, in order.
    ///
    /// A long frame releases every step that elapsed during it.
    pub fn advance(&mut self, dt_ms: u32) -> Vec<TerminalLine> {
        self.elapsed_ms = self.elapsed_ms.saturating_add(u64::from(dt_ms));
        let mut due = Vec::new();
        while let Some(step) = self.script.steps.get(self.next) {
            let delay = u64::from(step.delay_ms);
            if self.elapsed_ms < delay {
                break;
            }
            self.elapsed_ms -= delay;
            due.push(step.to_line());
            self.next += 1;
        }
        if self.is_done() {
            self.elapsed_ms = 0;
        }
        due
    }

    pub fn is_done(&self) -> bool {
        self.next >= self.script.steps.len()
    }
}
