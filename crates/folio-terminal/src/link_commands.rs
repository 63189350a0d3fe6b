//! `open`: resolve a site name or URL and ask the host to navigate to it.

use folio_types::config::Profile;
use folio_types::error::Result;
use folio_types::line::TerminalLine;

use crate::interpreter::{Command, CommandOutput, Environment, Signal};

/// How `open` interpreted its argument.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    /// A URL to navigate to.
    Url(String),
    /// Neither a known site nor anything URL-shaped.
    Unknown,
}

/// Resolve `arg` against the profile's sites, then as a URL, then as a bare
/// domain.
fn resolve_target(profile: &Profile, arg: &str) -> Target {
    if let Some(link) = profile.link(arg) {
        return Target::Url(link.url.clone());
    }
    if arg.starts_with("http://") || arg.starts_with("https://") {
        return Target::Url(arg.to_string());
    }
    if arg.contains('.') {
        return Target::Url(format!("https://{arg}"));
    }
    Target::Unknown
}

fn usage_lines(profile: &Profile) -> Vec<TerminalLine> {
    let width = profile
        .links
        .iter()
        .map(|l| l.name.chars().count())
        .max()
        .unwrap_or(0);
    let mut lines = vec![
        TerminalLine::info("[OPEN] Usage: open <site>"),
        TerminalLine::blank(),
        TerminalLine::output("Available sites:"),
    ];
    for link in &profile.links {
        lines.push(TerminalLine::output(format!(
            "  • {:<width$} - Open my {}",
            link.name, link.label
        )));
    }
    lines.push(TerminalLine::blank());
    lines.push(TerminalLine::info("You can also use direct URLs:"));
    lines.push(TerminalLine::output("  e.g. open https://example.com"));
    lines
}

struct OpenCmd;
impl Command for OpenCmd {
    fn name(&self) -> &str {
        "open"
    }
    fn description(&self) -> &str {
        "Open a link in a new tab (e.g. open github, open linkedin)"
    }
    fn usage(&self) -> &str {
        "open <site|url>"
    }
    fn aliases(&self) -> &[&str] {
        &["abrir", "link"]
    }
    fn category(&self) -> &str {
        "profile"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let Some(&arg) = args.first() else {
            return Ok(CommandOutput::Lines(usage_lines(env.profile)));
        };
        let target = arg.to_lowercase();
        match resolve_target(env.profile, arg) {
            Target::Url(url) => {
                log::debug!("open {target} -> {url}");
                Ok(CommandOutput::Signal {
                    lines: vec![
                        TerminalLine::success(format!("[SUCCESS] Opening {target}...")),
                        TerminalLine::output(format!("  {url}")),
                    ],
                    signal: Signal::Navigate { url },
                })
            },
            Target::Unknown => Ok(CommandOutput::Lines(vec![
                TerminalLine::error(format!("[ERROR] Site \"{target}\" not found!")),
                TerminalLine::info("Type \"open\" without arguments to see the available sites."),
            ])),
        }
    }
}

/// Register link commands into a registry.
pub fn register_link_commands(reg: &mut crate::CommandRegistry) -> Result<()> {
    reg.register(Box::new(OpenCmd))
}
