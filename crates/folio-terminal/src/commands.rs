//! Built-in command registration, `help`, and the session directives
//! (`clear`, `theme`).

use folio_types::error::{FolioError, Result};
use folio_types::line::TerminalLine;

use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment, Signal};

/// Inner width of the boxed section headers.
const BOX_WIDTH: usize = 60;

/// Register every built-in command into a registry.
///
/// Order matters: it is the order of `help` output and completion.
pub fn register_builtins(reg: &mut CommandRegistry) -> Result<()> {
    reg.register(Box::new(HelpCmd))?;
    crate::register_info_commands(reg)?;
    register_session_commands(reg)?;
    crate::register_fun_commands(reg)?;
    crate::register_link_commands(reg)?;
    Ok(())
}

/// Register the commands that act on the session itself (`theme`, `clear`).
pub fn register_session_commands(reg: &mut CommandRegistry) -> Result<()> {
    reg.register(Box::new(ThemeCmd))?;
    reg.register(Box::new(ClearCmd))?;
    Ok(())
}

/// A three-line box with `title` centered inside it.
pub(crate) fn boxed_header(title: &str) -> Vec<TerminalLine> {
    let bar = "═".repeat(BOX_WIDTH);
    vec![
        TerminalLine::info(format!("╔{bar}╗")),
        TerminalLine::info(format!("║{title:^width$}║", width = BOX_WIDTH)),
        TerminalLine::info(format!("╚{bar}╝")),
    ]
}

/// `name (alias, alias)` as listed by `help`.
fn display_name(cmd: &dyn Command) -> String {
    if cmd.aliases().is_empty() {
        cmd.name().to_string()
    } else {
        format!("{} ({})", cmd.name(), cmd.aliases().join(", "))
    }
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

struct HelpCmd;
impl Command for HelpCmd {
    fn name(&self) -> &str {
        "help"
    }
    fn description(&self) -> &str {
        "List every available command"
    }
    fn usage(&self) -> &str {
        "help [command]"
    }
    fn aliases(&self) -> &[&str] {
        &["man", "?"]
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        if let Some(&name) = args.first() {
            let cmd = env
                .registry
                .resolve(name)
                .ok_or_else(|| FolioError::Command(format!("no help for unknown command: {name}")))?;
            return Ok(CommandOutput::Lines(vec![
                TerminalLine::success(format!("  {} [{}]", display_name(cmd), cmd.category())),
                TerminalLine::output(format!("    └─ {}", cmd.description())),
                TerminalLine::output(format!("    usage: {}", cmd.usage())),
            ]));
        }

        let mut lines = boxed_header("AVAILABLE COMMANDS");
        lines.push(TerminalLine::blank());
        for cmd in env.registry.commands() {
            lines.push(TerminalLine::success(format!("  {}", display_name(cmd))));
            lines.push(TerminalLine::output(format!("    └─ {}", cmd.description())));
            lines.push(TerminalLine::blank());
        }
        lines.push(TerminalLine::info("Tip: press TAB to autocomplete commands"));
        Ok(CommandOutput::Lines(lines))
    }
}

// ---------------------------------------------------------------------------
// theme
// ---------------------------------------------------------------------------

struct ThemeCmd;
impl Command for ThemeCmd {
    fn name(&self) -> &str {
        "theme"
    }
    fn description(&self) -> &str {
        "List themes or switch the terminal theme (theme <name>)"
    }
    fn usage(&self) -> &str {
        "theme [name]"
    }
    fn aliases(&self) -> &[&str] {
        &["color", "cores"]
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let Some(requested) = args.first() else {
            let mut lines = vec![TerminalLine::info("Available themes:"), TerminalLine::blank()];
            for name in env.themes.names() {
                if name == env.active_theme {
                    lines.push(TerminalLine::success(format!("  • {name} (active)")));
                } else {
                    lines.push(TerminalLine::success(format!("  • {name}")));
                }
            }
            lines.push(TerminalLine::blank());
            lines.push(TerminalLine::info("Use: theme <name> to switch themes"));
            return Ok(CommandOutput::Lines(lines));
        };

        let name = requested.to_lowercase();
        if !env.themes.contains(&name) {
            return Ok(CommandOutput::Lines(vec![TerminalLine::error(format!(
                "Theme \"{name}\" not found!"
            ))]));
        }
        Ok(CommandOutput::Signal {
            lines: vec![TerminalLine::success(format!("Theme \"{name}\" applied!"))],
            signal: Signal::ThemeSwap { name },
        })
    }
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

struct ClearCmd;
impl Command for ClearCmd {
    fn name(&self) -> &str {
        "clear"
    }
    fn description(&self) -> &str {
        "Clear the terminal screen"
    }
    fn usage(&self) -> &str {
        "clear"
    }
    fn aliases(&self) -> &[&str] {
        &["cls", "limpar"]
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Clear)
    }
}
