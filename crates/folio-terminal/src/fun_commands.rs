//! Fun and easter-egg commands: date, joke, quote, matrix, hack, sudo,
//! ascii, coffee, exit.

use folio_types::error::{FolioError, Result};
use folio_types::line::TerminalLine;

use crate::interpreter::{Command, CommandOutput, Environment, Signal};
use crate::script::TimedScript;
use crate::services::choose;

/// Step list of the `hack` sequence.
const HACK_SCRIPT: &str = include_str!("../scripts/hack.toml");

pub(crate) const JOKES: &[&str] = &[
    "Why do programmers prefer dark mode?\nBecause light attracts bugs!",
    "What is a procrastinator's favorite command?\ngit commit -m \"later\"",
    "Why did the programmer get arrested?\nThey killed a process!",
    "What do you call 8 hobbits?\nA hobbyte!",
    "Why do Java developers wear glasses?\nBecause they can't C#.",
    "A SQL query walks into a bar, goes up to two tables and asks:\n\"Can I join you?\"",
    "There are 10 kinds of people in the world:\nthose who understand binary and those who don't.",
    "Coffee: the fuel that turns code into software.",
];

pub(crate) const QUOTES: &[&str] = &[
    "\"Code is like humor. When you have to explain it, it's bad.\" - Cory House",
    "\"First, solve the problem. Then, write the code.\" - John Johnson",
    "\"Experience is the name everyone gives to their mistakes.\" - Oscar Wilde",
    "\"In order to be irreplaceable, one must always be different.\" - Coco Chanel",
    "\"Java is to JavaScript what car is to Carpet.\" - Chris Heilmann",
    "\"Knowledge is power.\" - Francis Bacon",
    "\"Sometimes it pays to stay in bed on Monday, rather than spending the rest of the week debugging Monday's code.\" - Dan Salomon",
    "\"Perfection is achieved not when there is nothing more to add, but rather when there is nothing more to take away.\" - Antoine de Saint-Exupery",
    "\"Code never lies, comments sometimes do.\" - Ron Jeffries",
    "\"Simplicity is the soul of efficiency.\" - Austin Freeman",
];

fn pick(env: &mut Environment<'_>, items: &[&'static str]) -> Result<&'static str> {
    choose(&mut *env.rng, items)
        .copied()
        .ok_or_else(|| FolioError::Command("nothing to choose from".to_string()))
}

// ---------------------------------------------------------------------------
// date
// ---------------------------------------------------------------------------

struct DateCmd;
impl Command for DateCmd {
    fn name(&self) -> &str {
        "date"
    }
    fn description(&self) -> &str {
        "Show the current date and time"
    }
    fn usage(&self) -> &str {
        "date"
    }
    fn aliases(&self) -> &[&str] {
        &["time", "hora"]
    }
    fn category(&self) -> &str {
        "fun"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let now = env.clock.now();
        Ok(CommandOutput::Lines(vec![
            TerminalLine::info("[Date and Time]"),
            TerminalLine::blank(),
            TerminalLine::success(format!("  {}", now.format("%A, %B %-d, %Y"))),
            TerminalLine::output(format!("  {}", now.format("%H:%M:%S"))),
        ]))
    }
}

// ---------------------------------------------------------------------------
// joke
// ---------------------------------------------------------------------------

struct JokeCmd;
impl Command for JokeCmd {
    fn name(&self) -> &str {
        "joke"
    }
    fn description(&self) -> &str {
        "Tell a programmer joke"
    }
    fn usage(&self) -> &str {
        "joke"
    }
    fn aliases(&self) -> &[&str] {
        &["piada", "fun"]
    }
    fn category(&self) -> &str {
        "fun"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let joke = pick(env, JOKES)?;
        Ok(CommandOutput::Lines(vec![TerminalLine::success(joke)]))
    }
}

// ---------------------------------------------------------------------------
// quote
// ---------------------------------------------------------------------------

struct QuoteCmd;
impl Command for QuoteCmd {
    fn name(&self) -> &str {
        "quote"
    }
    fn description(&self) -> &str {
        "Show an inspiring programming quote"
    }
    fn usage(&self) -> &str {
        "quote"
    }
    fn aliases(&self) -> &[&str] {
        &["inspiration", "citacao"]
    }
    fn category(&self) -> &str {
        "fun"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let quote = pick(env, QUOTES)?;
        Ok(CommandOutput::Lines(vec![
            TerminalLine::blank(),
            TerminalLine::info(quote),
            TerminalLine::blank(),
        ]))
    }
}

// ---------------------------------------------------------------------------
// matrix
// ---------------------------------------------------------------------------

struct MatrixCmd;
impl Command for MatrixCmd {
    fn name(&self) -> &str {
        "matrix"
    }
    fn description(&self) -> &str {
        "Easter egg: enter the Matrix"
    }
    fn usage(&self) -> &str {
        "matrix"
    }
    fn aliases(&self) -> &[&str] {
        &["neo"]
    }
    fn category(&self) -> &str {
        "fun"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Signal {
            lines: vec![
                TerminalLine::blank(),
                TerminalLine::success("Wake up, Neo..."),
                TerminalLine::success("The Matrix has you..."),
                TerminalLine::success("Follow the white rabbit."),
                TerminalLine::blank(),
                TerminalLine::info("Knock, knock, Neo."),
                TerminalLine::blank(),
                TerminalLine::success("> Matrix theme activated!"),
            ],
            signal: Signal::ThemeSwap {
                name: "matrix".to_string(),
            },
        })
    }
}

// ---------------------------------------------------------------------------
// hack
// ---------------------------------------------------------------------------

struct HackCmd {
    script: TimedScript,
}

impl HackCmd {
    fn new() -> Result<Self> {
        let script = TimedScript::from_toml(HACK_SCRIPT)?;
        log::debug!(
            "hack script: {} steps, {}ms",
            script.len(),
            script.total_duration_ms()
        );
        Ok(Self { script })
    }
}

impl Command for HackCmd {
    fn name(&self) -> &str {
        "hack"
    }
    fn description(&self) -> &str {
        "Simulate a \"hack\" (totally fake)"
    }
    fn usage(&self) -> &str {
        "hack"
    }
    fn aliases(&self) -> &[&str] {
        &["hacker"]
    }
    fn category(&self) -> &str {
        "fun"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Stream(self.script.clone()))
    }
}

// ---------------------------------------------------------------------------
// sudo
// ---------------------------------------------------------------------------

struct SudoCmd;
impl Command for SudoCmd {
    fn name(&self) -> &str {
        "sudo"
    }
    fn description(&self) -> &str {
        "Try to run a command as superuser"
    }
    fn usage(&self) -> &str {
        "sudo <command>"
    }
    fn category(&self) -> &str {
        "fun"
    }
    fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        if args.join(" ") == "make me a sandwich" {
            return Ok(CommandOutput::Lines(vec![TerminalLine::success(
                "> Okay, here's your sandwich!",
            )]));
        }
        Ok(CommandOutput::Lines(vec![
            TerminalLine::error("[ERROR] Permission denied!"),
            TerminalLine::info("You are not in the sudoers file. This incident will be reported."),
        ]))
    }
}

// ---------------------------------------------------------------------------
// ascii
// ---------------------------------------------------------------------------

struct AsciiCmd;
impl Command for AsciiCmd {
    fn name(&self) -> &str {
        "ascii"
    }
    fn description(&self) -> &str {
        "Show ASCII art"
    }
    fn usage(&self) -> &str {
        "ascii"
    }
    fn aliases(&self) -> &[&str] {
        &["banner"]
    }
    fn category(&self) -> &str {
        "fun"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Lines(vec![
            TerminalLine::blank(),
            TerminalLine::info("    ____  ___________    ____"),
            TerminalLine::info("   / __ \\/ ____/ __ \\  / __ \\"),
            TerminalLine::info("  / / / / __/ / / / / / / / /"),
            TerminalLine::info(" / /_/ / /___/ /_/ / / /_/ /"),
            TerminalLine::info("/_____/_____/\\____/  \\____/"),
            TerminalLine::blank(),
            TerminalLine::success("  Welcome to my Terminal Portfolio!"),
            TerminalLine::blank(),
        ]))
    }
}

// ---------------------------------------------------------------------------
// coffee
// ---------------------------------------------------------------------------

struct CoffeeCmd;
impl Command for CoffeeCmd {
    fn name(&self) -> &str {
        "coffee"
    }
    fn description(&self) -> &str {
        "Brew a coffee"
    }
    fn usage(&self) -> &str {
        "coffee"
    }
    fn aliases(&self) -> &[&str] {
        &["cafe"]
    }
    fn category(&self) -> &str {
        "fun"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Lines(vec![
            TerminalLine::info("> Brewing coffee..."),
            TerminalLine::blank(),
            TerminalLine::success("  [██████████] 100%"),
            TerminalLine::blank(),
            TerminalLine::success("> Your coffee is ready!"),
            TerminalLine::info("You are now 100% more productive!"),
        ]))
    }
}

// ---------------------------------------------------------------------------
// exit
// ---------------------------------------------------------------------------

struct ExitCmd;
impl Command for ExitCmd {
    fn name(&self) -> &str {
        "exit"
    }
    fn description(&self) -> &str {
        "Leave the terminal (or not)"
    }
    fn usage(&self) -> &str {
        "exit"
    }
    fn aliases(&self) -> &[&str] {
        &["quit", "sair"]
    }
    fn category(&self) -> &str {
        "fun"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Lines(vec![
            TerminalLine::error("[WARNING] You cannot leave..."),
            TerminalLine::error("You are stuck here FOREVER!"),
            TerminalLine::blank(),
            TerminalLine::info("Just kidding! But why leave? Stay a little longer!"),
        ]))
    }
}

/// Register fun commands into a registry.
///
/// Fails if the embedded hack script does not parse.
pub fn register_fun_commands(reg: &mut crate::CommandRegistry) -> Result<()> {
    reg.register(Box::new(DateCmd))?;
    reg.register(Box::new(JokeCmd))?;
    reg.register(Box::new(QuoteCmd))?;
    reg.register(Box::new(MatrixCmd))?;
    reg.register(Box::new(HackCmd::new()?))?;
    reg.register(Box::new(SudoCmd))?;
    reg.register(Box::new(AsciiCmd))?;
    reg.register(Box::new(CoffeeCmd))?;
    reg.register(Box::new(ExitCmd))?;
    Ok(())
}
