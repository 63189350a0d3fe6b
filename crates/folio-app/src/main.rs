//! FOLIO console entry point.
//!
//! On a terminal, the console runs in raw mode and every key press goes to
//! the session, so history recall, completion and escape work as typed.
//! Piped input is read line by line instead and end of input quits once the
//! session is idle. Either way a frame loop drives streamed output.
//!
//! Theme: first CLI argument, else `FOLIO_THEME`, else `folio.toml`
//! (or the file named by `FOLIO_CONFIG`).

mod render;
mod terminal;

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};

use folio_terminal::{CommandRegistry, Effect, Session, register_builtins};
use folio_theme::ThemeTable;
use folio_types::config::FolioConfig;

use render::ScrollbackPrinter;
use terminal::{HostInput, RawMode};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::var("FOLIO_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("folio.toml"));
    let mut config = FolioConfig::load(&config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;

    // Resolve theme from CLI arg, FOLIO_THEME env var, or config.
    if let Some(theme) = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("FOLIO_THEME").ok())
    {
        config.theme = theme;
    }

    let themes = ThemeTable::builtin().context("parsing built-in themes")?;
    let mut registry = CommandRegistry::new();
    register_builtins(&mut registry).context("registering commands")?;
    let mut session = Session::new(registry, themes, &config)?;
    log::info!("Starting FOLIO (theme {})", session.active_theme());

    let frame = Duration::from_millis(u64::from(config.frame_ms));
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut screen = Screen::new(&session);
    render::paint_background(&mut out, session.theme())?;
    screen.present(&mut out, &mut session)?;

    if io::stdin().is_terminal() {
        let raw = RawMode::enable().context("entering raw mode")?;
        run_interactive(&mut out, &mut screen, &mut session, frame)?;
        drop(raw);
    } else {
        run_piped(&mut out, &mut screen, &mut session, frame)?;
    }

    render::restore(&mut out)?;
    log::info!("FOLIO shut down cleanly");
    Ok(())
}

/// Key-by-key loop; waits up to one frame for input, then ticks.
fn run_interactive<W: Write>(
    out: &mut W,
    screen: &mut Screen,
    session: &mut Session,
    frame: Duration,
) -> Result<()> {
    let mut last = Instant::now();
    loop {
        if event::poll(frame)? {
            if let Event::Key(event) = event::read()? {
                match terminal::map_key(event) {
                    Some(HostInput::Quit) => return Ok(()),
                    Some(HostInput::Key(key)) => {
                        session.handle_key(key);
                        if key.edits_text() {
                            screen.draw_input(out, session)?;
                        } else {
                            screen.present(out, session)?;
                        }
                    },
                    None => {},
                }
            }
        }
        tick(out, screen, session, &mut last)?;
    }
}

/// Line-by-line loop for redirected stdin.
fn run_piped<W: Write>(
    out: &mut W,
    screen: &mut Screen,
    session: &mut Session,
    frame: Duration,
) -> Result<()> {
    let input = spawn_stdin_reader();
    let mut eof = false;
    let mut last = Instant::now();
    loop {
        loop {
            match input.try_recv() {
                Ok(line) => {
                    session.submit_line(&line);
                    screen.present(out, session)?;
                },
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    eof = true;
                    break;
                },
            }
        }
        tick(out, screen, session, &mut last)?;
        if eof && !session.is_busy() {
            return Ok(());
        }
        thread::sleep(frame);
    }
}

/// Advance a running script by the time since the previous frame.
fn tick<W: Write>(
    out: &mut W,
    screen: &mut Screen,
    session: &mut Session,
    last: &mut Instant,
) -> io::Result<()> {
    let now = Instant::now();
    let dt = u32::try_from(now.duration_since(*last).as_millis()).unwrap_or(u32::MAX);
    *last = now;
    if session.is_busy() {
        session.tick(dt);
        screen.present(out, session)?;
    }
    Ok(())
}

/// What the console currently shows.
struct Screen {
    printer: ScrollbackPrinter,
    /// Theme the visible text was painted with.
    theme: String,
}

impl Screen {
    fn new(session: &Session) -> Self {
        Self {
            printer: ScrollbackPrinter::new(),
            theme: session.active_theme().to_string(),
        }
    }

    /// Bring the console up to date with `session` and perform its effects.
    fn present<W: Write>(&mut self, out: &mut W, session: &mut Session) -> io::Result<()> {
        if session.active_theme() != self.theme {
            self.theme = session.active_theme().to_string();
            render::paint_background(out, session.theme())?;
            self.printer.repaint(out)?;
        }

        if self.printer.has_pending(session.scrollback()) {
            render::clear_input_row(out)?;
            self.printer
                .flush(out, session.scrollback(), session.theme())?;
        }

        for effect in session.take_effects() {
            match effect {
                Effect::Navigate { url } => {
                    log::info!("Open in your browser: {url}");
                },
            }
        }

        self.draw_input(out, session)
    }

    /// Redraw the prompt row; nothing while a script is running.
    fn draw_input<W: Write>(&self, out: &mut W, session: &Session) -> io::Result<()> {
        if session.is_busy() {
            return out.flush();
        }
        render::draw_input_row(
            out,
            session.prompt(),
            session.input_buffer(),
            session.suggestions(),
            session.theme(),
        )
    }
}

/// Read stdin line by line on a background thread.
///
/// The channel disconnects at end of input.
fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                },
                Err(e) => {
                    log::error!("stdin read failed: {e}");
                    break;
                },
            }
        }
        log::debug!("stdin closed");
    });
    rx
}
