//! Console rendering of the session scrollback.

use std::io::{self, Write};

use crossterm::cursor::{MoveTo, MoveToColumn, RestorePosition, SavePosition};
use crossterm::queue;
use crossterm::style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};

use folio_theme::Theme;
use folio_types::color::Color;
use folio_types::line::TerminalLine;

fn term_color(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Queue one scrollback line, one console row per visual row.
///
/// Only the foreground is reset afterwards so the painted background stays.
pub fn write_line<W: Write>(out: &mut W, line: &TerminalLine, theme: &Theme) -> io::Result<()> {
    let fg = term_color(theme.color_for(line.kind));
    for row in line.visual_rows() {
        queue!(
            out,
            SetForegroundColor(fg),
            Print(row),
            SetForegroundColor(style::Color::Reset),
            Print("\r\n"),
        )?;
    }
    Ok(())
}

/// Prints scrollback incrementally.
///
/// Remembers how many lines it has written; a scrollback shorter than that
/// was cleared, so the screen is wiped first.
#[derive(Debug, Default)]
pub struct ScrollbackPrinter {
    printed: usize,
}

impl ScrollbackPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `lines` differs from what is on screen.
    pub fn has_pending(&self, lines: &[TerminalLine]) -> bool {
        lines.len() != self.printed
    }

    /// Write every line appended since the last call.
    pub fn flush<W: Write>(
        &mut self,
        out: &mut W,
        lines: &[TerminalLine],
        theme: &Theme,
    ) -> io::Result<()> {
        if lines.len() < self.printed {
            clear_screen(out)?;
            self.printed = 0;
        }
        for line in &lines[self.printed..] {
            write_line(out, line, theme)?;
        }
        self.printed = lines.len();
        out.flush()
    }

    /// Forget what was printed, so the next flush repaints everything.
    pub fn repaint<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        clear_screen(out)?;
        self.printed = 0;
        Ok(())
    }
}

fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))
}

/// Paint the whole screen with the theme background.
pub fn paint_background<W: Write>(out: &mut W, theme: &Theme) -> io::Result<()> {
    queue!(out, SetBackgroundColor(term_color(theme.background)))?;
    clear_screen(out)
}

/// Erase the row holding the prompt.
pub fn clear_input_row<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))
}

/// Redraw the prompt row: prompt, typed text, then any completion hints.
///
/// The cursor is left at the end of the typed text.
pub fn draw_input_row<W: Write>(
    out: &mut W,
    prompt: &str,
    input: &str,
    suggestions: &[String],
    theme: &Theme,
) -> io::Result<()> {
    clear_input_row(out)?;
    queue!(
        out,
        SetForegroundColor(term_color(theme.prompt)),
        Print(prompt),
        SetForegroundColor(term_color(theme.input)),
        Print(input),
    )?;
    if !suggestions.is_empty() {
        queue!(
            out,
            SavePosition,
            SetForegroundColor(term_color(theme.info)),
            Print(format!("  [{}]", suggestions.join(" "))),
            RestorePosition,
            SetForegroundColor(term_color(theme.input)),
        )?;
    }
    out.flush()
}

/// Leave the console with default colors on a fresh row.
pub fn restore<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, ResetColor, Print("\r\n"))?;
    out.flush()
}
