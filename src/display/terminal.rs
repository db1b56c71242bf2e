/// crossterm-backed `Renderer`.
///
/// The logical screen is scaled onto whatever grid of cells the terminal
/// has; every rectangle is clipped to that grid.

use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};

use super::{Align, Renderer, Rgb};
use crate::assets::Sprite;
use crate::config::GameConfig;
use crate::entities::Rect;

const SPRITE_INK: Color = Color::White;

impl From<Rgb> for Color {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        Color::Rgb { r, g, b }
    }
}

/// Half-open range of cells `[col0, col1) × [row0, row1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSpan {
    pub col0: u16,
    pub row0: u16,
    pub col1: u16,
    pub row1: u16,
}

pub struct TerminalRenderer<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    width: f64,
    height: f64,
    background: Rgb,
    /// Re-read the terminal size every frame.
    follow_terminal: bool,
}

impl<W: Write> TerminalRenderer<W> {
    /// Renderer sized to the current terminal.
    pub fn new(out: W, config: &GameConfig) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let mut renderer = Self::with_size(out, cols, rows, config);
        renderer.follow_terminal = true;
        Ok(renderer)
    }

    pub fn with_size(out: W, cols: u16, rows: u16, config: &GameConfig) -> Self {
        Self {
            out,
            cols,
            rows,
            width: config.width,
            height: config.height,
            background: config.palette.background,
            follow_terminal: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn col(&self, x: f64) -> i64 {
        (x * self.cols as f64 / self.width).floor() as i64
    }

    fn row(&self, y: f64) -> i64 {
        (y * self.rows as f64 / self.height).floor() as i64
    }

    /// Cells covered by `rect`, or `None` if it is entirely off screen.
    /// Anything with a positive size covers at least one cell.
    pub fn cells(&self, rect: Rect) -> Option<CellSpan> {
        if rect.w <= 0 || rect.h <= 0 {
            return None;
        }
        let c0 = self.col(rect.x as f64);
        let r0 = self.row(rect.y as f64);
        let c1 = self.col(rect.right() as f64).max(c0 + 1);
        let r1 = self.row(rect.bottom() as f64).max(r0 + 1);

        let clip = |v: i64, max: u16| v.clamp(0, max as i64) as u16;
        let span = CellSpan {
            col0: clip(c0, self.cols),
            row0: clip(r0, self.rows),
            col1: clip(c1, self.cols),
            row1: clip(r1, self.rows),
        };
        (span.col0 < span.col1 && span.row0 < span.row1).then_some(span)
    }

    fn paint(&mut self, col: u16, row: u16, n: u16) -> io::Result<()> {
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(Print(" ".repeat(n as usize)))?;
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn clear(&mut self, color: Rgb) -> io::Result<()> {
        if self.follow_terminal {
            let (cols, rows) = terminal::size()?;
            self.cols = cols;
            self.rows = rows;
        }
        self.background = color;
        self.out.queue(style::SetBackgroundColor(color.into()))?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) -> io::Result<()> {
        let Some(span) = self.cells(rect) else {
            return Ok(());
        };
        self.out.queue(style::SetBackgroundColor(color.into()))?;
        for row in span.row0..span.row1 {
            self.paint(span.col0, row, span.col1 - span.col0)?;
        }
        Ok(())
    }

    fn outline_rect(&mut self, rect: Rect, color: Rgb, width: f64) -> io::Result<()> {
        let Some(span) = self.cells(rect) else {
            return Ok(());
        };
        // Border thickness in cells, at least one.
        let tx = (self.col(width).max(1) as u16).min(span.col1 - span.col0);
        let ty = (self.row(width).max(1) as u16).min(span.row1 - span.row0);
        let cols = span.col1 - span.col0;

        self.out.queue(style::SetBackgroundColor(color.into()))?;
        for row in span.row0..span.row1 {
            if row < span.row0 + ty || row >= span.row1 - ty {
                self.paint(span.col0, row, cols)?;
            } else {
                self.paint(span.col0, row, tx)?;
                self.paint(span.col1 - tx, row, tx)?;
            }
        }
        Ok(())
    }

    fn blit(&mut self, sprite: &Sprite, rect: Rect) -> io::Result<()> {
        let Some(span) = self.cells(rect) else {
            return Ok(());
        };
        // Sample in the unclipped rect so a half-visible sprite isn't squashed.
        let full_c0 = self.col(rect.x as f64);
        let full_r0 = self.row(rect.y as f64);
        let full_w = (self.col(rect.right() as f64) - full_c0).max(1) as f64;
        let full_h = (self.row(rect.bottom() as f64) - full_r0).max(1) as f64;

        self.out.queue(style::SetBackgroundColor(self.background.into()))?;
        self.out.queue(style::SetForegroundColor(SPRITE_INK))?;
        for row in span.row0..span.row1 {
            let v = (row as i64 - full_r0) as f64 / full_h;
            for col in span.col0..span.col1 {
                let u = (col as i64 - full_c0) as f64 / full_w;
                let ch = sprite.sample(u, v);
                if ch != ' ' {
                    self.out.queue(cursor::MoveTo(col, row))?;
                    self.out.queue(Print(ch))?;
                }
            }
        }
        Ok(())
    }

    fn text(&mut self, text: &str, x: f64, y: f64, color: Rgb, align: Align) -> io::Result<()> {
        let len = text.chars().count() as i64;
        let row = self.row(y);
        let mut col = self.col(x);
        if align == Align::Center {
            col -= len / 2;
        }
        if row < 0 || row >= self.rows as i64 {
            return Ok(());
        }
        // Drop whatever falls off either side.
        let skip = (-col).max(0) as usize;
        let col = col.max(0);
        let room = (self.cols as i64 - col).max(0) as usize;
        let visible: String = text.chars().skip(skip).take(room).collect();
        if visible.is_empty() {
            return Ok(());
        }

        self.out.queue(cursor::MoveTo(col as u16, row as u16))?;
        self.out.queue(style::SetBackgroundColor(self.background.into()))?;
        self.out.queue(style::SetForegroundColor(color.into()))?;
        self.out.queue(Print(visible))?;
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}

// ── Terminal mode ─────────────────────────────────────────────────────────────

/// Switch to raw mode on the alternate screen. Returns whether key-release
/// reporting could be enabled (kitty-protocol terminals only).
pub fn enter<W: Write>(out: &mut W) -> io::Result<bool> {
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    Ok(keyboard_enhanced)
}

/// Undo `enter`. Best effort: every step runs even if an earlier one fails.
pub fn leave<W: Write>(out: &mut W, keyboard_enhanced: bool) {
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}
