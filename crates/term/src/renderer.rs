//! TerminalRenderer: flushes framebuffers to the real terminal.
//!
//! The first frame (and any frame after a resize) is drawn in full; later
//! frames only rewrite runs of cells that changed.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw (after a resize event).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb`, diffing against the previous frame.
    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.buf.clear();
        match self.last.as_mut() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(prev, fb, &mut self.buf)?;
                prev.clone_from(fb);
            }
            _ => {
                encode_full_into(fb, &mut self.buf)?;
                self.last = Some(fb.clone());
            }
        }
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Emits style changes only when the style differs from the last cell.
struct StyleTracker {
    current: Option<CellStyle>,
}

impl StyleTracker {
    fn new() -> Self {
        Self { current: None }
    }

    fn apply(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        if self.current == Some(style) {
            return Ok(());
        }
        out.queue(SetAttribute(Attribute::Reset))?;
        out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
        out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
        if style.bold {
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            out.queue(SetAttribute(Attribute::Dim))?;
        }
        self.current = Some(style);
        Ok(())
    }
}

/// Encode a full-frame redraw into `out` without touching stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut styles = StyleTracker::new();

    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..fb.width() {
            let cell = fb.get(x, y).unwrap_or_default();
            styles.apply(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only the changed runs of `next` relative to `prev`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let runs = changed_runs(prev, next);
    if runs.is_empty() {
        return Ok(());
    }

    let mut styles = StyleTracker::new();
    for (x, y, len) in runs {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let cell = next.get(x + dx, y).unwrap_or_default();
            styles.apply(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// `(x, y, len)` runs of differing cells, row by row.
fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<(u16, u16, u16)> {
    if prev.width() != next.width() || prev.height() != next.height() {
        return (0..next.height()).map(|y| (0, y, next.width())).collect();
    }

    let mut runs = Vec::new();
    for y in 0..next.height() {
        let mut run_start: Option<u16> = None;
        for x in 0..next.width() {
            let differs = prev.get(x, y) != next.get(x, y);
            match (differs, run_start) {
                (true, None) => run_start = Some(x),
                (false, Some(start)) => {
                    runs.push((start, y, x - start));
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = run_start {
            runs.push((start, y, next.width() - start));
        }
    }
    runs
}
