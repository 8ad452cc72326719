//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a resize or [`TerminalRenderer::invalidate`])
//! is a full redraw. Every other frame only rewrites runs of cells that changed.

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
    /// Last frame written to the terminal.
    shown: Option<FrameBuffer>,
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
            shown: None,
            buf: Vec::with_capacity(32 * 1024),
        }
    }

    /// Switch to raw mode and the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Restore the terminal. Safe to call after a failed frame.
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

    /// Force the next draw to be a full redraw (e.g. after a resize event).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Draw `fb`, then swap it with the previously shown frame.
    ///
    /// On return `fb` holds stale contents the caller can render over, so one
    /// pair of buffers is reused for the whole run.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.shown.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            _ => {
                encode_full_into(fb, &mut self.buf)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.shown = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out` without touching stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut pen = Pen::default();
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            let cell = fb.get(x, y).unwrap_or_default();
            pen.print(out, cell.ch, cell.style)?;
        }
        if y + 1 < fb.height() {
            out.queue(Print("\r\n"))?;
        }
    }
    reset_into(out)
}

/// Encode only the changed runs between `prev` and `next` into `out`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    let mut dirty = false;
    for (x, y, len) in changed_runs(prev, next) {
        dirty = true;
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let cell = next.get(x + dx, y).unwrap_or_default();
            pen.print(out, cell.ch, cell.style)?;
        }
    }
    if dirty {
        reset_into(out)?;
    }
    Ok(())
}

/// Tracks the active style so consecutive cells skip redundant SGR codes.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn print(&mut self, out: &mut Vec<u8>, ch: char, style: CellStyle) -> Result<()> {
        if self.style != Some(style) {
            out.queue(SetAttribute(Attribute::Reset))?;
            out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
            out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.style = Some(style);
        }
        out.queue(Print(ch))?;
        Ok(())
    }
}

fn reset_into(out: &mut Vec<u8>) -> Result<()> {
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

/// Horizontal runs `(x, y, len)` of cells that differ. Frames of equal size only.
fn changed_runs<'a>(
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
) -> impl Iterator<Item = (u16, u16, u16)> + 'a {
    let w = next.width();
    (0..next.height()).flat_map(move |y| {
        let differs = move |x: u16| prev.get(x, y) != next.get(x, y);
        let mut x = 0;
        std::iter::from_fn(move || {
            while x < w && !differs(x) {
                x += 1;
            }
            if x >= w {
                return None;
            }
            let start = x;
            while x < w && differs(x) {
                x += 1;
            }
            Some((start, y, x - start))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::Cell;

    fn x_cell() -> Cell {
        Cell {
            ch: 'X',
            style: CellStyle::default(),
        }
    }

    #[test]
    fn changed_runs_coalesce_adjacent_cells() {
        let a = FrameBuffer::new(8, 2);
        let mut b = FrameBuffer::new(8, 2);
        for x in 1..=3 {
            b.set(x, 0, x_cell());
        }
        b.set(6, 0, x_cell());
        b.set(0, 1, x_cell());

        let runs: Vec<_> = changed_runs(&a, &b).collect();
        assert_eq!(runs, vec![(1, 0, 3), (6, 0, 1), (0, 1, 1)]);
    }

    #[test]
    fn identical_frames_encode_nothing() {
        let a = FrameBuffer::new(4, 4);
        let mut out = Vec::new();
        encode_diff_into(&a, &a.clone(), &mut out).expect("encode");
        assert!(out.is_empty());
    }

    #[test]
    fn full_redraw_contains_every_glyph() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_str(0, 0, "ABC", CellStyle::default());
        fb.put_str(0, 1, "DEF", CellStyle::default());
        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).expect("encode");
        let text = String::from_utf8_lossy(&out);
        for ch in ["A", "B", "C", "D", "E", "F"] {
            assert!(text.contains(ch));
        }
    }

    #[test]
    fn style_changes_only_emitted_once_per_run() {
        let mut fb = FrameBuffer::new(4, 1);
        let red = CellStyle::fg_on(Rgb::new(255, 0, 0), Rgb::new(0, 0, 0));
        fb.put_str(0, 0, "RRRR", red);
        let mut out = Vec::new();
        encode_diff_into(&FrameBuffer::new(4, 1), &fb, &mut out).expect("encode");
        let text = String::from_utf8_lossy(&out);
        assert_eq!(text.matches("38;2;255;0;0").count(), 1);
    }
}
