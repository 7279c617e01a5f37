//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a resize or `invalidate`) is a full
//! redraw; every other frame only rewrites the runs of cells that changed.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};
use log::debug;

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    /// Render into any writer (a `Vec<u8>` in tests)
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Switch to raw mode and the alternate screen
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enabling raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Restore the terminal. Safe to call after a failed `enter`.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("disabling raw mode")?;
        Ok(())
    }

    /// Force the next draw to be a full redraw (e.g. after a resize event).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb`, then swap it with the previous frame.
    ///
    /// After the call `fb` holds stale contents the caller redraws over; no
    /// frame is ever cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            stale => {
                debug!("full redraw at {}x{}", fb.width(), fb.height());
                encode_full_into(fb, &mut self.buf)?;
                let mut prev = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                prev.resize(fb.width(), fb.height());
                prev
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    /// The underlying writer
    pub fn writer(&self) -> &W {
        &self.out
    }

    fn flush_buf(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut pen = Pen::default();
    for y in 0..fb.height() {
        for cell in fb.row(y) {
            pen.print(out, cell.ch, cell.style)?;
        }
        if y + 1 < fb.height() {
            out.queue(Print("\r\n"))?;
        }
    }

    pen.reset(out)
}

/// Encode only the changed runs of `next` relative to `prev` into `out`.
///
/// Both buffers must have the same size.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    let mut wrote = false;

    for y in 0..next.height() {
        for (start, run) in changed_runs(prev.row(y), next.row(y)) {
            out.queue(cursor::MoveTo(start, y))?;
            for cell in run {
                pen.print(out, cell.ch, cell.style)?;
            }
            wrote = true;
        }
    }

    if wrote {
        pen.reset(out)?;
    }
    Ok(())
}

/// Tracks the active style so runs of equal style emit one set of attributes.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn print(&mut self, out: &mut Vec<u8>, ch: char, style: CellStyle) -> Result<()> {
        if self.style != Some(style) {
            out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
            out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
            out.queue(SetAttribute(Attribute::Reset))?;
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

    fn reset(&mut self, out: &mut Vec<u8>) -> Result<()> {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
        self.style = None;
        Ok(())
    }
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Maximal runs of differing cells in one row: (start column, new cells)
fn changed_runs<'a, T: PartialEq>(
    prev: &'a [T],
    next: &'a [T],
) -> impl Iterator<Item = (u16, &'a [T])> + 'a {
    let mut x = 0usize;
    std::iter::from_fn(move || {
        while x < next.len() && prev.get(x) == Some(&next[x]) {
            x += 1;
        }
        if x >= next.len() {
            return None;
        }
        let start = x;
        while x < next.len() && prev.get(x) != Some(&next[x]) {
            x += 1;
        }
        Some((start as u16, &next[start..x]))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changed_runs_coalesce_adjacent_cells() {
        let prev = ['.', '.', '.', '.', '.', '.'];
        let next = ['.', 'X', 'X', '.', 'Y', '.'];
        let runs: Vec<_> = changed_runs(&prev, &next).collect();
        assert_eq!(runs, vec![(1, &['X', 'X'][..]), (4, &['Y'][..])]);
    }

    #[test]
    fn test_identical_rows_have_no_runs() {
        let row = ['a', 'b'];
        assert_eq!(changed_runs(&row, &row).count(), 0);
    }

    #[test]
    fn test_first_draw_is_full_then_diff() {
        let mut renderer = TerminalRenderer::with_writer(Vec::new());

        let mut fb = FrameBuffer::new(4, 2);
        fb.put_str(0, 0, "AB", CellStyle::default());
        renderer.draw_swap(&mut fb).unwrap();
        let full_len = renderer.writer().len();
        assert!(full_len > 0);

        // Same contents again: nothing to emit.
        let mut same = FrameBuffer::new(4, 2);
        same.put_str(0, 0, "AB", CellStyle::default());
        renderer.draw_swap(&mut same).unwrap();
        assert_eq!(renderer.writer().len(), full_len);

        // One changed cell: a small diff.
        let mut changed = FrameBuffer::new(4, 2);
        changed.put_str(0, 0, "AC", CellStyle::default());
        renderer.draw_swap(&mut changed).unwrap();
        let diff_len = renderer.writer().len() - full_len;
        assert!(diff_len > 0);
        assert!(diff_len < full_len);
    }

    #[test]
    fn test_style_conversion() {
        assert_eq!(
            rgb_to_color(Rgb::new(1, 2, 3)),
            Color::Rgb { r: 1, g: 2, b: 3 }
        );
    }
}
