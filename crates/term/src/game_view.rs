//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{shape_of, ActivePiece, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::scores::HighScore;
use crate::types::{Color, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// High scores shown in the side panel
pub const PANEL_SCORES: usize = 5;

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Screen rectangle occupied by the bordered well
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// Terminal renderer for the game screen: well, side panel and overlays.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render one frame into an existing framebuffer.
    ///
    /// Callers keep one framebuffer across frames; it is only reallocated when
    /// the viewport grows.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        scores: &[HighScore],
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_w = BOARD_WIDTH as u16 * self.cell_w;
        let board_h = BOARD_HEIGHT as u16 * self.cell_h;
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            w: frame_w,
            h: frame_h,
        };

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            board_w,
            board_h,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), WELL_BG),
        );
        draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG));

        for y in 0..BOARD_HEIGHT {
            for (x, cell) in snap.board.row(y).iter().enumerate() {
                match cell {
                    Some(color) => self.draw_block(fb, frame, x as i8, y as i8, *color),
                    None => self.draw_empty(fb, frame, x as u16, y as u16),
                }
            }
        }

        if let (Some(active), Some(ghost)) = (snap.active, snap.ghost) {
            let style = CellStyle::new(Rgb::new(140, 140, 140), WELL_BG).dim();
            for (x, y) in active.at(ghost).cells() {
                if on_board(x, y) {
                    self.fill_cell(fb, frame, x as u16, y as u16, '░', style);
                }
            }
        }

        if let Some(active) = snap.active {
            self.draw_piece(fb, frame, &active);
        }

        self.draw_side_panel(fb, snap, scores, viewport, frame);

        if snap.paused {
            draw_overlay(fb, frame, &["PAUSED", "P TO RESUME"]);
        } else if snap.game_over {
            draw_overlay(fb, frame, &["GAME OVER", "ENTER: RESTART"]);
        } else if snap.idle {
            draw_overlay(fb, frame, &["BLOCKFALL", "PRESS ENTER"]);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        scores: &[HighScore],
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, scores, viewport, &mut fb);
        fb
    }

    fn draw_piece(&self, fb: &mut FrameBuffer, frame: Frame, piece: &ActivePiece) {
        for (x, y) in piece.cells() {
            self.draw_block(fb, frame, x, y, piece.color);
        }
    }

    /// Board cell (x, y); cells above the well are skipped.
    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8, color: Color) {
        if !on_board(x, y) {
            return;
        }
        let style = CellStyle::new(color.into(), WELL_BG).bold();
        self.fill_cell(fb, frame, x as u16, y as u16, '█', style);
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), WELL_BG).dim();
        self.fill_cell(fb, frame, x, y, '·', style);
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, ch: char, style: CellStyle) {
        let px = frame.x + 1 + x * self.cell_w;
        let py = frame.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        scores: &[HighScore],
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }
        let panel_w = viewport.width - panel_x;

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = frame.y;
        for (name, n) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        y = self.draw_preview(fb, panel_x, y, snap.next);
        y = y.saturating_add(1);

        if scores.is_empty() || y >= viewport.height {
            return;
        }
        fb.put_str(panel_x, y, "HIGH SCORES", label);
        y = y.saturating_add(1);

        let dim = value.dim();
        for (rank, entry) in scores.iter().take(PANEL_SCORES).enumerate() {
            if y >= viewport.height {
                break;
            }
            // "1 NAME...   12345", name clipped to what fits.
            let x = fb.put_u32(panel_x, y, rank as u32 + 1, dim) + 1;
            let score_w = digits(entry.score);
            let name_w = panel_w.saturating_sub(x - panel_x + score_w + 1) as usize;
            let name: String = entry.name.chars().take(name_w.min(10)).collect();
            let after_name = fb.put_str(x, y, &name, value);
            fb.put_u32(after_name + 1, y, entry.score, value);
            y = y.saturating_add(1);
        }
    }

    /// Next-piece preview in spawn orientation; returns the row below it.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind) -> u16 {
        let shape = shape_of(kind);
        let top = shape.cells().map(|(_, dy)| dy).min().unwrap_or(0);
        let style = CellStyle::new(crate::core::color_of(kind).into(), SCREEN_BG).bold();

        let mut rows = 0;
        for (dx, dy) in shape.cells() {
            let row = (dy - top) as u16;
            rows = rows.max(row + 1);
            fb.fill_rect(
                x + dx as u16 * self.cell_w,
                y + row * self.cell_h,
                self.cell_w,
                self.cell_h,
                '█',
                style,
            );
        }
        y.saturating_add(rows * self.cell_h)
    }
}

fn on_board(x: i8, y: i8) -> bool {
    (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y)
}

fn digits(n: u32) -> u16 {
    n.checked_ilog10().map_or(1, |d| d as u16 + 1)
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// Centered lines of text over the middle of the well
fn draw_overlay(fb: &mut FrameBuffer, frame: Frame, lines: &[&str]) {
    let style = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
    let mid_y = frame.y.saturating_add(frame.h / 2);
    let first_y = mid_y.saturating_sub(lines.len() as u16 / 2);

    for (i, text) in lines.iter().enumerate() {
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        fb.put_str(x, first_y + i as u16, text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits() {
        assert_eq!(digits(0), 1);
        assert_eq!(digits(9), 1);
        assert_eq!(digits(10), 2);
        assert_eq!(digits(12345), 5);
        assert_eq!(digits(u32::MAX), 10);
    }

    #[test]
    fn test_on_board() {
        assert!(on_board(0, 0));
        assert!(on_board(9, 19));
        assert!(!on_board(-1, 0));
        assert!(!on_board(0, -1));
        assert!(!on_board(10, 5));
    }
}
