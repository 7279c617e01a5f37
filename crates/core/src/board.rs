//! Board module - the fixed 10x20 grid
//!
//! The board is a flat array of cells in row-major order. It is `Copy`, and
//! every operation that changes cells returns a new board, so a board handed
//! out in one snapshot can never be altered through another.
//!
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19
//! (top to bottom).

use arrayvec::ArrayVec;

use crate::shape::Shape;
use crate::types::{Cell, Color, Position, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices of completed rows, bottom to top
pub type CompletedRows = ArrayVec<u8, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Check if position is within bounds and filled
    pub fn is_filled(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// A copy of this board with one cell replaced.
    /// Out-of-bounds coordinates leave the board unchanged.
    pub fn with_cell(mut self, x: i8, y: i8, cell: Cell) -> Self {
        if let Some(idx) = Self::index(x, y) {
            self.cells[idx] = cell;
        }
        self
    }

    /// A copy of this board with row `y` entirely filled with `color`.
    pub fn with_row_filled(mut self, y: u8, color: Color) -> Self {
        if y < BOARD_HEIGHT {
            let start = y as usize * BOARD_WIDTH as usize;
            self.cells[start..start + BOARD_WIDTH as usize].fill(Some(color));
        }
        self
    }

    /// Cells of row `y`, left to right
    ///
    /// # Panics
    ///
    /// Panics if `y` is not a board row.
    pub fn row(&self, y: u8) -> &[Cell] {
        assert!(y < BOARD_HEIGHT, "row {y} out of range");
        let start = y as usize * BOARD_WIDTH as usize;
        &self.cells[start..start + BOARD_WIDTH as usize]
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Check whether `shape` anchored at `pos` fits.
    ///
    /// Every occupied cell must satisfy `0 <= x < W` and `y < H`. Cells above
    /// the grid (`y < 0`) are allowed and never collide; cells inside the grid
    /// must be empty.
    pub fn is_valid(&self, shape: &Shape, pos: Position) -> bool {
        // Saturation only happens far outside the grid, where the
        // comparisons below give the same answer as exact arithmetic.
        shape.cells().all(|(dx, dy)| {
            let x = pos.x.saturating_add(dx);
            let y = pos.y.saturating_add(dy);
            if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
                return false;
            }
            y < 0 || !self.is_filled(x, y)
        })
    }

    /// A copy of this board with `shape` at `pos` written in `color`.
    ///
    /// Cells outside the grid (including those above row 0) are skipped.
    pub fn stamp(&self, shape: &Shape, pos: Position, color: Color) -> Board {
        let mut next = *self;
        for (dx, dy) in shape.cells() {
            let (x, y) = (pos.x.saturating_add(dx), pos.y.saturating_add(dy));
            if let Some(idx) = Self::index(x, y) {
                next.cells[idx] = Some(color);
            }
        }
        next
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: u8) -> bool {
        if y >= BOARD_HEIGHT {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Indices of all full rows, bottom to top
    pub fn completed_rows(&self) -> CompletedRows {
        (0..BOARD_HEIGHT)
            .rev()
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Remove every full row and compact the rest toward the bottom.
    ///
    /// Surviving rows keep their relative order; the vacated top rows are
    /// empty. Returns the new board and the number of rows removed.
    pub fn sweep_completed_rows(&self) -> (Board, usize) {
        let width = BOARD_WIDTH as usize;
        let mut next = *self;
        let mut write_y = BOARD_HEIGHT as usize;
        let mut cleared = 0usize;

        // Two-pointer scan from the bottom: copy each surviving row down to
        // the write cursor.
        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y as u8) {
                cleared += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * width;
                next.cells
                    .copy_within(src..src + width, write_y * width);
            }
        }

        next.cells[..write_y * width].fill(None);

        (next, cleared)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
