//! Shape module - piece footprints and 90° rotation
//!
//! A shape is a small rectangular matrix of occupied/empty flags in the
//! piece's local frame. Storage is a fixed 4x4 array so shapes are `Copy`
//! and never allocate; flags outside `rows x cols` are always clear.

/// Largest supported matrix side.
pub const MAX_SHAPE_DIM: usize = 4;

/// Rectangular occupancy matrix (at most 4x4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    bits: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Build a shape from a matrix of 0/1 flags.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is empty or larger than 4x4.
    pub const fn from_matrix<const R: usize, const C: usize>(matrix: [[u8; C]; R]) -> Self {
        assert!(R > 0 && C > 0, "shape must not be empty");
        assert!(
            R <= MAX_SHAPE_DIM && C <= MAX_SHAPE_DIM,
            "shape larger than 4x4"
        );

        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let mut r = 0;
        while r < R {
            let mut c = 0;
            while c < C {
                bits[r][c] = matrix[r][c] != 0;
                c += 1;
            }
            r += 1;
        }

        Self {
            rows: R as u8,
            cols: C as u8,
            bits,
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether local cell (row, col) is occupied. Out of range reads as empty.
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows as usize && col < self.cols as usize && self.bits[row][col]
    }

    /// Occupied cells as `(dx, dy)` offsets from the anchor, row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.rows as usize).flat_map(move |row| {
            (0..self.cols as usize)
                .filter(move |&col| self.bits[row][col])
                .map(move |col| (col as i8, row as i8))
        })
    }

    /// Number of occupied cells.
    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }

    /// Rotate 90° clockwise.
    ///
    /// The result has `cols x rows` dimensions and
    /// `out(r, c) = in(rows - 1 - c, r)`.
    pub fn rotate_cw(&self) -> Shape {
        let rows = self.rows as usize;
        let cols = self.cols as usize;
        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];

        for (r, out_row) in bits.iter_mut().enumerate().take(cols) {
            for (c, out) in out_row.iter_mut().enumerate().take(rows) {
                *out = self.bits[rows - 1 - c][r];
            }
        }

        Shape {
            rows: self.cols,
            cols: self.rows,
            bits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_rectangle_swaps_dimensions() {
        let bar = Shape::from_matrix([[1, 1, 1]]);
        let rotated = bar.rotate_cw();
        assert_eq!((rotated.rows(), rotated.cols()), (3, 1));
        assert!(rotated.is_filled(0, 0));
        assert!(rotated.is_filled(2, 0));
    }

    #[test]
    fn rotate_moves_corner_clockwise() {
        // Top-left corner ends up top-right.
        let s = Shape::from_matrix([[1, 0], [0, 0], [0, 0]]);
        let r = s.rotate_cw();
        assert_eq!((r.rows(), r.cols()), (2, 3));
        assert!(r.is_filled(0, 2));
        assert_eq!(r.cell_count(), 1);
    }

    #[test]
    fn cells_are_row_major_offsets() {
        let t = Shape::from_matrix([[0, 1, 0], [1, 1, 1], [0, 0, 0]]);
        let cells: Vec<_> = t.cells().collect();
        assert_eq!(cells, vec![(1, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn out_of_range_reads_empty() {
        let o = Shape::from_matrix([[1, 1], [1, 1]]);
        assert!(!o.is_filled(2, 0));
        assert!(!o.is_filled(0, 3));
    }
}
