//! Pieces module - the fixed catalog of piece shapes and colors
//!
//! Shapes are stored in their spawn orientation. Rotation is derived from the
//! matrix itself (see [`crate::shape`]), so no per-rotation tables exist.

use crate::shape::Shape;
use crate::types::{Color, PieceKind, Position, BOARD_WIDTH};

const I_SHAPE: Shape = Shape::from_matrix([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]);
const O_SHAPE: Shape = Shape::from_matrix([[1, 1], [1, 1]]);
const T_SHAPE: Shape = Shape::from_matrix([[0, 1, 0], [1, 1, 1], [0, 0, 0]]);
const S_SHAPE: Shape = Shape::from_matrix([[0, 1, 1], [1, 1, 0], [0, 0, 0]]);
const Z_SHAPE: Shape = Shape::from_matrix([[1, 1, 0], [0, 1, 1], [0, 0, 0]]);
const J_SHAPE: Shape = Shape::from_matrix([[1, 0, 0], [1, 1, 1], [0, 0, 0]]);
const L_SHAPE: Shape = Shape::from_matrix([[0, 0, 1], [1, 1, 1], [0, 0, 0]]);

/// Spawn-orientation shape for a piece kind
pub fn shape_of(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
    }
}

/// Fixed color for a piece kind
pub fn color_of(kind: PieceKind) -> Color {
    match kind {
        PieceKind::I => Color::rgb(0x00, 0xf0, 0xf0), // cyan
        PieceKind::O => Color::rgb(0xf0, 0xf0, 0x00), // yellow
        PieceKind::T => Color::rgb(0xa0, 0x00, 0xf0), // purple
        PieceKind::S => Color::rgb(0x00, 0xf0, 0x00), // green
        PieceKind::Z => Color::rgb(0xf0, 0x00, 0x00), // red
        PieceKind::J => Color::rgb(0x00, 0x00, 0xf0), // blue
        PieceKind::L => Color::rgb(0xf0, 0xa0, 0x00), // orange
    }
}

pub fn shape_and_color_of(kind: PieceKind) -> (Shape, Color) {
    (shape_of(kind), color_of(kind))
}

/// Canonical spawn anchor: horizontally centered, top row.
pub fn spawn_position(kind: PieceKind) -> Position {
    let cols = shape_of(kind).cols();
    Position::new(((BOARD_WIDTH - cols) / 2) as i8, 0)
}
