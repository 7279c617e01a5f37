//! Placement module - moving and rotating the active piece against a board
//!
//! All functions are pure: they take the current piece by reference and
//! return a new piece on success, leaving the input untouched on rejection.

use crate::board::Board;
use crate::pieces::{shape_and_color_of, spawn_position};
use crate::shape::Shape;
use crate::types::{Color, PieceKind, Position};

/// Offsets tried, in order, when a rotation does not fit in place.
pub const WALL_KICKS: [(i8, i8); 5] = [(-1, 0), (1, 0), (0, -1), (-2, 0), (2, 0)];

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub position: Position,
    pub color: Color,
}

impl ActivePiece {
    /// Create a piece of `kind` at its canonical spawn position
    pub fn spawn(kind: PieceKind) -> Self {
        let (shape, color) = shape_and_color_of(kind);
        Self {
            kind,
            shape,
            position: spawn_position(kind),
            color,
        }
    }

    /// Same piece anchored elsewhere
    pub fn at(self, position: Position) -> Self {
        Self { position, ..self }
    }

    /// Absolute grid coordinates of the occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(dx, dy)| {
                (
                    self.position.x.saturating_add(dx),
                    self.position.y.saturating_add(dy),
                )
            })
    }

    /// Check if the piece fits on `board` where it is
    pub fn fits(&self, board: &Board) -> bool {
        board.is_valid(&self.shape, self.position)
    }
}

/// Move `piece` by (dx, dy) if the target position is valid
///
/// A delta that takes the anchor outside the `i8` range is rejected.
pub fn translate(board: &Board, piece: &ActivePiece, dx: i8, dy: i8) -> Option<ActivePiece> {
    piece
        .position
        .offset(dx, dy)
        .filter(|&target| board.is_valid(&piece.shape, target))
        .map(|target| piece.at(target))
}

/// Rotate `piece` 90° clockwise, trying [`WALL_KICKS`] when it does not fit
///
/// The O piece is rotation-invariant and is returned unchanged.
pub fn rotate(board: &Board, piece: &ActivePiece) -> Option<ActivePiece> {
    if piece.kind == PieceKind::O {
        return Some(*piece);
    }

    let rotated = piece.shape.rotate_cw();

    std::iter::once((0, 0))
        .chain(WALL_KICKS)
        .filter_map(|(dx, dy)| piece.position.offset(dx, dy))
        .find(|&pos| board.is_valid(&rotated, pos))
        .map(|position| ActivePiece {
            shape: rotated,
            position,
            ..*piece
        })
}

/// Drop `piece` straight down until it rests
///
/// Returns the resting piece and the number of rows travelled.
pub fn drop_to_floor(board: &Board, piece: &ActivePiece) -> (ActivePiece, u32) {
    let mut current = *piece;
    let mut dropped = 0u32;
    while let Some(next) = translate(board, &current, 0, 1) {
        current = next;
        dropped += 1;
    }
    (current, dropped)
}

/// Where `piece` would come to rest if hard-dropped now
pub fn ghost_position(board: &Board, piece: &ActivePiece) -> Position {
    drop_to_floor(board, piece).0.position
}
