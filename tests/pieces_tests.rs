//! Pieces module tests - catalog, rotation and wall kicks

use blockfall::core::placement::{rotate, translate};
use blockfall::core::{color_of, shape_of, spawn_position, ActivePiece, Board, Shape};
use blockfall::types::{Color, PieceKind, Position};

fn filled(shape: &Shape) -> Vec<(i8, i8)> {
    shape.cells().collect()
}

// ============== Catalog Tests ==============

#[test]
fn test_canonical_shapes() {
    assert_eq!(filled(&shape_of(PieceKind::I)), [(0, 1), (1, 1), (2, 1), (3, 1)]);
    assert_eq!(filled(&shape_of(PieceKind::O)), [(0, 0), (1, 0), (0, 1), (1, 1)]);
    assert_eq!(filled(&shape_of(PieceKind::T)), [(1, 0), (0, 1), (1, 1), (2, 1)]);
    assert_eq!(filled(&shape_of(PieceKind::S)), [(1, 0), (2, 0), (0, 1), (1, 1)]);
    assert_eq!(filled(&shape_of(PieceKind::Z)), [(0, 0), (1, 0), (1, 1), (2, 1)]);
    assert_eq!(filled(&shape_of(PieceKind::J)), [(0, 0), (0, 1), (1, 1), (2, 1)]);
    assert_eq!(filled(&shape_of(PieceKind::L)), [(2, 0), (0, 1), (1, 1), (2, 1)]);
}

#[test]
fn test_matrix_sizes() {
    let dims = |k| {
        let s = shape_of(k);
        (s.rows(), s.cols())
    };
    assert_eq!(dims(PieceKind::I), (4, 4));
    assert_eq!(dims(PieceKind::O), (2, 2));
    for k in [PieceKind::T, PieceKind::S, PieceKind::Z, PieceKind::J, PieceKind::L] {
        assert_eq!(dims(k), (3, 3));
    }
}

#[test]
fn test_canonical_colors() {
    assert_eq!(color_of(PieceKind::I).to_hex(), "#00f0f0");
    assert_eq!(color_of(PieceKind::O).to_hex(), "#f0f000");
    assert_eq!(color_of(PieceKind::T).to_hex(), "#a000f0");
    assert_eq!(color_of(PieceKind::S).to_hex(), "#00f000");
    assert_eq!(color_of(PieceKind::Z).to_hex(), "#f00000");
    assert_eq!(color_of(PieceKind::J).to_hex(), "#0000f0");
    assert_eq!(color_of(PieceKind::L).to_hex(), "#f0a000");
}

#[test]
fn test_spawn_positions() {
    assert_eq!(spawn_position(PieceKind::I), Position::new(3, 0));
    assert_eq!(spawn_position(PieceKind::O), Position::new(4, 0));
    for k in [PieceKind::T, PieceKind::S, PieceKind::Z, PieceKind::J, PieceKind::L] {
        assert_eq!(spawn_position(k), Position::new(3, 0));
    }
}

// ============== Rotation Tests ==============

#[test]
fn test_four_rotations_are_identity() {
    for kind in PieceKind::ALL {
        let shape = shape_of(kind);
        let back = shape.rotate_cw().rotate_cw().rotate_cw().rotate_cw();
        assert_eq!(back, shape, "{:?}", kind);
    }
}

#[test]
fn test_rotation_keeps_four_cells() {
    for kind in PieceKind::ALL {
        let mut shape = shape_of(kind);
        for _ in 0..4 {
            shape = shape.rotate_cw();
            assert_eq!(shape.cell_count(), 4, "{:?}", kind);
        }
    }
}

#[test]
fn test_rotation_transposes_dimensions() {
    let wide = Shape::from_matrix([[1, 1, 1], [0, 1, 0]]);
    let tall = wide.rotate_cw();
    assert_eq!((tall.rows(), tall.cols()), (3, 2));
    // 111/010 -> 01/11/01
    assert_eq!(filled(&tall), [(1, 0), (0, 1), (1, 1), (1, 2)]);
}

#[test]
fn test_t_rotates_clockwise() {
    // 010/111/000 -> 010/011/010
    let rotated = shape_of(PieceKind::T).rotate_cw();
    assert_eq!(filled(&rotated), [(1, 0), (1, 1), (2, 1), (1, 2)]);
}

// ============== Wall Kick Tests ==============

#[test]
fn test_t_against_left_wall_kicks_right() {
    let board = Board::new();
    let t = ActivePiece::spawn(PieceKind::T);

    // Upright T: 010/011/010. Its left column is empty, so it can hang one
    // cell past the left wall.
    let upright = rotate(&board, &t).unwrap();
    let mut hugging = upright;
    while let Some(moved) = translate(&board, &hugging, -1, 0) {
        hugging = moved;
    }
    assert_eq!(hugging.position.x, -1);

    // Rotating again needs column -1: the (+1, 0) kick applies.
    let kicked = rotate(&board, &hugging).expect("kick should succeed");
    assert_eq!(kicked.position, Position::new(0, hugging.position.y));
    assert_eq!(kicked.shape, upright.shape.rotate_cw());
}

#[test]
fn test_t_on_full_floor_kicks_up() {
    // Flat T resting on a full bottom row. Upright, it needs row 19 in place
    // and after the side kicks, so only the (0, -1) kick fits.
    let gray = Color::rgb(0x80, 0x80, 0x80);
    let board = Board::new().with_row_filled(19, gray);
    let t = ActivePiece::spawn(PieceKind::T).at(Position::new(3, 17));
    assert!(t.fits(&board));
    assert!(translate(&board, &t, 0, 1).is_none());

    let kicked = rotate(&board, &t).expect("kick should succeed");
    assert_eq!(kicked.position, Position::new(3, 16));
    assert_eq!(kicked.shape, t.shape.rotate_cw());
}

#[test]
fn test_t_between_pegs_kicks_two_left() {
    // Flat T at (4, 10). Pegs block the in-place, (-1, 0), (+1, 0) and
    // (0, -1) footprints of the upright T; (-2, 0) is the first that fits.
    let gray = Color::rgb(0x80, 0x80, 0x80);
    let board = Board::new()
        .with_cell(5, 12, Some(gray))
        .with_cell(4, 12, Some(gray))
        .with_cell(6, 12, Some(gray))
        .with_cell(5, 9, Some(gray));
    let t = ActivePiece::spawn(PieceKind::T).at(Position::new(4, 10));
    assert!(t.fits(&board));

    let kicked = rotate(&board, &t).expect("kick should succeed");
    assert_eq!(kicked.position, Position::new(2, 10));
    assert!(kicked.fits(&board));
}

#[test]
fn test_rotation_rejected_leaves_piece_unchanged() {
    // Vertical I in a one-column shaft: no kick can lay it flat.
    let gray = Color::rgb(0x80, 0x80, 0x80);
    let mut board = Board::new();
    for y in 0..20 {
        for x in 0..10 {
            if x != 5 {
                board = board.with_cell(x, y, Some(gray));
            }
        }
    }
    let i = ActivePiece::spawn(PieceKind::I);
    let vertical = ActivePiece {
        shape: i.shape.rotate_cw(),
        ..i
    }
    .at(Position::new(3, 10));
    assert!(vertical.fits(&board));
    assert_eq!(rotate(&board, &vertical), None);
}

#[test]
fn test_o_rotation_never_moves() {
    let board = Board::new();
    let o = ActivePiece::spawn(PieceKind::O).at(Position::new(8, 18));
    assert_eq!(rotate(&board, &o), Some(o));
}
