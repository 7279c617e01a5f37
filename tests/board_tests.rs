//! Board tests - grid, collision, stamping and row sweeping

use blockfall::core::{shape_of, Board};
use blockfall::types::{Color, PieceKind, Position, BOARD_HEIGHT, BOARD_WIDTH};

const RED: Color = Color::rgb(0xf0, 0x00, 0x00);
const BLUE: Color = Color::rgb(0x00, 0x00, 0xf0);

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, y), Some(None), "cell ({}, {})", x, y);
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_valid_on_empty_board() {
    let board = Board::new();
    for kind in PieceKind::ALL {
        assert!(board.is_valid(&shape_of(kind), Position::new(3, 0)), "{:?}", kind);
    }
}

#[test]
fn test_valid_rejects_walls_and_floor() {
    let board = Board::new();
    let o = shape_of(PieceKind::O);

    assert!(board.is_valid(&o, Position::new(0, 0)));
    assert!(!board.is_valid(&o, Position::new(-1, 0)));
    assert!(board.is_valid(&o, Position::new(8, 0)));
    assert!(!board.is_valid(&o, Position::new(9, 0)));
    assert!(board.is_valid(&o, Position::new(0, 18)));
    assert!(!board.is_valid(&o, Position::new(0, 19)));
}

#[test]
fn test_valid_allows_cells_above_grid() {
    // Row 0 completely filled: a piece entirely above it still fits.
    let board = Board::new().with_row_filled(0, RED);
    let o = shape_of(PieceKind::O);
    assert!(board.is_valid(&o, Position::new(4, -2)));
    assert!(!board.is_valid(&o, Position::new(4, -1)));
}

#[test]
fn test_valid_rejects_overlap() {
    let board = Board::new().with_cell(5, 10, Some(RED));
    let o = shape_of(PieceKind::O);
    assert!(!board.is_valid(&o, Position::new(4, 9)));
    assert!(board.is_valid(&o, Position::new(6, 9)));
}

#[test]
fn test_stamp_writes_color() {
    let board = Board::new();
    let t = shape_of(PieceKind::T);
    let stamped = board.stamp(&t, Position::new(3, 18), BLUE);

    // T: 010/111
    assert_eq!(stamped.get(4, 18), Some(Some(BLUE)));
    assert_eq!(stamped.get(3, 19), Some(Some(BLUE)));
    assert_eq!(stamped.get(4, 19), Some(Some(BLUE)));
    assert_eq!(stamped.get(5, 19), Some(Some(BLUE)));
    assert_eq!(stamped.get(3, 18), Some(None));
    assert_eq!(stamped.cells().iter().filter(|c| c.is_some()).count(), 4);

    // Original untouched.
    assert_eq!(board, Board::new());
}

#[test]
fn test_stamp_skips_cells_above_grid() {
    let i = shape_of(PieceKind::I);
    // Bar sits in local row 1, so anchoring at y = -1 puts it on row 0.
    let on_top = Board::new().stamp(&i, Position::new(0, -1), RED);
    assert!(!on_top.is_row_full(0));
    assert_eq!(on_top.row(0).iter().filter(|c| c.is_some()).count(), 4);

    // Fully above the grid: nothing written.
    let above = Board::new().stamp(&i, Position::new(0, -2), RED);
    assert_eq!(above, Board::new());
}

#[test]
fn test_sweep_no_full_rows() {
    let board = Board::new().with_cell(0, 19, Some(RED));
    let (swept, count) = board.sweep_completed_rows();
    assert_eq!(count, 0);
    assert_eq!(swept, board);
}

#[test]
fn test_sweep_single_row_shifts_above_down() {
    let h = BOARD_HEIGHT as i8;
    let board = Board::new()
        .with_row_filled(19, RED)
        .with_cell(3, 18, Some(BLUE))
        .with_cell(6, h - 3, Some(RED));

    let (swept, count) = board.sweep_completed_rows();
    assert_eq!(count, 1);
    assert_eq!(swept.get(3, 19), Some(Some(BLUE)));
    // A cell at row H-3 moves to row H-2.
    assert_eq!(swept.get(6, h - 2), Some(Some(RED)));
    assert_eq!(swept.get(6, h - 3), Some(None));
    assert_eq!(swept.get(0, 19), Some(None));
    assert!(swept.row(0).iter().all(|c| c.is_none()));
}

#[test]
fn test_sweep_non_adjacent_rows_preserves_order() {
    // Full rows at 19 and 17; markers at 18 and 16 must keep their order.
    let board = Board::new()
        .with_row_filled(19, RED)
        .with_cell(1, 18, Some(BLUE))
        .with_row_filled(17, RED)
        .with_cell(2, 16, Some(BLUE));

    let (swept, count) = board.sweep_completed_rows();
    assert_eq!(count, 2);
    assert_eq!(swept.get(1, 19), Some(Some(BLUE)));
    assert_eq!(swept.get(2, 18), Some(Some(BLUE)));
    assert_eq!(swept.cells().iter().filter(|c| c.is_some()).count(), 2);
}

#[test]
fn test_sweep_four_rows() {
    let mut board = Board::new();
    for y in 16..20 {
        board = board.with_row_filled(y, RED);
    }
    board = board.with_cell(0, 15, Some(BLUE));

    let (swept, count) = board.sweep_completed_rows();
    assert_eq!(count, 4);
    assert_eq!(swept.get(0, 19), Some(Some(BLUE)));
    for y in 0..19 {
        assert!(!swept.is_row_full(y));
    }
}

#[test]
fn test_sweep_preserves_colors() {
    let board = Board::new()
        .with_row_filled(19, RED)
        .with_cell(7, 18, Some(BLUE))
        .with_cell(8, 18, Some(RED));
    let (swept, _) = board.sweep_completed_rows();
    assert_eq!(swept.get(7, 19), Some(Some(BLUE)));
    assert_eq!(swept.get(8, 19), Some(Some(RED)));
}
