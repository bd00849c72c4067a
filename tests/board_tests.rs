//! Board tests

use tui_blockfall::core::Board;
use tui_blockfall::types::{PieceKind, DEFAULT_COLS, DEFAULT_ROWS};

fn fill_row(board: &mut Board, y: i32) {
    for x in 0..board.width() as i32 {
        board.set_cell(x, y, PieceKind::T.color());
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new(DEFAULT_COLS, DEFAULT_ROWS);
    assert_eq!(board.width(), 10);
    assert_eq!(board.height(), 20);

    for y in 0..20 {
        for x in 0..10 {
            assert_eq!(board.get(x, y), Some(None), "cell ({}, {}) should be empty", x, y);
        }
    }
    assert_eq!(board.occupied_count(), 0);
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new(10, 20);

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(10, 0), None);
    assert_eq!(board.get(0, 20), None);
    assert!(!board.is_occupied(-1, 5));
}

#[test]
fn test_set_cell_stores_color() {
    let mut board = Board::new(10, 20);
    board.set_cell(5, 10, PieceKind::Z.color());

    assert_eq!(board.get(5, 10), Some(Some(PieceKind::Z.color())));
    assert!(board.is_occupied(5, 10));
    assert_eq!(board.occupied_count(), 1);
}

#[test]
fn test_row_full_detection() {
    let mut board = Board::new(10, 20);
    assert!(!board.is_row_full(19));

    for x in 0..9 {
        board.set_cell(x, 19, PieceKind::I.color());
    }
    assert!(!board.is_row_full(19));

    board.set_cell(9, 19, PieceKind::I.color());
    assert!(board.is_row_full(19));

    // Out of range rows are never full.
    assert!(!board.is_row_full(20));
}

#[test]
fn test_remove_bottom_row_shifts_everything_down() {
    let mut board = Board::new(10, 20);
    fill_row(&mut board, 19);
    board.set_cell(3, 18, PieceKind::J.color());
    board.set_cell(7, 0, PieceKind::L.color());

    board.remove_row(19);

    assert!(!board.is_row_full(19));
    assert!(board.is_occupied(3, 19));
    assert!(board.is_occupied(7, 1));
    assert!(board.row(0).iter().all(|c| c.is_none()));
    assert_eq!(board.occupied_count(), 2);
}

#[test]
fn test_remove_top_row_only_empties_it() {
    let mut board = Board::new(4, 4);
    fill_row(&mut board, 0);
    board.set_cell(1, 3, PieceKind::S.color());

    board.remove_row(0);

    assert!(board.row(0).iter().all(|c| c.is_none()));
    assert!(board.is_occupied(1, 3));
    assert_eq!(board.occupied_count(), 1);
}

#[test]
fn test_clear_empties_board() {
    let mut board = Board::new(10, 20);
    fill_row(&mut board, 19);
    fill_row(&mut board, 5);

    board.clear();

    assert_eq!(board.occupied_count(), 0);
    assert_eq!(board.rows().count(), 20);
}
