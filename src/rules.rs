use std::num::NonZeroU8;

use crate::board::{Board, SIZE};

/// Coordinates of the top left field of the 3x3 box containing `(row, col)`.
pub fn box_origin(row: usize, col: usize) -> (usize, usize) {
    (row - row % 3, col - col % 3)
}

/// Returns whether placing `value` at `(row, col)` would conflict with another field
/// in the same row, column or 3x3 box.
/// The current content of `(row, col)` itself is ignored, the field is treated as
/// about to be overwritten.
/// This is the single source of truth for placement legality. All search code has to
/// go through it so there is only one encoding of the sudoku rules to get right.
pub fn value_fits(board: &Board, row: usize, col: usize, value: NonZeroU8) -> bool {
    for other_col in 0..SIZE {
        if other_col != col && board.field(row, other_col).get() == Some(value) {
            return false;
        }
    }
    for other_row in 0..SIZE {
        if other_row != row && board.field(other_row, col).get() == Some(value) {
            return false;
        }
    }
    let (box_row, box_col) = box_origin(row, col);
    for other_row in box_row..box_row + 3 {
        for other_col in box_col..box_col + 3 {
            if (other_row, other_col) != (row, col)
                && board.field(other_row, other_col).get() == Some(value)
            {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::MAX_VALUE;

    fn value(value: u8) -> NonZeroU8 {
        NonZeroU8::new(value).unwrap()
    }

    #[test]
    fn box_origins() {
        assert_eq!((0, 0), box_origin(0, 0));
        assert_eq!((0, 0), box_origin(2, 2));
        assert_eq!((0, 3), box_origin(1, 5));
        assert_eq!((3, 6), box_origin(5, 8));
        assert_eq!((6, 6), box_origin(8, 8));
    }

    #[test]
    fn everything_fits_on_an_empty_board() {
        let board = Board::new_empty();
        for candidate in 1..=MAX_VALUE {
            assert!(value_fits(&board, 0, 0, value(candidate)));
            assert!(value_fits(&board, 4, 7, value(candidate)));
            assert!(value_fits(&board, 8, 8, value(candidate)));
        }
    }

    #[test]
    fn detects_row_conflict() {
        let mut board = Board::new_empty();
        board.field_mut(3, 7).set(Some(value(5)));

        assert!(!value_fits(&board, 3, 0, value(5)));
        assert!(value_fits(&board, 3, 0, value(6)));
        // Other rows are unaffected
        assert!(value_fits(&board, 2, 0, value(5)));
    }

    #[test]
    fn detects_col_conflict() {
        let mut board = Board::new_empty();
        board.field_mut(7, 2).set(Some(value(9)));

        assert!(!value_fits(&board, 0, 2, value(9)));
        assert!(value_fits(&board, 0, 2, value(8)));
        // Other columns are unaffected
        assert!(value_fits(&board, 0, 3, value(9)));
    }

    #[test]
    fn detects_box_conflict() {
        let mut board = Board::new_empty();
        board.field_mut(4, 4).set(Some(value(2)));

        // (3, 5) shares neither row nor column with (4, 4), only the box
        assert!(!value_fits(&board, 3, 5, value(2)));
        assert!(value_fits(&board, 3, 5, value(3)));
        // (3, 6) is in the neighboring box
        assert!(value_fits(&board, 3, 6, value(2)));
    }

    #[test]
    fn ignores_own_field_content() {
        let mut board = Board::new_empty();
        board.field_mut(0, 0).set(Some(value(5)));

        // Re-placing the same value on its own field is not a conflict
        assert!(value_fits(&board, 0, 0, value(5)));
        assert!(value_fits(&board, 0, 0, value(1)));
    }
}
