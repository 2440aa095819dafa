use std::num::NonZeroU8;

use itertools::Itertools;

use crate::board::{Board, SIZE};

/// Returns whether `board` is a fully and correctly solved sudoku: every row, every
/// column and every 3x3 box holds nine pairwise distinct values.
/// A board with any empty field is not valid under this check; it is the win condition
/// for a finished game, not a consistency check for a game in progress. For the latter,
/// see [has_conflicts].
pub fn is_valid_complete(board: &Board) -> bool {
    check_units(board, |values| {
        let values: Vec<Option<NonZeroU8>> = values.collect();
        values.iter().all(|value| value.is_some()) && values.iter().all_unique()
    })
}

/// Returns whether any filled field of `board` conflicts with another filled field in
/// the same row, column or 3x3 box. Empty fields are skipped, so this can be used on a
/// board that is still being played.
pub fn has_conflicts(board: &Board) -> bool {
    !check_units(board, |values| values.flatten().all_unique())
}

// Runs `check` against the values of each of the 27 units (9 rows, 9 columns, 9 boxes)
// and returns whether all of them passed.
fn check_units<F>(board: &Board, check: F) -> bool
where
    F: Fn(&mut dyn Iterator<Item = Option<NonZeroU8>>) -> bool,
{
    for row in 0..SIZE {
        let mut values = (0..SIZE).map(|col| board.field(row, col).get());
        if !check(&mut values) {
            return false;
        }
    }
    for col in 0..SIZE {
        let mut values = (0..SIZE).map(|row| board.field(row, col).get());
        if !check(&mut values) {
            return false;
        }
    }
    for box_row in [0, 3, 6] {
        for box_col in [0, 3, 6] {
            let mut values = (0..3)
                .flat_map(|row| (0..3).map(move |col| (box_row + row, box_col + col)))
                .map(|(row, col)| board.field(row, col).get());
            if !check(&mut values) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::value_fits;

    const SOLVED: &str = "
        534 678 912
        672 195 348
        198 342 567

        859 761 423
        426 853 791
        713 924 856

        961 537 284
        287 419 635
        345 286 179
    ";

    const PUZZLE: &str = "
        53_ _7_ ___
        6__ 195 ___
        _98 ___ _6_

        8__ _6_ __3
        4__ 8_3 __1
        7__ _2_ __6

        _6_ ___ 28_
        ___ 419 __5
        ___ _8_ _79
    ";

    #[test]
    fn solved_board_is_valid() {
        let board = Board::from_str(SOLVED);
        assert!(is_valid_complete(&board));
        // Validation has no side effects, asking again gives the same answer
        assert!(is_valid_complete(&board));
    }

    #[test]
    fn empty_board_is_not_valid() {
        assert!(!is_valid_complete(&Board::new_empty()));
    }

    #[test]
    fn partially_filled_board_is_not_valid() {
        assert!(!is_valid_complete(&Board::from_str(PUZZLE)));
    }

    #[test]
    fn row_duplicate_is_detected() {
        let mut board = Board::from_str(SOLVED);
        // Copy the value of (0, 1) into (0, 0), creating a duplicate in row 0
        let duplicate = board.field(0, 1).get();
        board.field_mut(0, 0).set(duplicate);

        assert!(!is_valid_complete(&board));
        assert!(has_conflicts(&board));
        assert!(!value_fits(&board, 0, 0, duplicate.unwrap()));
    }

    #[test]
    fn col_duplicate_is_detected() {
        let mut board = Board::from_str(SOLVED);
        let duplicate = board.field(1, 0).get();
        board.field_mut(0, 0).set(duplicate);

        assert!(!is_valid_complete(&board));
        assert!(has_conflicts(&board));
    }

    #[test]
    fn box_duplicate_is_detected() {
        let mut board = Board::from_str(SOLVED);
        let duplicate = board.field(1, 1).get();
        board.field_mut(0, 0).set(duplicate);

        assert!(!is_valid_complete(&board));
        assert!(has_conflicts(&board));
    }

    #[test]
    fn boards_without_duplicates_have_no_conflicts() {
        assert!(!has_conflicts(&Board::new_empty()));
        assert!(!has_conflicts(&Board::from_str(PUZZLE)));
        assert!(!has_conflicts(&Board::from_str(SOLVED)));
    }

    #[test]
    fn conflict_between_filled_fields_only() {
        let mut board = Board::new_empty();
        board.field_mut(0, 0).set(std::num::NonZeroU8::new(5));
        // A single filled field never conflicts, no matter how many empties surround it
        assert!(!has_conflicts(&board));

        board.field_mut(0, 8).set(std::num::NonZeroU8::new(5));
        assert!(has_conflicts(&board));
    }
}
