use std::num::NonZeroU8;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::board::{Board, MAX_VALUE};
use crate::rules::value_fits;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SolveError {
    #[error("Sudoku is not solvable")]
    NotSolvable,

    #[error("Sudoku has multiple valid solutions")]
    Ambiguous,
}

/// Fills all empty fields of `board` in place with a valid solution, picking between
/// solutions at random. Returns `false` and leaves `board` unchanged if the values
/// already on the board admit no valid completion.
///
/// The candidate order is shuffled at every field, so repeated calls on an empty board
/// produce varied solved boards instead of one canonical grid.
pub fn fill(board: &mut Board, rng: &mut impl Rng) -> bool {
    let Some((row, col)) = board.first_empty_field_index() else {
        // No empty fields left. The board is fully filled.
        return true;
    };
    let mut candidates: [u8; MAX_VALUE as usize] = [1, 2, 3, 4, 5, 6, 7, 8, 9];
    candidates.shuffle(rng);
    for candidate in candidates {
        let value = NonZeroU8::new(candidate).unwrap();
        if value_fits(board, row, col, value) {
            board.field_mut(row, col).set(Some(value));
            if fill(board, rng) {
                return true;
            }
            // This candidate led to a dead end. Undo it before trying the next one.
            board.field_mut(row, col).set(None);
        }
    }
    false
}

/// Generates a random fully solved board.
pub fn generate_solved(rng: &mut impl Rng) -> Board {
    let mut board = Board::new_empty();
    let filled = fill(&mut board, rng);
    assert!(filled, "an empty board always has a valid completion");
    board
}

/// Counts the solutions of `board`, up to `limit`.
///
/// The board is taken by value, the caller's board is never mutated. A return value
/// equal to `limit` means "at least `limit` solutions", not an exact count; the search
/// is abandoned as soon as the count reaches `limit`. Callers that only need to
/// distinguish unsolvable / unique / ambiguous should pass `limit = 2`.
pub fn count_solutions(board: Board, limit: usize) -> usize {
    assert!(limit >= 1, "limit must be at least 1");
    let mut board = board;
    let mut count = 0;
    count_completions(&mut board, limit, &mut count, &mut None);
    count
}

/// Solves `board` and returns the solved board.
/// Fails if the board is not solvable or if it has more than one solution.
pub fn solve(board: Board) -> Result<Board, SolveError> {
    let mut board = board;
    let mut count = 0;
    let mut first_solution = None;
    count_completions(&mut board, 2, &mut count, &mut first_solution);
    match first_solution {
        None => Err(SolveError::NotSolvable),
        Some(solution) if count == 1 => Ok(solution),
        Some(_) => Err(SolveError::Ambiguous),
    }
}

// Invariant:
//  - When `count_completions` returns, `board` is unchanged. Any value placed during
//    the search has been retracted, even when the search is abandoned early because
//    `count` reached `limit`.
fn count_completions(
    board: &mut Board,
    limit: usize,
    count: &mut usize,
    first_solution: &mut Option<Board>,
) {
    let Some((row, col)) = board.first_empty_field_index() else {
        // No empty fields left. We found a solution.
        if first_solution.is_none() {
            *first_solution = Some(*board);
        }
        *count += 1;
        return;
    };
    for candidate in 1..=MAX_VALUE {
        let value = NonZeroU8::new(candidate).unwrap();
        if value_fits(board, row, col, value) {
            board.field_mut(row, col).set(Some(value));
            count_completions(board, limit, count, first_solution);
            board.field_mut(row, col).set(None);
            if *count >= limit {
                return;
            }
        }
    }
}
