use rand::Rng;
use thiserror::Error;

use crate::board::{Board, FixedMask, NUM_FIELDS, SIZE};
use crate::solver::{count_solutions, generate_solved};

/// The smallest number of clues a 9x9 sudoku can have and still be uniquely solvable.
/// Requesting fewer clues could never succeed, so it is rejected up front.
pub const MIN_CLUES: usize = 17;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GenerateError {
    #[error("clue count must be in 17..=81, got {0}")]
    ClueCountOutOfRange(usize),

    #[error("removal attempt budget must be at least 1")]
    NoRemovalAttempts,
}

/// A generated puzzle: the board with its clues, paired with the mask of clue positions.
/// The mask is snapshotted right after digging finishes, before anything else can
/// mutate the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Puzzle {
    board: Board,
    fixed: FixedMask,
}

impl Puzzle {
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn fixed(&self) -> &FixedMask {
        &self.fixed
    }

    pub fn num_clues(&self) -> usize {
        self.board.num_filled()
    }
}

/// Generates a puzzle with a unique solution, aiming for `clue_count` clues.
///
/// Digging stops after `max_removal_attempts` loop iterations even if the target clue
/// count was not reached yet, so the returned puzzle can have more than `clue_count`
/// clues. That is a degraded-but-valid result, not an error; callers that need the
/// exact clue count can retry with a larger budget.
pub fn generate(clue_count: usize, max_removal_attempts: usize) -> Result<Puzzle, GenerateError> {
    generate_with_rng(clue_count, max_removal_attempts, &mut rand::thread_rng())
}

/// Same as [generate] but with an injected random number generator, for reproducible
/// puzzles and tests.
pub fn generate_with_rng(
    clue_count: usize,
    max_removal_attempts: usize,
    rng: &mut impl Rng,
) -> Result<Puzzle, GenerateError> {
    if !(MIN_CLUES..=NUM_FIELDS).contains(&clue_count) {
        return Err(GenerateError::ClueCountOutOfRange(clue_count));
    }
    if max_removal_attempts == 0 {
        return Err(GenerateError::NoRemovalAttempts);
    }

    let mut board = generate_solved(rng);
    let mut fields_to_clear = NUM_FIELDS - clue_count;
    let mut attempts = 0;
    while fields_to_clear > 0 && attempts < max_removal_attempts {
        // Every iteration consumes an attempt, including picks of already empty fields.
        // This keeps the loop bounded by the budget no matter what the dice do.
        attempts += 1;
        let row = rng.gen_range(0..SIZE);
        let col = rng.gen_range(0..SIZE);
        let mut field = board.field_mut(row, col);
        let Some(value) = field.get() else {
            continue;
        };
        field.set(None);
        if count_solutions(board, 2) == 1 {
            fields_to_clear -= 1;
            log::debug!("cleared field ({row}, {col}), {fields_to_clear} more to clear");
        } else {
            // Clearing this field would make the solution ambiguous. Put the value back.
            board.field_mut(row, col).set(Some(value));
            log::debug!("keeping field ({row}, {col})");
        }
    }
    if fields_to_clear > 0 {
        log::debug!(
            "attempt budget exhausted, returning a puzzle with {} clues instead of {clue_count}",
            board.num_filled()
        );
    }
    debug_assert_eq!(1, count_solutions(board, 2));

    Ok(Puzzle {
        fixed: FixedMask::from_board(&board),
        board,
    })
}
