mod board;
mod generator;
mod rules;
mod solver;
mod validator;

pub use board::{Board, FieldRef, FixedMask, MAX_VALUE, NUM_FIELDS, SIZE};
pub use generator::{generate, generate_with_rng, GenerateError, Puzzle, MIN_CLUES};
pub use rules::{box_origin, value_fits};
pub use solver::{count_solutions, fill, generate_solved, solve, SolveError};
pub use validator::{has_conflicts, is_valid_complete};
