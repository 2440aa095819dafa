use std::fmt;
use std::num::NonZeroU8;

use bitvec::prelude::*;
use itertools::iproduct;

/// Number of rows and number of columns of a board.
pub const SIZE: usize = 9;
/// Largest value a field can hold.
pub const MAX_VALUE: u8 = 9;
pub const NUM_FIELDS: usize = SIZE * SIZE;

const NUM_BYTES: usize = NUM_FIELDS.div_ceil(2);

/// A [Board] is a 9x9 sudoku board.
/// Each field either holds a value in 1..=9 or is empty.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    // Every byte stores two fields. The lower 4 bits the first field, the upper 4 bits the second field.
    // Fields are ordered by rows, first left-to-right, then top-to-bottom. An empty field is stored as 0.
    compressed_board: [u8; NUM_BYTES],
}

#[derive(Clone, Copy)]
enum FieldSubindex {
    LowerHalfByte,
    UpperHalfByte,
}

pub struct FieldRef<T> {
    byte: T,
    subindex: FieldSubindex,
}

impl FieldRef<&u8> {
    #[inline]
    pub fn get(&self) -> Option<NonZeroU8> {
        let value = match self.subindex {
            FieldSubindex::LowerHalfByte => self.byte & 0x0F,
            FieldSubindex::UpperHalfByte => self.byte >> 4,
        };
        assert!(value <= MAX_VALUE);
        NonZeroU8::new(value)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.get().is_none()
    }
}

impl FieldRef<&mut u8> {
    #[inline]
    pub fn get(&self) -> Option<NonZeroU8> {
        FieldRef::<&u8> {
            byte: self.byte,
            subindex: self.subindex,
        }
        .get()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.get().is_none()
    }

    #[inline]
    pub fn set(&mut self, value: Option<NonZeroU8>) {
        let value = value.map_or(0, NonZeroU8::get);
        assert!(value <= MAX_VALUE);
        match self.subindex {
            FieldSubindex::LowerHalfByte => *self.byte = (*self.byte & 0xF0) | value,
            FieldSubindex::UpperHalfByte => *self.byte = (*self.byte & 0x0F) | (value << 4),
        }
    }
}

impl Board {
    #[inline]
    pub fn new_empty() -> Self {
        Board {
            compressed_board: [0; NUM_BYTES],
        }
    }

    fn index(row: usize, col: usize) -> (usize, FieldSubindex) {
        assert!(row < SIZE && col < SIZE);
        let index = row * SIZE + col;
        let subindex = if index % 2 == 0 {
            FieldSubindex::LowerHalfByte
        } else {
            FieldSubindex::UpperHalfByte
        };
        (index / 2, subindex)
    }

    #[inline]
    pub fn field(&self, row: usize, col: usize) -> FieldRef<&'_ u8> {
        let (index, subindex) = Self::index(row, col);
        FieldRef {
            byte: &self.compressed_board[index],
            subindex,
        }
    }

    #[inline]
    pub fn field_mut(&mut self, row: usize, col: usize) -> FieldRef<&'_ mut u8> {
        let (index, subindex) = Self::index(row, col);
        FieldRef {
            byte: &mut self.compressed_board[index],
            subindex,
        }
    }

    /// Returns the coordinates of the first empty field in row-major order,
    /// or [None] if the board is fully filled.
    pub fn first_empty_field_index(&self) -> Option<(usize, usize)> {
        iproduct!(0..SIZE, 0..SIZE).find(|&(row, col)| self.field(row, col).is_empty())
    }

    pub fn num_empty(&self) -> usize {
        iproduct!(0..SIZE, 0..SIZE)
            .filter(|&(row, col)| self.field(row, col).is_empty())
            .count()
    }

    pub fn num_filled(&self) -> usize {
        NUM_FIELDS - self.num_empty()
    }

    pub fn is_filled(&self) -> bool {
        self.first_empty_field_index().is_none()
    }

    /// Parses a board from a string with one character per field, `1`..=`9` for values
    /// and `_` for empty fields. All whitespace is ignored.
    /// Panics on malformed input, this is a helper for tests, benchmarks and examples.
    pub fn from_str(input: &str) -> Board {
        let mut board = Board::new_empty();
        let mut index = 0;
        for character in input.chars() {
            if character.is_whitespace() {
                continue;
            }
            let value = match character {
                '_' => None,
                '1'..='9' => NonZeroU8::new(character as u8 - b'0'),
                _ => panic!("unexpected character {character:?} in board string"),
            };
            assert!(index < NUM_FIELDS, "board string has too many fields");
            board.field_mut(index / SIZE, index % SIZE).set(value);
            index += 1;
        }
        assert_eq!(NUM_FIELDS, index, "board string has too few fields");
        board
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIZE {
            if row != 0 && row % 3 == 0 {
                writeln!(f)?;
            }
            for col in 0..SIZE {
                if col != 0 && col % 3 == 0 {
                    write!(f, " ")?;
                }
                match self.field(row, col).get() {
                    Some(value) => write!(f, "{value}")?,
                    None => write!(f, "_")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// A [FixedMask] marks the fields that were placed as clues by the generator.
/// It is snapshotted from the dug board once and immutable afterwards, so the clue
/// positions stay known while a player mutates their copy of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedMask {
    // One bit per field, ordered like the board fields.
    fixed: BitArr!(for NUM_FIELDS),
}

impl FixedMask {
    /// Marks every currently filled field of `board` as fixed.
    pub fn from_board(board: &Board) -> Self {
        let mut fixed = bitarr![0; NUM_FIELDS];
        for (row, col) in iproduct!(0..SIZE, 0..SIZE) {
            fixed.set(row * SIZE + col, !board.field(row, col).is_empty());
        }
        Self { fixed }
    }

    #[inline]
    pub fn is_fixed(&self, row: usize, col: usize) -> bool {
        assert!(row < SIZE && col < SIZE);
        self.fixed[row * SIZE + col]
    }

    pub fn num_fixed(&self) -> usize {
        self.fixed.count_ones()
    }
}
