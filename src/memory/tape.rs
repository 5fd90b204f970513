//! Fixed-length byte tape with a cursor
//!
//! The tape is the machine's entire addressable memory. Cells hold `u8` values
//! with wrapping arithmetic, and the cursor always satisfies `cursor < len`.
//!
//! # Boundary Policy
//!
//! - Moving left at cell 0 is a no-op.
//! - Moving right at the last cell fails with [`TapeOverflow`] and leaves the
//!   cursor where it is.
//!
//! The tape also remembers the furthest cell the cursor has reached. Every cell
//! past that mark is still zero, so sparse exports only scan the used prefix.

use rustc_hash::FxHashMap;
use std::fmt;

/// Attempted to move the cursor past the last cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapeOverflow {
    pub cursor: usize,
    pub len: usize,
}

impl fmt::Display for TapeOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot move right from cell {} on a tape of {} cells",
            self.cursor, self.len
        )
    }
}

impl std::error::Error for TapeOverflow {}

/// The memory tape
#[derive(Debug, Clone)]
pub struct Tape {
    cells: Vec<u8>,
    cursor: usize,
    /// Highest index the cursor has visited; cells beyond it are zero
    high_water: usize,
}

impl PartialEq for Tape {
    fn eq(&self, other: &Self) -> bool {
        self.cursor == other.cursor && self.cells == other.cells
    }
}

impl Eq for Tape {}

impl Tape {
    /// Create a zeroed tape. A length of 0 is raised to 1 so the cursor has a cell to point at.
    pub fn new(len: usize) -> Self {
        Tape {
            cells: vec![0; len.max(1)],
            cursor: 0,
            high_water: 0,
        }
    }

    /// Move the cursor one cell to the right
    pub fn move_right(&mut self) -> Result<(), TapeOverflow> {
        if self.cursor + 1 < self.cells.len() {
            self.cursor += 1;
            self.high_water = self.high_water.max(self.cursor);
            Ok(())
        } else {
            Err(TapeOverflow {
                cursor: self.cursor,
                len: self.cells.len(),
            })
        }
    }

    /// Move the cursor one cell to the left (no-op at cell 0)
    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn increment(&mut self) {
        let cell = &mut self.cells[self.cursor];
        *cell = cell.wrapping_add(1);
    }

    pub fn decrement(&mut self) {
        let cell = &mut self.cells[self.cursor];
        *cell = cell.wrapping_sub(1);
    }

    /// Value of the current cell
    pub fn read(&self) -> u8 {
        self.cells[self.cursor]
    }

    /// Overwrite the current cell
    pub fn write(&mut self, value: u8) {
        self.cells[self.cursor] = value;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a tape has at least one cell
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.cells.get(index).copied()
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Number of cells that may be non-zero (the visited prefix)
    pub fn used_len(&self) -> usize {
        self.high_water + 1
    }

    /// Sparse copy of the tape: index -> value for every non-zero cell
    pub fn non_zero_cells(&self) -> FxHashMap<usize, u8> {
        self.cells[..self.used_len()]
            .iter()
            .enumerate()
            .filter(|(_, &value)| value != 0)
            .map(|(index, &value)| (index, value))
            .collect()
    }

    /// Reset the tape to the sparse state produced by [`Tape::non_zero_cells`].
    ///
    /// Indices outside the tape are ignored and the cursor is clamped to the last cell.
    pub fn restore(&mut self, cursor: usize, cells: &FxHashMap<usize, u8>) {
        let used = self.used_len();
        self.cells[..used].fill(0);
        self.cursor = cursor.min(self.cells.len() - 1);
        self.high_water = self.cursor;
        for (&index, &value) in cells {
            if let Some(cell) = self.cells.get_mut(index) {
                *cell = value;
                self.high_water = self.high_water.max(index);
            }
        }
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self::new(crate::interpreter::constants::DEFAULT_TAPE_LEN)
    }
}
