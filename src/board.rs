//! Square grid of cells behind a single mutation point.

use crate::error::MoveError;
use crate::types::{Cell, Symbol};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Selector for one of the two main diagonals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagonal {
    /// Cells where `row == col`.
    Main,
    /// Cells where `row + col == size - 1`.
    Anti,
}

/// `size * size` cells in row-major order.
///
/// Row `i` occupies linear indices `i*size .. (i+1)*size`; column `j` is
/// `j, j+size, j+2*size, ...`. All writes go through
/// [`place_symbol`](Self::place_symbol), so an occupied cell never changes
/// until the board is reset for a new game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board with the given side length.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    #[instrument]
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "board side length must be at least 1");
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Returns the configured side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Empties every cell for a fresh game.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Gets the cell at a linear index, if in range.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Gets the cell at a linear index.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if `index` is not within `[0, size * size)`.
    pub fn cell(&self, index: usize) -> Result<Cell, MoveError> {
        self.get(index).ok_or(MoveError::OutOfRange(index))
    }

    /// Gets the cell at a row/column coordinate.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if either coordinate is not within `[0, size)`.
    pub fn cell_at(&self, row: usize, col: usize) -> Result<Cell, MoveError> {
        if row >= self.size || col >= self.size {
            return Err(MoveError::OutOfRange(row * self.size + col));
        }
        self.cell(row * self.size + col)
    }

    /// True if the index is in range and the cell holds no symbol.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Places a symbol at the index. The sole mutation path for cells.
    ///
    /// The occupied check and the write happen as one step, so callers never
    /// observe a half-applied move.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` for an invalid index and `CellOccupied` when the
    /// target cell already holds a symbol. The board is unchanged on error.
    #[instrument(skip(self))]
    pub fn place_symbol(&mut self, index: usize, symbol: Symbol) -> Result<(), MoveError> {
        match self.cells.get_mut(index) {
            None => Err(MoveError::OutOfRange(index)),
            Some(Cell::Occupied(_)) => Err(MoveError::CellOccupied(index)),
            Some(cell) => {
                *cell = Cell::Occupied(symbol);
                Ok(())
            }
        }
    }

    /// True iff every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Cells of row `row` in column order. `row` must be within `[0, size)`.
    pub fn row(&self, row: usize) -> impl Iterator<Item = Cell> + '_ {
        let size = self.size;
        (0..size).map(move |col| self.cells[row * size + col])
    }

    /// Cells of column `col` in row order. `col` must be within `[0, size)`.
    pub fn column(&self, col: usize) -> impl Iterator<Item = Cell> + '_ {
        let size = self.size;
        (0..size).map(move |row| self.cells[row * size + col])
    }

    /// Cells of a diagonal, top row first.
    pub fn diagonal(&self, diagonal: Diagonal) -> impl Iterator<Item = Cell> + '_ {
        let size = self.size;
        (0..size).map(move |row| {
            let col = match diagonal {
                Diagonal::Main => row,
                Diagonal::Anti => size - 1 - row,
            };
            self.cells[row * size + col]
        })
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..self.size {
            for col in 0..self.size {
                let mark = match self.cells[row * self.size + col] {
                    Cell::Empty => ".".to_string(),
                    Cell::Occupied(symbol) => symbol.to_string(),
                };
                result.push_str(&mark);
                if col + 1 < self.size {
                    result.push('|');
                }
            }
            if row + 1 < self.size {
                result.push('\n');
            }
        }
        result
    }
}
