//! Board module - manages the game grid
//!
//! The board is a `cols x rows` grid where each cell is empty or holds a color.
//! Uses a flat row-major vector for cache locality; dimensions are fixed when
//! the board is created and never change afterwards.
//! Coordinates: (x, y) where x runs left to right and y runs top (0) to bottom.

use crate::types::{Cell, Color};

/// The game board with flat row-major storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(cols: u8, rows: u8) -> Self {
        Self {
            width: cols,
            height: rows,
            cells: vec![None; cols as usize * rows as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Occupy the cell at (x, y) with `color`.
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is outside the board. Callers check collisions first,
    /// so an out-of-bounds write means that contract was broken upstream.
    pub fn set_cell(&mut self, x: i32, y: i32, color: Color) {
        let idx = self.index(x, y).unwrap_or_else(|| {
            panic!(
                "set_cell({x}, {y}) outside {}x{} board",
                self.width, self.height
            )
        });
        self.cells[idx] = Some(color);
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < self.height as usize && self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Remove a row, shift every row above it down by one and insert an empty row at the top.
    /// Rows below `y` are untouched. Out-of-range rows are ignored.
    pub fn remove_row(&mut self, y: usize) {
        if y >= self.height as usize {
            return;
        }

        let width = self.width as usize;

        // copy_within handles the overlapping ranges.
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(None);
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Cells of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y` is not a valid row.
    pub fn row(&self, y: usize) -> &[Cell] {
        let width = self.width as usize;
        &self.cells[y * width..(y + 1) * width]
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(self.width.max(1) as usize)
    }

    /// Number of occupied cells on the board
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}
