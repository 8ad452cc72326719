//! Board module - manages the game grid
//!
//! The board is a 6x12 grid where each cell can be empty, colored, or garbage.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..5 (left to right), y ranges 0..11 (top to bottom)
//! Spawning requires row 1 of the two center columns to be empty.

use crate::types::{Cell, Puyo, PuyoColor, BOARD_HEIGHT, BOARD_SIZE, BOARD_WIDTH, SPAWN_ROW};

/// The game board - 6 columns x 12 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    pub fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Inverse of [`Board::index`]
    #[inline(always)]
    pub fn coords(idx: usize) -> (i8, i8) {
        let w = BOARD_WIDTH as usize;
        ((idx % w) as i8, (idx / w) as i8)
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_none()
    }

    /// Color at (x, y); `None` for empty, garbage, or out of bounds
    pub fn color_at(&self, x: i8, y: i8) -> Option<PuyoColor> {
        match self.get(x, y) {
            Some(Some(puyo)) => puyo.color(),
            _ => None,
        }
    }

    /// Check whether the spawn cells (row 1 of both center columns) are occupied
    pub fn is_spawn_blocked(&self) -> bool {
        let x = (BOARD_WIDTH / 2) as i8;
        self.is_occupied(x - 1, SPAWN_ROW) || self.is_occupied(x, SPAWN_ROW)
    }

    /// Lowest open row of column `x`: the row just above its stack.
    ///
    /// `None` when the column is full at the top or out of bounds.
    pub fn landing_row(&self, x: i8) -> Option<i8> {
        if self.is_out_of_bounds(x, 0) || self.is_occupied(x, 0) {
            return None;
        }
        let top = (1..BOARD_HEIGHT as i8)
            .find(|&y| self.is_occupied(x, y))
            .unwrap_or(BOARD_HEIGHT as i8);
        Some(top - 1)
    }

    /// Number of occupied cells
    pub fn count_occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell; BOARD_SIZE] {
        &mut self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }

    /// Write the board into a u8 grid: 0 empty, 1-6 colors, 7 garbage
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        let w = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = self.cells[y * w + x].map(|p| p.code()).unwrap_or(0);
            }
        }
    }

    /// Build a board from text rows, top row first.
    ///
    /// Fewer than `BOARD_HEIGHT` rows are aligned to the bottom. Letters
    /// `R G B Y P C` are colors, `#` is garbage, anything else is empty.
    ///
    /// ```
    /// use tui_puyo_core::Board;
    /// use tui_puyo_core::types::{Puyo, PuyoColor};
    ///
    /// let board = Board::from_rows(&["R.....", "RR#..."]);
    /// assert_eq!(board.get(0, 11), Some(Some(Puyo::Colored(PuyoColor::Red))));
    /// assert_eq!(board.get(2, 11), Some(Some(Puyo::Garbage)));
    /// assert_eq!(board.get(0, 10), Some(Some(Puyo::Colored(PuyoColor::Red))));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let h = BOARD_HEIGHT as usize;
        let skip = rows.len().saturating_sub(h);
        let top = h.saturating_sub(rows.len());
        for (i, row) in rows.iter().skip(skip).enumerate() {
            let y = (top + i) as i8;
            for (x, ch) in row.chars().take(BOARD_WIDTH as usize).enumerate() {
                let cell = match ch {
                    '#' => Some(Puyo::Garbage),
                    c => PuyoColor::from_str(&c.to_string()).map(Puyo::Colored),
                };
                board.set(x as i8, y, cell);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in 0..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                let ch = match self.get(x, y).flatten() {
                    None => '.',
                    Some(Puyo::Garbage) => '#',
                    Some(Puyo::Colored(c)) => c.letter(),
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
