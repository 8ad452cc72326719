//! Piece module - the falling pair
//!
//! A pair is two colored cells: the pivot at the anchor and the child offset
//! by the orientation. Rotation turns the child around the pivot in place;
//! there is no wall-kick search. Every operation validates against a board
//! passed in by the caller.

use crate::board::Board;
use crate::types::{Orientation, PuyoColor, RotationDir, SPAWN_COLUMN, SPAWN_ROW};

/// The active two-cell piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuyoPair {
    pub pivot: PuyoColor,
    pub child: PuyoColor,
    /// Pivot column
    pub x: i8,
    /// Pivot row
    pub y: i8,
    pub orientation: Orientation,
}

impl PuyoPair {
    /// Create a pair at the spawn position, facing up
    pub fn new(pivot: PuyoColor, child: PuyoColor) -> Self {
        Self {
            pivot,
            child,
            x: SPAWN_COLUMN,
            y: SPAWN_ROW,
            orientation: Orientation::Up,
        }
    }

    /// Same colors, placed at an arbitrary anchor
    pub fn at(self, x: i8, y: i8, orientation: Orientation) -> Self {
        Self {
            x,
            y,
            orientation,
            ..self
        }
    }

    /// Position of the child cell
    pub fn child_pos(&self) -> (i8, i8) {
        let (dx, dy) = self.orientation.child_offset();
        (self.x + dx, self.y + dy)
    }

    /// Both cells as `(x, y, color)`, pivot first
    pub fn cells(&self) -> [(i8, i8, PuyoColor); 2] {
        let (cx, cy) = self.child_pos();
        [(self.x, self.y, self.pivot), (cx, cy, self.child)]
    }

    /// Whether either cell occupies (x, y)
    pub fn occupies(&self, x: i8, y: i8) -> bool {
        (self.x, self.y) == (x, y) || self.child_pos() == (x, y)
    }

    /// Check if both cells are in bounds and empty at the given anchor
    pub fn fits(board: &Board, x: i8, y: i8, orientation: Orientation) -> bool {
        let (dx, dy) = orientation.child_offset();
        board.is_valid(x, y) && board.is_valid(x + dx, y + dy)
    }

    /// Check if the pair fits where it currently is
    pub fn fits_at_current(&self, board: &Board) -> bool {
        Self::fits(board, self.x, self.y, self.orientation)
    }

    /// Try to move by (dx, dy); returns true if moved
    pub fn try_move(&mut self, board: &Board, dx: i8, dy: i8) -> bool {
        let (nx, ny) = (self.x + dx, self.y + dy);
        if !Self::fits(board, nx, ny, self.orientation) {
            return false;
        }
        self.x = nx;
        self.y = ny;
        true
    }

    /// Try to rotate around the pivot; returns true if rotated
    pub fn try_rotate(&mut self, board: &Board, dir: RotationDir) -> bool {
        let next = self.orientation.rotate(dir);
        if !Self::fits(board, self.x, self.y, next) {
            return false;
        }
        self.orientation = next;
        true
    }

    /// Drop until blocked; returns the number of rows dropped
    pub fn hard_drop(&mut self, board: &Board) -> u8 {
        let mut rows = 0;
        while self.try_move(board, 0, 1) {
            rows += 1;
        }
        rows
    }

    /// Whether the pair cannot move down any further
    pub fn is_grounded(&self, board: &Board) -> bool {
        !Self::fits(board, self.x, self.y + 1, self.orientation)
    }
}
