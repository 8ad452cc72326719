//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, AI planning, terminal rendering).
//!
//! # Board Dimensions
//!
//! The playfield is the classic connected-color grid:
//!
//! - **Width**: 6 columns (indexed 0-5)
//! - **Height**: 12 rows (indexed 0-11, row 0 is the top)
//! - **Spawn position**: pivot at (2, 1) with the child above it at (2, 0)
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `FALL_INTERVAL_MS` | 500 | Natural gravity, one row per interval |
//! | `CLEAR_WAIT_MS` | 1000 | Pause after a clear before cells cascade |
//! | `CASCADE_ROWS_PER_SEC` | 10 | Display fall speed of settling cells |
//! | `GARBAGE_INTERVAL_MS` | 500 | Cadence of pending garbage drops |
//! | `KEY_DEBOUNCE_MS` | 150 | Minimum gap between accepted commands |
//! | `ROTATE_DEBOUNCE_MS` | 250 | Minimum gap between accepted rotations |
//! | `POP_EFFECT_MS` | 1500 | Lifetime of a per-cell pop effect |
//!
//! # AI Timing
//!
//! - `AI_THINK_MS`: 500ms - idle time before the planner searches
//! - `AI_MOVE_DELAY_MS`: 100ms - pause after each scripted move
//! - `AI_ROTATE_DELAY_MS`: 150ms - pause after each scripted rotation
//!
//! # Examples
//!
//! ```
//! use tui_puyo_types::{GameAction, Orientation, Puyo, PuyoColor, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! // Parse a color (case-insensitive)
//! assert_eq!(PuyoColor::from_str("R"), Some(PuyoColor::Red));
//!
//! // Garbage never matches a color
//! assert!(Puyo::Garbage.color().is_none());
//!
//! // Rotate
//! assert_eq!(Orientation::Up.rotate_cw(), Orientation::Right);
//!
//! // Parse game action
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! // Board dimensions
//! assert_eq!(BOARD_WIDTH, 6);
//! assert_eq!(BOARD_HEIGHT, 12);
//! ```

/// Board width in cells (6 columns)
pub const BOARD_WIDTH: u8 = 6;

/// Board height in cells (12 rows)
pub const BOARD_HEIGHT: u8 = 12;

/// Total number of cells on the board
pub const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Column of a freshly spawned pair's pivot (left of the two center columns)
pub const SPAWN_COLUMN: i8 = (BOARD_WIDTH / 2) as i8 - 1;

/// Row of a freshly spawned pair's pivot; the child sits one row above
pub const SPAWN_ROW: i8 = 1;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Natural gravity: the pair falls one row per interval
pub const FALL_INTERVAL_MS: u32 = 500;

/// Wait after a clear before the cascade starts
pub const CLEAR_WAIT_MS: u32 = 1000;

/// Display speed of cascading cells, in rows per second
pub const CASCADE_ROWS_PER_SEC: u32 = 10;

/// Fall offsets are tracked in thousandths of a row
pub const MILLI_ROWS: u32 = 1000;

/// Cadence at which pending garbage is dropped onto the board
pub const GARBAGE_INTERVAL_MS: u32 = 500;

/// Maximum garbage cells dropped in one batch
pub const GARBAGE_BATCH_CAP: u32 = 30;

/// Divisor turning attack strength into garbage cells
pub const OJAMA_BASE: u32 = 10;

/// Minimum gap between two accepted input commands
pub const KEY_DEBOUNCE_MS: u32 = 150;

/// Minimum gap between two accepted rotations
pub const ROTATE_DEBOUNCE_MS: u32 = 250;

/// Lifetime of a pop effect
pub const POP_EFFECT_MS: u32 = 1500;

/// Flashes per second while a cell pops
pub const POP_FLASH_HZ: f32 = 8.0;

/// Idle time before the AI planner searches for a placement
pub const AI_THINK_MS: u32 = 500;

/// Delay after each scripted horizontal move
pub const AI_MOVE_DELAY_MS: u32 = 100;

/// Delay after each scripted rotation
pub const AI_ROTATE_DELAY_MS: u32 = 150;

/// Connected cells needed for a group to clear
pub const MIN_GROUP_SIZE: usize = 4;

/// Minimum number of distinct colors a pair palette must offer
pub const MIN_PALETTE_COLORS: usize = 2;

/// Chain bonus, indexed by chain length (saturating at the last entry)
pub const CHAIN_BONUS: [u32; 20] = [
    0, 0, 8, 16, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448, 480, 512,
];

/// Color bonus, indexed by distinct colors cleared at once
pub const COLOR_BONUS: [u32; 6] = [0, 0, 3, 6, 12, 24];

/// Simultaneous-group bonus, indexed by groups cleared at once.
///
/// Zero up to four groups; only five or more are rewarded.
pub const GROUP_BONUS: [u32; 12] = [0, 0, 0, 0, 0, 2, 3, 4, 5, 6, 7, 10];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(FALL_INTERVAL_MS, 500);
        assert_eq!(CLEAR_WAIT_MS, 1000);
        assert_eq!(GARBAGE_INTERVAL_MS, 500);
        assert_eq!(GARBAGE_BATCH_CAP, 30);
        assert_eq!(KEY_DEBOUNCE_MS, 150);
        assert_eq!(ROTATE_DEBOUNCE_MS, 250);

        assert_eq!(AI_THINK_MS, 500);
        assert_eq!(AI_MOVE_DELAY_MS, 100);
        assert_eq!(AI_ROTATE_DELAY_MS, 150);
    }

    #[test]
    fn spawn_sits_on_center_columns() {
        assert_eq!(SPAWN_COLUMN, 2);
        assert_eq!(SPAWN_ROW, 1);
    }

    #[test]
    fn bonus_tables_start_at_zero() {
        assert_eq!(CHAIN_BONUS[0], 0);
        assert_eq!(CHAIN_BONUS[1], 0);
        assert_eq!(COLOR_BONUS[1], 0);
        assert!(GROUP_BONUS[..5].iter().all(|&b| b == 0));
    }
}

/// The colors a pair can be drawn from
///
/// The default palette uses the first four; `Purple` and `Cyan` are
/// available for larger palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PuyoColor {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Cyan,
}

impl PuyoColor {
    /// Every color, in palette order
    pub const ALL: [PuyoColor; 6] = [
        PuyoColor::Red,
        PuyoColor::Green,
        PuyoColor::Blue,
        PuyoColor::Yellow,
        PuyoColor::Purple,
        PuyoColor::Cyan,
    ];

    /// Parse color from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_puyo_types::PuyoColor;
    ///
    /// assert_eq!(PuyoColor::from_str("green"), Some(PuyoColor::Green));
    /// assert_eq!(PuyoColor::from_str("Y"), Some(PuyoColor::Yellow));
    /// assert_eq!(PuyoColor::from_str("garbage"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "r" | "red" => Some(PuyoColor::Red),
            "g" | "green" => Some(PuyoColor::Green),
            "b" | "blue" => Some(PuyoColor::Blue),
            "y" | "yellow" => Some(PuyoColor::Yellow),
            "p" | "purple" => Some(PuyoColor::Purple),
            "c" | "cyan" => Some(PuyoColor::Cyan),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PuyoColor::Red => "red",
            PuyoColor::Green => "green",
            PuyoColor::Blue => "blue",
            PuyoColor::Yellow => "yellow",
            PuyoColor::Purple => "purple",
            PuyoColor::Cyan => "cyan",
        }
    }

    /// Single-letter code used by board literals
    pub fn letter(&self) -> char {
        match self {
            PuyoColor::Red => 'R',
            PuyoColor::Green => 'G',
            PuyoColor::Blue => 'B',
            PuyoColor::Yellow => 'Y',
            PuyoColor::Purple => 'P',
            PuyoColor::Cyan => 'C',
        }
    }
}

/// Content of an occupied board cell
///
/// Garbage is colorless: it never seeds or joins a group and is only
/// removed when it touches a clearing group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Puyo {
    Colored(PuyoColor),
    Garbage,
}

impl Puyo {
    /// Color of a colored cell, `None` for garbage
    pub fn color(&self) -> Option<PuyoColor> {
        match self {
            Puyo::Colored(color) => Some(*color),
            Puyo::Garbage => None,
        }
    }

    pub fn is_garbage(&self) -> bool {
        matches!(self, Puyo::Garbage)
    }

    /// Compact code for snapshots: 1-6 for colors, 7 for garbage (0 is empty)
    pub fn code(&self) -> u8 {
        match self {
            Puyo::Colored(color) => *color as u8 + 1,
            Puyo::Garbage => 7,
        }
    }

    /// Inverse of [`Puyo::code`]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1..=6 => Some(Puyo::Colored(PuyoColor::ALL[(code - 1) as usize])),
            7 => Some(Puyo::Garbage),
            _ => None,
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Puyo)`: Occupied by a colored cell or garbage
pub type Cell = Option<Puyo>;

/// Orientation of a pair: where the child sits relative to the pivot
///
/// - **Up**: child above the pivot (spawn orientation)
/// - **Right**: child right of the pivot
/// - **Down**: child below the pivot
/// - **Left**: child left of the pivot
///
/// The rotation cycle goes: Up → Right → Down → Left → Up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Up,
    Right,
    Down,
    Left,
}

impl Orientation {
    /// All orientations in rotation order
    pub const ALL: [Orientation; 4] = [
        Orientation::Up,
        Orientation::Right,
        Orientation::Down,
        Orientation::Left,
    ];

    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_puyo_types::Orientation;
    ///
    /// assert_eq!(Orientation::Up.rotate_cw(), Orientation::Right);
    /// assert_eq!(Orientation::Left.rotate_cw(), Orientation::Up);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Orientation::Up => Orientation::Right,
            Orientation::Right => Orientation::Down,
            Orientation::Down => Orientation::Left,
            Orientation::Left => Orientation::Up,
        }
    }

    /// Rotate counter-clockwise (-90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_puyo_types::Orientation;
    ///
    /// assert_eq!(Orientation::Up.rotate_ccw(), Orientation::Left);
    /// assert_eq!(Orientation::Right.rotate_ccw(), Orientation::Up);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Orientation::Up => Orientation::Left,
            Orientation::Left => Orientation::Down,
            Orientation::Down => Orientation::Right,
            Orientation::Right => Orientation::Up,
        }
    }

    /// Rotate in the given direction
    pub fn rotate(&self, dir: RotationDir) -> Self {
        match dir {
            RotationDir::Cw => self.rotate_cw(),
            RotationDir::Ccw => self.rotate_ccw(),
        }
    }

    /// Offset of the child cell relative to the pivot
    pub fn child_offset(&self) -> (i8, i8) {
        match self {
            Orientation::Up => (0, -1),
            Orientation::Right => (1, 0),
            Orientation::Down => (0, 1),
            Orientation::Left => (-1, 0),
        }
    }

    /// Clockwise quarter turns from `Up`
    pub fn index(&self) -> u8 {
        match self {
            Orientation::Up => 0,
            Orientation::Right => 1,
            Orientation::Down => 2,
            Orientation::Left => 3,
        }
    }

    /// Parse orientation from string
    ///
    /// Accepts full names or single letters (case-insensitive):
    /// "up" | "u", "right" | "r", "down" | "d", "left" | "l"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Orientation::Up),
            "right" | "r" => Some(Orientation::Right),
            "down" | "d" => Some(Orientation::Down),
            "left" | "l" => Some(Orientation::Left),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Up => "up",
            Orientation::Right => "right",
            Orientation::Down => "down",
            Orientation::Left => "left",
        }
    }
}

/// Direction of a single rotation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDir {
    Cw,
    Ccw,
}

/// Game actions that can be applied to a session
///
/// These actions are used by both human input and the AI planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move pair one cell left
    MoveLeft,
    /// Move pair one cell right
    MoveRight,
    /// Move pair one cell down
    SoftDrop,
    /// Drop pair to its resting row and lock it
    HardDrop,
    /// Rotate pair 90° clockwise
    RotateCw,
    /// Rotate pair 90° counter-clockwise
    RotateCcw,
    /// Restart the session (any state)
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_puyo_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateCcw"), Some(GameAction::RotateCcw));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Restart => "restart",
        }
    }

    pub fn is_rotation(&self) -> bool {
        matches!(self, GameAction::RotateCw | GameAction::RotateCcw)
    }
}

/// Per-board state machine states
///
/// `Locking` and `Resolving` are passed through within a single call;
/// the others persist across ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// A pair is falling and accepts commands
    Controlling,
    /// The pair is being written into the board
    Locking,
    /// The match resolver is running
    Resolving,
    /// Cleared cells are popping; cascade starts when the wait expires
    AwaitingClearAnimation,
    /// Cells are falling into the gaps left by a clear
    Cascading,
    /// Terminal until restart
    GameOver,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Controlling => "controlling",
            SessionState::Locking => "locking",
            SessionState::Resolving => "resolving",
            SessionState::AwaitingClearAnimation => "awaitingClearAnimation",
            SessionState::Cascading => "cascading",
            SessionState::GameOver => "gameOver",
        }
    }
}
