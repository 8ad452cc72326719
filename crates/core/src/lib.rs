//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on UI or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Unit tests for every rule
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`board`]: 6x12 grid with occupancy queries
//! - [`piece`]: the falling pair with move, rotate, and hard drop
//! - [`resolver`]: flood-fill group matching, garbage removal, and gravity
//! - [`scoring`]: chain/group/color power, score, and garbage
//! - [`rng`]: seeded pair generation
//! - [`config`]: session tunables and their validation
//! - [`pop`]: per-cell pop effects for cleared cells
//! - [`session`]: the per-board state machine
//! - [`snapshot`]: plain-data view for renderers
//!
//! # Game Rules
//!
//! - **Pairs**: two colored cells, pivot and child; rotation turns the child
//!   around the pivot with no wall kicks
//! - **Groups**: four or more 4-connected cells of one color clear together
//! - **Garbage**: colorless cells, removed when touching a clearing group
//! - **Chains**: each clear that follows a cascade raises the chain count
//! - **Attack**: `cleared * power / ojama_base` garbage goes to the opponent
//!
//! # Example
//!
//! ```
//! use tui_puyo_core::{Session, SessionConfig};
//! use tui_puyo_types::{GameAction, SessionState};
//!
//! let mut session = Session::new(SessionConfig::default(), 12345).unwrap();
//!
//! session.apply_action(GameAction::MoveRight);
//! session.apply_action(GameAction::RotateCw);
//! session.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(session.board().count_occupied(), 2);
//! assert_eq!(session.state(), SessionState::Controlling);
//! ```
//!
//! # Timing
//!
//! Call [`Session::update`](session::Session::update) every frame with elapsed time:
//! - **Gravity**: one row every 500ms
//! - **Clear wait**: 1000ms between a clear and the cascade
//! - **Cascade**: cells fall at 10 rows per second
//! - **Garbage**: pending garbage drops every 500ms, at most 30 at a time

pub mod board;
pub mod config;
pub mod piece;
pub mod pop;
pub mod resolver;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use tui_puyo_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{ConfigError, SessionConfig};
pub use piece::PuyoPair;
pub use pop::{PopEffect, PopEffects};
pub use resolver::{settle, CellMove, ClearReport, ClearStats, ClearedCell, MatchResolver};
pub use rng::{PairGenerator, Palette};
pub use scoring::{calculate_attack, AttackResult};
pub use session::{Session, SessionEvent};
pub use snapshot::{PairSnapshot, SessionSnapshot};
