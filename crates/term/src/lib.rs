//! Terminal rendering for the puzzle boards.
//!
//! A small, game-oriented rendering layer: no widget toolkit, just a
//! framebuffer that [`GameView`] draws into and [`TerminalRenderer`] flushes
//! to the terminal as a diff against the previous frame.
//!
//! - `core` stays deterministic; this crate only reads sessions
//! - boards use 2 terminal columns per cell to keep puyos roughly square

pub mod callout;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_puyo_core as core;
pub use tui_puyo_types as types;

pub use callout::chain_callout;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Panel, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
