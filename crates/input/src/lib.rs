//! Terminal input mapping.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Repeat and
//! debounce timing live in the session, so this crate holds no state.

pub mod map;

pub use tui_puyo_types as types;

pub use map::{handle_key_event, should_quit};
