//! TUI Puyo (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_puyo::{core,engine,input,term,types}`
//! so the binary, integration tests and benches share one import path.

pub use tui_puyo_core as core;
pub use tui_puyo_engine as engine;
pub use tui_puyo_input as input;
pub use tui_puyo_term as term;
pub use tui_puyo_types as types;
