//! Engine layer - everything that drives sessions from outside
//!
//! - [`place`]: route planning from the spawn to a target placement
//! - [`planner`]: the heuristic AI that searches placements and replays routes
//! - [`arena`]: solo and versus containers that step sessions and exchange garbage
//!
//! # Example
//!
//! ```
//! use tui_puyo_core::SessionConfig;
//! use tui_puyo_engine::{Arena, PlannerConfig};
//!
//! let mut arena = Arena::versus(
//!     SessionConfig::default(),
//!     7,
//!     [Some(PlannerConfig::default()), Some(PlannerConfig::default())],
//! )
//! .unwrap();
//!
//! for _ in 0..200 {
//!     arena.update(16);
//! }
//! assert!(arena.session(0).unwrap().board().count_occupied() > 0);
//! ```

pub mod arena;
pub mod place;
pub mod planner;

pub use arena::{Arena, Mode, Player};
pub use place::{apply_place, plan_route, PlaceError, Route};
pub use planner::{evaluate, search, Candidate, Planner, PlannerConfig};
