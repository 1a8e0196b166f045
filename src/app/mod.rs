//! Application layer: state, events and actions.
//!
//! ```text
//! Key / host events → Event → handle_event → AppState → Actions → shim side effects
//!                                  ↑                          ↓
//!                                  └──── worker / HTTP replies ┘
//! ```
//!
//! - [`actions`]: side effects requested by the handler
//! - [`handler`]: event processing
//! - [`modes`]: input/view modes and grid directions
//! - [`state`]: state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{is_plain_key, Direction, InputMode, ViewMode};
pub use state::{AppState, PendingSearch, SearchStatus, Settings};
