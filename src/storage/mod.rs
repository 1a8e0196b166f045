//! Storage layer for persisted preferences.
//!
//! Two values are persisted: the theme literal and the serialized favorites
//! list. Both live behind the [`KeyValueStore`] port so the worker can use a
//! JSON file in production and an in-memory map in tests.
//!
//! # Modules
//!
//! - `backend`: the [`KeyValueStore`] trait
//! - `json`: JSON file implementation with atomic writes
//! - `memory`: in-memory implementation

pub mod backend;
pub mod json;
pub mod memory;

pub use backend::KeyValueStore;
pub use json::JsonFileStore;
pub use memory::MemoryStore;

/// Storage key of the theme literal (`"light"` / `"dark"`).
pub const THEME_KEY: &str = "theme";

/// Storage key of the serialized favorites list.
pub const FAVORITES_KEY: &str = "favorites";

/// File name of the preferences store inside the data directory.
pub const PREFERENCES_FILE: &str = "preferences.json";
