//! Key-value store abstraction.
//!
//! The controller never touches storage directly; the worker thread owns a
//! boxed [`KeyValueStore`] and serves `get`/`set` requests for it. Values are
//! opaque strings, the same contract a browser's local storage offers.

use crate::domain::error::Result;

/// Synchronous string-keyed storage.
///
/// # Implementations
///
/// - [`JsonFileStore`](crate::storage::JsonFileStore): JSON file with atomic writes (default)
/// - [`MemoryStore`](crate::storage::MemoryStore): in-process map, used by tests
///
/// # Examples
///
/// ```
/// use bookmate::storage::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::default();
/// store.set("theme", "dark")?;
/// assert_eq!(store.get("theme")?.as_deref(), Some("dark"));
/// # Ok::<(), bookmate::BookmateError>(())
/// ```
pub trait KeyValueStore: Send {
    /// Returns the value stored under `key`, `Ok(None)` if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// The write is durable when this returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
