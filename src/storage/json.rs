//! JSON file-based key-value store.
//!
//! The whole map is kept in memory and rewritten on every `set` using
//! write-to-temp + rename. A file that cannot be parsed is logged and
//! treated as empty.

use crate::domain::error::{BookmateError, Result};
use crate::storage::backend::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Current on-disk format version.
const FORMAT_VERSION: u32 = 1;

/// Top-level structure serialized to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreData {
    /// Version of the storage format for future migrations.
    version: u32,

    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON file storage backend.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "entries": {
///     "favorites": "[{\"key\":\"/works/OL82563W\",\"title\":\"Harry Potter\"}]",
///     "theme": "dark"
///   }
/// }
/// ```
#[derive(Debug)]
pub struct JsonFileStore {
    file_path: PathBuf,
    data: StoreData,
}

impl JsonFileStore {
    /// Opens the store at `file_path`, creating parent directories.
    ///
    /// A missing file starts an empty store. A corrupt file also starts an
    /// empty store; it is only overwritten by the next successful `set`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or an
    /// existing file cannot be read.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bookmate::storage::JsonFileStore;
    /// use std::path::PathBuf;
    ///
    /// let store = JsonFileStore::open(PathBuf::from("/tmp/bookmate/preferences.json"))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no store file yet, starting empty");
            StoreData::default()
        };

        tracing::debug!(entries = data.entries.len(), "store opened");
        Ok(Self { file_path, data })
    }

    fn load_from_file(path: &Path) -> Result<StoreData> {
        let contents = std::fs::read_to_string(path)?;
        match serde_json::from_str::<StoreData>(&contents) {
            Ok(data) => {
                if data.version != FORMAT_VERSION {
                    tracing::warn!(version = data.version, "unexpected store version, reading anyway");
                }
                Ok(data)
            }
            Err(e) => {
                tracing::warn!(path = ?path, error = %e, "store file is corrupt, starting empty");
                Ok(StoreData::default())
            }
        }
    }

    fn save_to_file(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| BookmateError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::trace!(path = ?self.file_path, "store saved");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_store_set", key = %key, value_len = value.len()).entered();

        let previous = self.data.entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.save_to_file() {
            // keep memory consistent with disk
            match previous {
                Some(old) => self.data.entries.insert(key.to_string(), old),
                None => self.data.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.json");

        let mut store = JsonFileStore::open(path.clone()).unwrap();
        assert_eq!(store.get("theme").unwrap(), None);
        store.set("theme", "dark").unwrap();
        store.set("favorites", "[]").unwrap();
        drop(store);

        let reopened = JsonFileStore::open(path).unwrap();
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(reopened.get("favorites").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn corrupt_file_opens_empty_and_is_replaced_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "{ this is not json").unwrap();

        let mut store = JsonFileStore::open(path.clone()).unwrap();
        assert_eq!(store.get("favorites").unwrap(), None);

        store.set("theme", "light").unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"theme\": \"light\""));
        assert!(!path.with_extension("tmp").exists());
    }
}
