//! Persistent key-value storage.
//!
//! Mirrors browser local storage: string keys mapped to string values, where
//! values are JSON documents serialized by the caller. The file backend keeps
//! everything in `<TALLER_HOME>/storage.json` with restricted permissions (0600).

use std::collections::{BTreeMap, HashMap};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use anyhow::{Context, Result};

use crate::config::paths;

/// String-keyed storage used for session persistence.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Returns whether a value was present.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be written.
    fn remove_item(&self, key: &str) -> Result<bool>;
}

/// File-backed store (one JSON object per file).
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location, `<TALLER_HOME>/storage.json`.
    pub fn open_default() -> Self {
        Self::new(paths::storage_path())
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read storage from {}", self.path.display()))?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse storage from {}", self.path.display()))
    }

    /// Loads the map for a write; an unreadable document is replaced, not fatal.
    fn load_for_write(&self) -> Result<BTreeMap<String, String>> {
        match self.load() {
            Ok(map) => Ok(map),
            Err(e) if self.path.is_file() => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %format!("{e:#}"),
                    "Discarding unreadable storage file"
                );
                Ok(BTreeMap::new())
            }
            Err(e) => Err(e),
        }
    }

    fn save(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(map).context("Failed to serialize storage")?;

        let tmp_path = self.path.with_extension("json.tmp");
        write_private(&tmp_path, contents.as_bytes())?;
        fs::rename(&tmp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}

/// Writes a file readable only by the owner (on unix).
fn write_private(path: &Path, bytes: &[u8]) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .with_context(|| format!("Failed to open {} for writing", path.display()))?;
        file.write_all(bytes)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    }

    #[cfg(not(unix))]
    {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("Failed to open {} for writing", path.display()))?;
        file.write_all(bytes)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    }

    Ok(())
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.load_for_write()?;
        map.insert(key.to_string(), value.to_string());
        self.save(&map)
    }

    fn remove_item(&self, key: &str) -> Result<bool> {
        let mut map = self.load_for_write()?;
        let existed = map.remove(key).is_some();
        if existed || self.path.exists() {
            self.save(&map)?;
        }
        Ok(existed)
    }
}

/// In-process store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<bool> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(items.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_missing_file_has_no_items() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("storage.json"));
        assert_eq!(store.get_item("currentUser").unwrap(), None);
    }

    #[test]
    fn test_set_get_remove() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("storage.json"));

        store.set_item("currentUser", r#"{"id":1}"#).unwrap();
        store.set_item("other", "x").unwrap();
        assert_eq!(
            store.get_item("currentUser").unwrap().as_deref(),
            Some(r#"{"id":1}"#)
        );

        assert!(store.remove_item("currentUser").unwrap());
        assert!(!store.remove_item("currentUser").unwrap());
        assert_eq!(store.get_item("currentUser").unwrap(), None);
        assert_eq!(store.get_item("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_values_survive_a_new_handle() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        FileStore::new(&path).set_item("k", "v").unwrap();
        assert_eq!(FileStore::new(&path).get_item("k").unwrap().as_deref(), Some("v"));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        FileStore::new(&path).set_item("k", "v").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_corrupt_file_read_is_error_but_write_recovers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{not json").unwrap();
        let store = FileStore::new(&path);

        assert!(store.get_item("k").is_err());
        store.set_item("k", "v").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        store.set_item("k", "v").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));
        assert!(store.remove_item("k").unwrap());
        assert_eq!(store.get_item("k").unwrap(), None);
    }
}
