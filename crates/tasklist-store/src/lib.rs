//! Key-value storage backends for tasklist.

pub mod error;
pub mod snapshot;

pub use error::StoreError;
pub use snapshot::{decode_tasks, encode_tasks, load_tasks, save_tasks};

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

/// Result alias for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// String key-value storage consumed by the task store.
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` when absent.
    ///
    /// # Errors
    /// Returns a [`StoreError`] when the backend cannot be read.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    /// Returns a [`StoreError`] when the value cannot be persisted.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete the value stored under `key`. Missing keys are not an error.
    ///
    /// # Errors
    /// Returns a [`StoreError`] when the backend cannot be modified.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

/// Process-local storage, optionally bounded by a byte quota.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Create an unbounded store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects writes once keys and values exceed `quota` bytes.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota: Some(quota),
        }
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |entries| entries.len())
    }

    /// Returns true when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.lock()?;
        if let Some(quota) = self.quota {
            let others: usize = entries
                .iter()
                .filter(|(existing, _)| existing.as_str() != key)
                .map(|(existing, stored)| existing.len() + stored.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(StoreError::QuotaExceeded { needed, quota });
            }
        }
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Storage keeping one `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) the storage directory.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        info!(root = %root.display(), "Opened file store");
        Ok(Self { root })
    }

    /// Directory holding the stored values.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_owned()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        // Write beside the target and rename so readers never see a partial value.
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, value)?;
        fs::rename(&staging, &path)?;
        debug!(path = %path.display(), bytes = value.len(), "Wrote value");
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn ok<T, E: std::fmt::Display>(result: Result<T, E>, context: &str) -> T {
        result.unwrap_or_else(|err| panic!("{context}: {err}"))
    }

    #[test]
    fn memory_store_get_set_remove() {
        let store = MemoryStore::new();
        assert!(ok(store.get("tasks"), "get").is_none());
        ok(store.set("tasks", "[]"), "set");
        assert_eq!(ok(store.get("tasks"), "get").as_deref(), Some("[]"));
        assert_eq!(store.len(), 1);
        ok(store.remove("tasks"), "remove");
        ok(store.remove("tasks"), "remove twice");
        assert!(store.is_empty());
    }

    #[test]
    fn memory_store_enforces_quota() {
        let store = MemoryStore::with_quota(16);
        ok(store.set("tasks", "0123456789"), "fits");
        // Overwriting the same key only counts the new value.
        ok(store.set("tasks", "9876543210"), "overwrite fits");
        let Err(err) = store.set("tasks", "0123456789012") else {
            panic!("write beyond quota should fail");
        };
        assert!(matches!(err, StoreError::QuotaExceeded { needed: 18, quota: 16 }));
        assert_eq!(ok(store.get("tasks"), "get").as_deref(), Some("9876543210"));
    }

    #[test]
    fn file_store_roundtrip() {
        let dir = ok(tempdir(), "tempdir");
        let store = ok(FileStore::open(dir.path().join("data")), "open");
        assert!(ok(store.get("tasks"), "get").is_none());
        ok(store.set("tasks", "[{\"id\":\"a\"}]"), "set");
        assert!(store.root().join("tasks.json").exists());

        let reopened = ok(FileStore::open(store.root()), "reopen");
        assert_eq!(
            ok(reopened.get("tasks"), "get").as_deref(),
            Some("[{\"id\":\"a\"}]")
        );
        ok(reopened.remove("tasks"), "remove");
        assert!(ok(reopened.get("tasks"), "get").is_none());
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let dir = ok(tempdir(), "tempdir");
        let store = ok(FileStore::open(dir.path()), "open");
        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(
                matches!(store.set(key, "x"), Err(StoreError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
    }
}
