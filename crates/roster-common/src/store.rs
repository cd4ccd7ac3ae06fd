//! Key-value blob storage for persisted collections.

use anyhow::{Context, Result, anyhow, bail};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// Durable string-keyed text storage.
///
/// Values are opaque to the store; callers encode and decode them.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the value stored under `key`. Missing keys are not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Check if a value is stored under `key`.
    fn contains(&self, key: &str) -> bool;
}

/// File-backed store: one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Directory holding the value files
    base_dir: Utf8PathBuf,
}

impl FileStore {
    /// Create a store rooted at `base_dir`. The directory is created lazily.
    pub fn new(base_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Directory holding the value files.
    pub fn base_dir(&self) -> &Utf8Path {
        &self.base_dir
    }

    /// Get the file path for the given key.
    pub fn value_path(&self, key: &str) -> Result<Utf8PathBuf> {
        validate_key(key)?;
        Ok(self.base_dir.join(format!("{}.json", key)))
    }

    /// Ensure the storage directory exists.
    pub fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.base_dir)
            .with_context(|| format!("Failed to create directory: {}", self.base_dir))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.value_path(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read value file: {}", path))?;
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.value_path(key)?;
        self.ensure_dir()?;

        // Write beside the target and rename over it so readers never see a partial blob.
        let mut tmp = NamedTempFile::new_in(&self.base_dir)
            .with_context(|| format!("Failed to create temp file in: {}", self.base_dir))?;
        tmp.write_all(value.as_bytes())
            .with_context(|| format!("Failed to write value for key: {}", key))?;
        tmp.as_file()
            .sync_all()
            .with_context(|| format!("Failed to sync value for key: {}", key))?;
        tmp.persist(&path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to write value file: {}", path))?;

        tracing::debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.value_path(key)?;
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to delete value file: {}", path))?;
        }
        Ok(())
    }

    fn contains(&self, key: &str) -> bool {
        self.value_path(key).map(|p| p.exists()).unwrap_or(false)
    }
}

/// In-process store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_values<T>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> T) -> Result<T> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))?;
        Ok(f(&mut values))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_values(|values| values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.with_values(|values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.with_values(|values| {
            values.remove(key);
        })
    }

    fn contains(&self, key: &str) -> bool {
        self.with_values(|values| values.contains_key(key))
            .unwrap_or(false)
    }
}

/// Reject keys that could escape the store directory.
fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        bail!("Store key must not be empty");
    }
    if key.contains(['/', '\\']) || key == "." || key == ".." {
        bail!("Invalid store key: {}", key);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn file_store(dir: &tempfile::TempDir) -> FileStore {
        FileStore::new(Utf8PathBuf::from_path_buf(dir.path().join("data")).unwrap())
    }

    #[test]
    fn test_set_and_get() {
        let dir = tempdir().unwrap();
        let store = file_store(&dir);

        store.set("games", "[]").unwrap();
        assert_eq!(store.get("games").unwrap(), Some("[]".to_string()));
        assert!(store.base_dir().join("games.json").exists());
    }

    #[test]
    fn test_get_missing() {
        let dir = tempdir().unwrap();
        let store = file_store(&dir);

        assert_eq!(store.get("teamMembers").unwrap(), None);
        assert!(!store.contains("teamMembers"));
    }

    #[test]
    fn test_set_overwrites() {
        let dir = tempdir().unwrap();
        let store = file_store(&dir);

        store.set("games", "[1,2,3]").unwrap();
        store.set("games", "[]").unwrap();
        assert_eq!(store.get("games").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_survives_new_handle() {
        let dir = tempdir().unwrap();
        file_store(&dir).set("teamMembers", "[\"a\"]").unwrap();

        let reopened = file_store(&dir);
        assert_eq!(
            reopened.get("teamMembers").unwrap().as_deref(),
            Some("[\"a\"]")
        );
    }

    #[test]
    fn test_remove() {
        let dir = tempdir().unwrap();
        let store = file_store(&dir);

        store.set("games", "[]").unwrap();
        assert!(store.contains("games"));

        store.remove("games").unwrap();
        assert!(!store.contains("games"));
        store.remove("games").unwrap();
    }

    #[test]
    fn test_rejects_path_keys() {
        let dir = tempdir().unwrap();
        let store = file_store(&dir);

        assert!(store.set("../escape", "x").is_err());
        assert!(store.set("", "x").is_err());
        assert!(store.get("a/b").is_err());
        assert!(!store.contains(".."));
    }

    #[test]
    fn test_memory_store_clones_share_values() {
        let store = MemoryStore::new();
        let handle = store.clone();

        store.set("games", "[]").unwrap();
        assert_eq!(handle.get("games").unwrap(), Some("[]".to_string()));

        handle.remove("games").unwrap();
        assert!(!store.contains("games"));
    }
}
