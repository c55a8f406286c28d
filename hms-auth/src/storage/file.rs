//! File-backed key-value store
//!
//! Keeps one file per key under a storage directory, the way a browser keeps
//! one localStorage entry per key.

use super::KeyValueStore;
use hms_core::{ErrorContext, HmsError, HmsResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Durable key-value store writing each entry to `<dir>/<key>.json`
#[derive(Debug)]
pub struct FileStore {
    storage_dir: PathBuf,
}

impl FileStore {
    /// Create a file store rooted at `storage_dir`, creating the directory
    /// if it does not exist
    pub fn new<P: AsRef<Path>>(storage_dir: P) -> HmsResult<Self> {
        let storage_dir = storage_dir.as_ref().to_path_buf();

        std::fs::create_dir_all(&storage_dir)?;

        info!("File store initialized at: {}", storage_dir.display());

        Ok(Self { storage_dir })
    }

    /// Create a file store under the platform data directory
    pub fn default_location() -> HmsResult<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hms");

        Self::new(base_dir)
    }

    /// Directory this store writes into
    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.storage_dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> HmsResult<Option<String>> {
        let path = self.entry_path(key);

        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(HmsError::Storage {
                message: format!("Failed to read entry '{}': {}", key, e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("file_store")
                    .with_operation("get")
                    .with_metadata("path", &path.display().to_string())
                    .with_suggestion("Check permissions on the storage directory"),
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> HmsResult<()> {
        let path = self.entry_path(key);

        std::fs::write(&path, value).map_err(|e| HmsError::Storage {
            message: format!("Failed to write entry '{}': {}", key, e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("file_store")
                .with_operation("set")
                .with_metadata("path", &path.display().to_string())
                .with_suggestion("Check permissions on the storage directory"),
        })?;

        debug!("Wrote entry {} to {}", key, path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> HmsResult<()> {
        let path = self.entry_path(key);

        match std::fs::remove_file(&path) {
            Ok(()) => {
                debug!("Removed entry {} at {}", key, path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(HmsError::Storage {
                message: format!("Failed to remove entry '{}': {}", key, e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("file_store")
                    .with_operation("remove")
                    .with_metadata("path", &path.display().to_string())
                    .with_suggestion("Check permissions on the storage directory"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        store.set("hms_users", "[]").unwrap();
        assert_eq!(store.get("hms_users").unwrap().as_deref(), Some("[]"));

        assert!(dir.path().join("hms_users.json").exists());
    }

    #[test]
    fn test_missing_key_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        assert_eq!(store.get("absent").unwrap(), None);
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        store.set("key", "first").unwrap();
        store.set("key", "second").unwrap();

        assert_eq!(store.get("key").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        store.set("key", "value").unwrap();
        store.remove("key").unwrap();
        store.remove("key").unwrap();

        assert_eq!(store.get("key").unwrap(), None);
        assert!(!dir.path().join("key.json").exists());
    }

    #[test]
    fn test_reopen_sees_previous_writes() {
        let dir = TempDir::new().unwrap();

        {
            let store = FileStore::new(dir.path()).unwrap();
            store.set("persisted", "still here").unwrap();
        }

        let reopened = FileStore::new(dir.path()).unwrap();
        assert_eq!(
            reopened.get("persisted").unwrap().as_deref(),
            Some("still here")
        );
    }
}
