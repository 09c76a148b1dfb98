//! Durable client-local key-value storage.
//!
//! Values are opaque strings keyed by name, the same shape a browser's local
//! storage offers. `FileStorage` keeps them in `<base>/storage.json` with
//! restricted permissions (0600); `MemoryStorage` keeps them in process.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result};

use crate::config::paths;

/// A string-keyed slot store.
pub trait SlotStorage: Send {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be read or decoded.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be written.
    fn remove(&mut self, key: &str) -> Result<()>;
}

type Entries = BTreeMap<String, String>;

/// On-disk shape. Keys written by other tools may hold any JSON value; only
/// string values are visible through [`SlotStorage`], the rest are kept as is.
type FileEntries = BTreeMap<String, serde_json::Value>;

/// JSON-file backed storage.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage at the default location (`$PMS_HOME/storage.json`).
    pub fn open_default() -> Self {
        Self::new(paths::storage_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<FileEntries> {
        if !self.path.exists() {
            return Ok(FileEntries::new());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read storage from {}", self.path.display()))?;
        if contents.trim().is_empty() {
            return Ok(FileEntries::new());
        }

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse storage from {}", self.path.display()))
    }

    /// Loads entries for a write. A corrupt file is replaced rather than
    /// blocking the write.
    fn load_for_write(&self) -> FileEntries {
        match self.load() {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "discarding unreadable storage file: {err:#}"
                );
                FileEntries::new()
            }
        }
    }

    fn save(&self, entries: &FileEntries) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(entries).context("Failed to serialize storage")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }
}

impl SlotStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self.load()?.remove(key) {
            Some(serde_json::Value::String(value)) => Ok(Some(value)),
            Some(_) => {
                tracing::warn!(key, "ignoring non-string storage value");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.load_for_write();
        entries.insert(key.to_string(), serde_json::Value::String(value.to_string()));
        self.save(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let mut entries = self.load_for_write();
        entries.remove(key);
        self.save(&entries)
    }
}

/// In-process storage. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<Entries>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_entries<T>(&self, f: impl FnOnce(&mut Entries) -> T) -> T {
        let mut guard = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Returns true if `key` currently holds a value.
    pub fn contains(&self, key: &str) -> bool {
        self.with_entries(|entries| entries.contains_key(key))
    }
}

impl SlotStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.with_entries(|entries| entries.get(key).cloned()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.with_entries(|entries| entries.insert(key.to_string(), value.to_string()));
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.with_entries(|entries| entries.remove(key));
        Ok(())
    }
}
