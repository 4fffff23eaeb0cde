//! File-backed durable store
//!
//! All keys live in one JSON object (`local-storage.json`). Every write
//! rewrites the whole file through a temp file in the same directory, so a
//! crash never leaves a half-written document behind.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::KeyValueStore;
use crate::error::StorageError;

/// File name of the durable store inside the data directory
pub const STORE_FILE: &str = "local-storage.json";

/// Durable key/value store persisted as a JSON object
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store rooted in `data_dir`; the directory is created on first write
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(STORE_FILE))
    }

    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self, key: &str) -> Result<BTreeMap<String, String>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StorageError::unavailable(key, e)),
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| StorageError::corrupt(key, e))
    }

    fn write_all(&self, key: &str, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|e| StorageError::unavailable(key, e))?;

        let json = serde_json::to_string_pretty(values).map_err(|e| StorageError::corrupt(key, e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StorageError::unavailable(key, e))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| StorageError::unavailable(key, e))?;
        tmp.persist(&self.path)
            .map_err(|e| StorageError::unavailable(key, e.error))?;

        log::debug!("Wrote key '{}' to {}", key, self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all(key)?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = match self.read_all(key) {
            Ok(values) => values,
            Err(StorageError::Corrupt { reason, .. }) => {
                log::warn!(
                    "Durable store {} is unreadable ({}), starting fresh",
                    self.path.display(),
                    reason
                );
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };

        values.insert(key.to_string(), value.to_string());
        self.write_all(key, &values)
    }
}
