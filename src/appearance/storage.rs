//! Key-value persistence for settings records.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::AppError;

/// Durable per-user storage of named settings records.
pub trait SettingsStorage: Send + Sync {
    /// Read the payload stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Replace the payload stored under `key`.
    fn save(&self, key: &str, payload: &str) -> Result<(), AppError>;
}

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SettingsStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, AppError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, payload: &str) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // Write then rename so a crash never leaves a half-written record.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-process storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    records: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, AppError> {
        let records = self
            .records
            .lock()
            .map_err(|_| AppError::Settings("memory storage poisoned".to_string()))?;
        Ok(records.get(key).cloned())
    }

    fn save(&self, key: &str, payload: &str) -> Result<(), AppError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| AppError::Settings("memory storage poisoned".to_string()))?;
        records.insert(key.to_string(), payload.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_shared() {
        let storage = MemoryStorage::new();
        let other = storage.clone();
        assert_eq!(storage.load("k").unwrap(), None);
        storage.save("k", "v").unwrap();
        assert_eq!(other.load("k").unwrap().as_deref(), Some("v"));
    }
}
