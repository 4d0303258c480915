//! Persistent storage for the usage record.

use super::types::{StorageError, UsageRecord};
use crate::paths;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Backend holding at most one [`UsageRecord`].
///
/// Writes overwrite the previous record. No locking is performed across
/// processes; the last writer wins.
pub trait UsageStore {
    /// Makes sure the backend can be read from and written to.
    fn ensure_ready(&self) -> Result<(), StorageError>;

    /// Loads the stored record. `Ok(None)` means nothing has been stored yet.
    fn load(&self) -> Result<Option<UsageRecord>, StorageError>;

    /// Replaces the stored record.
    fn save(&self, record: &UsageRecord) -> Result<(), StorageError>;
}

/// Directory-backed store writing `<dir>/usage.json`.
#[derive(Debug, Clone)]
pub struct FileUsageStore {
    /// `None` when no directory could be resolved at startup.
    dir: Option<PathBuf>,
}

impl FileUsageStore {
    /// Creates a store rooted at `dir`. The directory is created on first use.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// Resolves the directory from an optional override, falling back to the
    /// home directory. If neither is available the store stays usable but
    /// every operation reports [`StorageError::Unavailable`].
    pub fn resolve(override_dir: Option<&Path>) -> Self {
        match paths::resolve_usage_dir(override_dir) {
            Ok(dir) => Self::new(dir),
            Err(e) => {
                tracing::warn!("Usage storage disabled: {:#}", e);
                Self { dir: None }
            }
        }
    }

    /// The storage directory, if one was resolved.
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    fn dir_or_unavailable(&self) -> Result<&Path, StorageError> {
        self.dir
            .as_deref()
            .ok_or_else(|| StorageError::Unavailable("no usage directory".to_string()))
    }
}

impl UsageStore for FileUsageStore {
    fn ensure_ready(&self) -> Result<(), StorageError> {
        let dir = self.dir_or_unavailable()?;
        paths::ensure_dir(dir).map_err(|source| StorageError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })
    }

    fn load(&self) -> Result<Option<UsageRecord>, StorageError> {
        let path = paths::usage_file_path(self.dir_or_unavailable()?);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StorageError::Read { path, source }),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| StorageError::Parse { path, source })
    }

    fn save(&self, record: &UsageRecord) -> Result<(), StorageError> {
        let path = paths::usage_file_path(self.dir_or_unavailable()?);
        let content = serde_json::to_string_pretty(record).map_err(StorageError::Serialize)?;
        std::fs::write(&path, content).map_err(|source| StorageError::Write { path, source })
    }
}

/// In-process store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryUsageStore {
    record: Mutex<Option<UsageRecord>>,
}

impl MemoryUsageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `record`.
    pub fn with_record(record: UsageRecord) -> Self {
        Self {
            record: Mutex::new(Some(record)),
        }
    }

    /// Returns a copy of the stored record.
    pub fn snapshot(&self) -> Option<UsageRecord> {
        self.record.lock().ok().and_then(|guard| guard.clone())
    }
}

impl UsageStore for MemoryUsageStore {
    fn ensure_ready(&self) -> Result<(), StorageError> {
        Ok(())
    }

    fn load(&self) -> Result<Option<UsageRecord>, StorageError> {
        self.record
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| StorageError::Unavailable("usage store lock poisoned".to_string()))
    }

    fn save(&self, record: &UsageRecord) -> Result<(), StorageError> {
        let mut guard = self
            .record
            .lock()
            .map_err(|_| StorageError::Unavailable("usage store lock poisoned".to_string()))?;
        *guard = Some(record.clone());
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
