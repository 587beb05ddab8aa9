//! File-backed store: all pairs live in one JSON object on disk.
//!
//! DESIGN
//! ======
//! Each call re-reads the file so separate processes sharing a path see each
//! other's writes. Writes land in a sibling temp file and are renamed over
//! the existing file, so a crash mid-write leaves the previous contents intact.
//!
//! TRADE-OFFS
//! ==========
//! The in-process lock serializes read-modify-write cycles within one
//! process only. Two processes writing at the same instant are
//! last-rename-wins, which matches browser storage semantics closely enough
//! for a single-user device.
//!
//! ERROR HANDLING
//! ==============
//! Reads report a corrupt file. Writes replace it with a fresh object and log
//! a warning, so a damaged file never locks the user out of login or logout.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, warn};

use super::{KeyValueStore, StorageError};

type Entries = BTreeMap<String, String>;

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Open a store at `path`. The file is created lazily on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Entries, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt(format!("{}: {e}", self.path.display())))
    }

    fn save(&self, entries: &Entries) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let body = serde_json::to_string_pretty(entries).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        let tmp = self.temp_path();
        fs::write(&tmp, body)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                debug!(path = %tmp.display(), error = %cleanup, "failed to remove temp file");
            }
            return Err(e.into());
        }
        debug!(path = %self.path.display(), keys = entries.len(), "storage file written");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(ToOwned::to_owned).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn update<F>(&self, f: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut Entries) -> bool,
    {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (mut entries, replaced) = match self.load() {
            Ok(entries) => (entries, false),
            Err(StorageError::Corrupt(reason)) => {
                warn!(path = %self.path.display(), %reason, "replacing corrupt storage file");
                (Entries::new(), true)
            }
            Err(e) => return Err(e),
        };
        if f(&mut entries) || replaced {
            self.save(&entries)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|entries| entries.remove(key).is_some())
    }
}

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;
