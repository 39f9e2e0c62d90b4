//! JSON file history store
//!
//! The command-line equivalent of the browser's local storage key: one file
//! named after [`HISTORY_KEY`] inside the data directory. Removing the key
//! removes the file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{decode_entries, encode_entries, HistoryEntry, HistoryStore, HISTORY_KEY};
use crate::error::HistoryResult;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store inside `data_dir`; the directory is created on first save
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(format!("{}.json", HISTORY_KEY)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_raw(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Some(raw),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "Failed to read history file");
                None
            }
        }
    }
}

impl HistoryStore for JsonFileStore {
    fn load(&self) -> Vec<HistoryEntry> {
        decode_entries(self.read_raw().as_deref())
    }

    fn save(&self, entries: &[HistoryEntry]) -> HistoryResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Write-then-rename so a crash never leaves a half-written ledger
        let encoded = encode_entries(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, encoded)?;
        std::fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = ?self.path, entries = entries.len(), "History saved");
        Ok(())
    }

    fn clear(&self) -> HistoryResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
