//! In-process history store
//!
//! Keeps the serialized ledger in memory, byte-for-byte what a persistent
//! store would hold, so corruption and key removal behave the same way.

use std::cell::RefCell;

use super::{decode_entries, encode_entries, HistoryEntry, HistoryStore};
use crate::error::HistoryResult;

#[derive(Debug, Default)]
pub struct MemoryStore {
    raw: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already-serialized value
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: RefCell::new(Some(raw.into())),
        }
    }

    /// The stored value, `None` once the key has been removed
    pub fn raw(&self) -> Option<String> {
        self.raw.borrow().clone()
    }
}

impl HistoryStore for MemoryStore {
    fn load(&self) -> Vec<HistoryEntry> {
        decode_entries(self.raw.borrow().as_deref())
    }

    fn save(&self, entries: &[HistoryEntry]) -> HistoryResult<()> {
        let encoded = encode_entries(entries)?;
        *self.raw.borrow_mut() = Some(encoded);
        Ok(())
    }

    fn clear(&self) -> HistoryResult<()> {
        self.raw.borrow_mut().take();
        Ok(())
    }
}
