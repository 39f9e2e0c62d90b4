//! Browser Persistence
//!
//! `localStorage`-backed ports for the core: the history ledger under
//! [`HISTORY_KEY`] and the post-submission cooldown on browser timers.

use async_trait::async_trait;
use atmos::history::{decode_entries, encode_entries};
use atmos::{Cooldown, HistoryEntry, HistoryError, HistoryResult, HistoryStore, HISTORY_KEY};
use std::time::Duration;
use web_sys::Storage;

/// History ledger in `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> HistoryResult<Storage> {
        web_sys::window()
            .ok_or_else(|| HistoryError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(|e| HistoryError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| HistoryError::Unavailable("localStorage disabled".to_string()))
    }
}

impl HistoryStore for LocalStorageStore {
    fn load(&self) -> Vec<HistoryEntry> {
        let raw = match self.storage() {
            Ok(storage) => storage.get_item(HISTORY_KEY).ok().flatten(),
            Err(e) => {
                web_sys::console::warn_1(&format!("History unavailable: {}", e).into());
                None
            }
        };
        decode_entries(raw.as_deref())
    }

    fn save(&self, entries: &[HistoryEntry]) -> HistoryResult<()> {
        let encoded = encode_entries(entries)?;
        self.storage()?
            .set_item(HISTORY_KEY, &encoded)
            .map_err(|e| HistoryError::Unavailable(format!("{:?}", e)))
    }

    fn clear(&self) -> HistoryResult<()> {
        self.storage()?
            .remove_item(HISTORY_KEY)
            .map_err(|e| HistoryError::Unavailable(format!("{:?}", e)))
    }
}

/// Cooldown on `setTimeout`
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooCooldown;

#[async_trait(?Send)]
impl Cooldown for GlooCooldown {
    async fn wait(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atmos::{PredictionResult, Reading};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn entry(id: i64) -> HistoryEntry {
        let result = PredictionResult {
            aqi: 42.0,
            category: "Good".to_string(),
            health_advice: String::new(),
        };
        HistoryEntry::new(Reading::default(), &result, chrono::Local::now(), id)
    }

    #[wasm_bindgen_test]
    fn test_local_storage_roundtrip_and_clear() {
        let store = LocalStorageStore::new();
        store.save(&[entry(2), entry(1)]).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, 2);

        store.clear().unwrap();
        assert!(store.load().is_empty());

        let raw = store.storage().unwrap().get_item(HISTORY_KEY).unwrap();
        assert!(raw.is_none());
    }

    #[wasm_bindgen_test]
    fn test_corrupt_value_loads_empty() {
        let store = LocalStorageStore::new();
        store
            .storage()
            .unwrap()
            .set_item(HISTORY_KEY, "{not json")
            .unwrap();

        assert!(store.load().is_empty());
        store.clear().unwrap();
    }
}
