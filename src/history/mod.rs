//! Prediction History
//!
//! A bounded, newest-first ledger of past predictions:
//!
//! - **History**: the in-memory ledger with dedup and capacity rules
//! - **HistoryStore**: persistence port (`load`/`save`/`clear`)
//! - **memory**: in-process store
//! - **file**: JSON file store for the command line (native only)
//!
//! # Persisted format
//!
//! ```text
//! aqi_history = [{date, aqi, category, data: {pm25, ...}, id}, ...]   // newest first, <= 10
//! ```

pub mod memory;

#[cfg(feature = "native")]
pub mod file;

pub use memory::MemoryStore;

#[cfg(feature = "native")]
pub use file::JsonFileStore;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::HistoryResult;
use crate::prediction::PredictionResult;
use crate::reading::Reading;

/// Key the ledger is persisted under
pub const HISTORY_KEY: &str = "aqi_history";

/// Maximum number of entries kept
pub const HISTORY_CAPACITY: usize = 10;

/// Scores closer than this are considered the same prediction
pub const DEDUP_TOLERANCE: f64 = 0.01;

/// Slack for binary rounding: `155.01 - 155.0` is `0.00999999999999`
const SCORE_EPSILON: f64 = 1e-9;

/// One recorded prediction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    /// Local time label, e.g. `3:04:05 PM`
    pub date: String,
    pub aqi: f64,
    pub category: String,
    /// The reading that produced this score
    pub data: Reading,
    /// Insertion time in epoch milliseconds, unique within the ledger
    pub id: i64,
}

impl HistoryEntry {
    pub fn new(reading: Reading, result: &PredictionResult, at: DateTime<Local>, id: i64) -> Self {
        Self {
            date: at.format("%-I:%M:%S %p").to_string(),
            aqi: result.aqi,
            category: result.category.clone(),
            data: reading,
            id,
        }
    }
}

/// Newest-first ledger, never longer than [`HISTORY_CAPACITY`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap stored entries, dropping anything past capacity
    pub fn from_entries(mut entries: Vec<HistoryEntry>) -> Self {
        entries.truncate(HISTORY_CAPACITY);
        Self { entries }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<HistoryEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    /// Whether a new prediction repeats the most recent one.
    ///
    /// Only index 0 is compared: same reading field-for-field and a score
    /// within [`DEDUP_TOLERANCE`]. A decimal difference of exactly the
    /// tolerance counts as a new score.
    pub fn is_duplicate(&self, reading: &Reading, aqi: f64) -> bool {
        self.latest()
            .map(|last| {
                last.data == *reading && (last.aqi - aqi).abs() < DEDUP_TOLERANCE - SCORE_EPSILON
            })
            .unwrap_or(false)
    }

    /// Build the entry for a new prediction.
    ///
    /// The id is the timestamp in milliseconds, bumped past the newest id so
    /// two inserts in the same millisecond stay distinct.
    pub fn next_entry(
        &self,
        reading: Reading,
        result: &PredictionResult,
        at: DateTime<Local>,
    ) -> HistoryEntry {
        let millis = at.timestamp_millis();
        let id = match self.latest() {
            Some(last) if last.id >= millis => last.id + 1,
            _ => millis,
        };
        HistoryEntry::new(reading, result, at, id)
    }

    /// Record a prediction. Returns `false` when it was suppressed as a
    /// duplicate.
    pub fn record(
        &mut self,
        reading: Reading,
        result: &PredictionResult,
        at: DateTime<Local>,
    ) -> bool {
        if self.is_duplicate(&reading, result.aqi) {
            tracing::debug!(aqi = result.aqi, "Skipping duplicate history entry");
            return false;
        }

        let entry = self.next_entry(reading, result, at);
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAPACITY);
        true
    }

    pub fn summary(&self) -> HistorySummary {
        HistorySummary::from_entries(&self.entries)
    }
}

/// Aggregate figures shown above the dashboard table
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HistorySummary {
    pub total_scans: usize,
    pub average_aqi: f64,
}

impl HistorySummary {
    pub fn from_entries(entries: &[HistoryEntry]) -> Self {
        if entries.is_empty() {
            return Self::default();
        }
        let sum: f64 = entries.iter().map(|e| e.aqi).sum();
        Self {
            total_scans: entries.len(),
            average_aqi: sum / entries.len() as f64,
        }
    }

    /// Average with one decimal, `0.0` when empty
    pub fn average_text(&self) -> String {
        format!("{:.1}", self.average_aqi)
    }
}

/// Persistence port for the ledger.
///
/// `load` never fails: a missing key or unreadable content is an empty
/// history. `clear` removes the key itself rather than storing `[]`.
pub trait HistoryStore {
    fn load(&self) -> Vec<HistoryEntry>;

    fn save(&self, entries: &[HistoryEntry]) -> HistoryResult<()>;

    fn clear(&self) -> HistoryResult<()>;
}

/// Decode a persisted value, recovering from corruption with an empty ledger
pub fn decode_entries(raw: Option<&str>) -> Vec<HistoryEntry> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<HistoryEntry>>(raw) {
        Ok(mut entries) => {
            entries.truncate(HISTORY_CAPACITY);
            entries
        }
        Err(e) => {
            tracing::warn!(error = %e, "Stored history is unreadable, starting empty");
            Vec::new()
        }
    }
}

/// Encode entries for persistence
pub fn encode_entries(entries: &[HistoryEntry]) -> HistoryResult<String> {
    Ok(serde_json::to_string(entries)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reading(pm25: f64) -> Reading {
        Reading {
            pm25,
            pm10: 80.0,
            no2: 30.0,
            so2: 10.0,
            co: 1.2,
            o3: 40.0,
        }
    }

    fn result(aqi: f64) -> PredictionResult {
        PredictionResult {
            aqi,
            category: "Moderate".to_string(),
            health_advice: "Take care".to_string(),
        }
    }

    fn at(secs: i64) -> DateTime<Local> {
        Local.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_record_prepends_newest_first() {
        let mut history = History::new();
        assert!(history.record(reading(1.0), &result(10.0), at(0)));
        assert!(history.record(reading(2.0), &result(20.0), at(1)));

        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().unwrap().aqi, 20.0);
        assert_eq!(history.entries()[1].aqi, 10.0);
    }

    #[test]
    fn test_duplicate_is_suppressed() {
        let mut history = History::new();
        history.record(reading(120.0), &result(155.0), at(0));

        assert!(!history.record(reading(120.0), &result(155.005), at(1)));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_same_reading_different_score_is_recorded() {
        let mut history = History::new();
        history.record(reading(120.0), &result(155.0), at(0));

        assert!(history.record(reading(120.0), &result(155.01), at(1)));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_tolerance_boundary_at_low_scores() {
        let mut history = History::new();
        history.record(reading(20.0), &result(50.0), at(0));

        assert!(history.record(reading(20.0), &result(50.01), at(1)));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_just_under_tolerance_is_suppressed() {
        let mut history = History::new();
        history.record(reading(120.0), &result(155.0), at(0));

        assert!(!history.record(reading(120.0), &result(155.0099), at(1)));
        assert!(!history.record(reading(120.0), &result(154.9901), at(2)));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_same_score_different_reading_is_recorded() {
        let mut history = History::new();
        history.record(reading(120.0), &result(155.0), at(0));

        assert!(history.record(reading(121.0), &result(155.0), at(1)));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_dedup_only_checks_latest() {
        let mut history = History::new();
        history.record(reading(1.0), &result(10.0), at(0));
        history.record(reading(2.0), &result(20.0), at(1));

        // Matches index 1, not index 0
        assert!(history.record(reading(1.0), &result(10.0), at(2)));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_capacity_is_enforced() {
        let mut history = History::new();
        for i in 0..15 {
            history.record(reading(i as f64), &result(i as f64), at(i));
            assert_eq!(history.len(), (i as usize + 1).min(HISTORY_CAPACITY));
        }

        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.latest().unwrap().aqi, 14.0);
        assert_eq!(history.entries().last().unwrap().aqi, 5.0);
    }

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let mut history = History::new();
        history.record(reading(1.0), &result(1.0), at(0));
        history.record(reading(2.0), &result(2.0), at(0));
        history.record(reading(3.0), &result(3.0), at(0));

        let ids: Vec<i64> = history.entries().iter().map(|e| e.id).collect();
        assert!(ids[0] > ids[1] && ids[1] > ids[2]);
    }

    #[test]
    fn test_entry_date_label() {
        let at = Local.with_ymd_and_hms(2024, 3, 1, 15, 4, 5).unwrap();
        let entry = HistoryEntry::new(reading(1.0), &result(1.0), at, 1);
        assert_eq!(entry.date, "3:04:05 PM");
    }

    #[test]
    fn test_decode_corrupt_is_empty() {
        assert!(decode_entries(None).is_empty());
        assert!(decode_entries(Some("not json")).is_empty());
        assert!(decode_entries(Some(r#"{"date": 1}"#)).is_empty());
    }

    #[test]
    fn test_decode_stored_format() {
        let raw = r#"[{"date":"3:04:05 PM","aqi":155,"category":"Unhealthy",
            "data":{"pm25":120,"pm10":80,"no2":30,"so2":10,"co":1.2,"o3":40},"id":1709301845000}]"#;
        let entries = decode_entries(Some(raw));

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].aqi, 155.0);
        assert_eq!(entries[0].data, reading(120.0));
    }

    #[test]
    fn test_summary() {
        let mut history = History::new();
        assert_eq!(history.summary(), HistorySummary::default());
        assert_eq!(history.summary().average_text(), "0.0");

        history.record(reading(1.0), &result(100.0), at(0));
        history.record(reading(2.0), &result(151.0), at(1));

        let summary = history.summary();
        assert_eq!(summary.total_scans, 2);
        assert_eq!(summary.average_text(), "125.5");
    }
}
