//! History export
//!
//! Flattens the ledger to JSON or CSV for the `history` command.

use serde::Serialize;
use std::str::FromStr;

use crate::error::{HistoryError, HistoryResult};
use crate::history::HistoryEntry;

/// Output format for the history listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Table,
    Json,
    Csv,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(ExportFormat::Table),
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!("Unknown format '{}' (expected table, json or csv)", other)),
        }
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    id: i64,
    date: &'a str,
    aqi: f64,
    category: &'a str,
    pm25: f64,
    pm10: f64,
    no2: f64,
    so2: f64,
    co: f64,
    o3: f64,
}

impl<'a> From<&'a HistoryEntry> for CsvRow<'a> {
    fn from(entry: &'a HistoryEntry) -> Self {
        Self {
            id: entry.id,
            date: &entry.date,
            aqi: entry.aqi,
            category: &entry.category,
            pm25: entry.data.pm25,
            pm10: entry.data.pm10,
            no2: entry.data.no2,
            so2: entry.data.so2,
            co: entry.data.co,
            o3: entry.data.o3,
        }
    }
}

/// Pretty JSON in the persisted shape
pub fn to_json(entries: &[HistoryEntry]) -> HistoryResult<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// One CSV row per entry with the reading flattened into columns
pub fn to_csv(entries: &[HistoryEntry]) -> HistoryResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for entry in entries {
        writer
            .serialize(CsvRow::from(entry))
            .map_err(|e| HistoryError::Serialization(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| HistoryError::Serialization(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| HistoryError::Serialization(e.to_string()))
}
