//! Presentation port
//!
//! Everything the controller and dashboard need from a UI. The browser
//! front end implements it with reactive signals, the CLI with stdout.

use crate::history::{HistoryEntry, HistorySummary};
use crate::reading::{Reading, POLLUTANT_LABELS};
use crate::tier::ResultView;

/// Row shown when the ledger is empty
pub const EMPTY_HISTORY_MESSAGE: &str = "No predictions recorded yet.";

/// Question asked before the ledger is wiped
pub const CLEAR_HISTORY_PROMPT: &str = "Are you sure you want to clear your prediction history?";

/// Bar fill colours, one per pollutant
pub const CHART_COLORS: [&str; 6] = [
    "rgba(0, 210, 255, 0.5)",
    "rgba(57, 255, 20, 0.5)",
    "rgba(250, 204, 21, 0.5)",
    "rgba(251, 146, 60, 0.5)",
    "rgba(239, 68, 68, 0.5)",
    "rgba(124, 58, 237, 0.5)",
];

pub trait Presenter {
    /// A request is about to go out: disable the submit control, show the
    /// busy indicator, hide the previous error, result and placeholder.
    fn begin_submission(&self);

    /// The request finished either way: hide the busy indicator and restore
    /// the submit control.
    fn end_submission(&self);

    /// Show the result panel styled for the result's tier
    fn show_result(&self, view: &ResultView);

    /// Show the alert region and bring back the empty-state placeholder
    fn show_error(&self, message: &str);

    /// Render the history table, newest first. Empty means a single
    /// [`EMPTY_HISTORY_MESSAGE`] row.
    fn show_history(&self, entries: &[HistoryEntry]);

    /// Render the pollutant bar chart. Presenters without a chart mount
    /// point ignore it.
    fn show_chart(&self, snapshot: &ChartSnapshot);

    /// Update the total-scans and average-score figures
    fn show_summary(&self, summary: &HistorySummary);

    /// Blocking yes/no confirmation
    fn confirm(&self, prompt: &str) -> bool;
}

/// Bar chart of a single reading. A snapshot, not a time series.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSnapshot {
    pub bars: Vec<ChartBar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub label: &'static str,
    pub value: f64,
    pub color: &'static str,
}

impl ChartSnapshot {
    pub fn from_reading(reading: &Reading) -> Self {
        let bars = POLLUTANT_LABELS
            .into_iter()
            .zip(reading.values())
            .zip(CHART_COLORS)
            .map(|((label, value), color)| ChartBar {
                label,
                value,
                color,
            })
            .collect();
        Self { bars }
    }

    /// Largest bar value, used to scale the y axis (never below zero)
    pub fn max_value(&self) -> f64 {
        self.bars.iter().map(|b| b.value).fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_from_reading() {
        let reading = Reading {
            pm25: 120.0,
            pm10: 80.0,
            no2: 30.0,
            so2: 10.0,
            co: 1.2,
            o3: 40.0,
        };
        let snapshot = ChartSnapshot::from_reading(&reading);

        assert_eq!(snapshot.bars.len(), 6);
        assert_eq!(snapshot.bars[0].label, "PM2.5");
        assert_eq!(snapshot.bars[0].value, 120.0);
        assert_eq!(snapshot.bars[4].label, "CO");
        assert_eq!(snapshot.bars[4].value, 1.2);
        assert_eq!(snapshot.max_value(), 120.0);
    }

    #[test]
    fn test_max_value_of_zero_reading() {
        let snapshot = ChartSnapshot::from_reading(&Reading::default());
        assert_eq!(snapshot.max_value(), 0.0);
    }
}
