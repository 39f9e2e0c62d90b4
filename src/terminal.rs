//! Terminal presenter
//!
//! Plain-text rendering of results, errors, the history table and a
//! horizontal bar chart for the command line.

use std::cell::RefCell;
use std::io::{BufRead, Write};

use crate::history::{HistoryEntry, HistorySummary};
use crate::presenter::{ChartSnapshot, Presenter, EMPTY_HISTORY_MESSAGE};
use crate::tier::{format_score, ResultView};

/// Width of the longest bar in the snapshot chart
const CHART_WIDTH: usize = 40;

pub struct TerminalPresenter {
    out: RefCell<Box<dyn Write>>,
    input: RefCell<Box<dyn BufRead>>,
    assume_yes: bool,
}

impl TerminalPresenter {
    /// Presenter on stdout/stdin
    pub fn new() -> Self {
        Self::with_io(
            Box::new(std::io::stdout()),
            Box::new(std::io::BufReader::new(std::io::stdin())),
        )
    }

    pub fn with_io(out: Box<dyn Write>, input: Box<dyn BufRead>) -> Self {
        Self {
            out: RefCell::new(out),
            input: RefCell::new(input),
            assume_yes: false,
        }
    }

    /// Answer every confirmation with yes
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    fn write(&self, text: &str) {
        let mut out = self.out.borrow_mut();
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            tracing::warn!(error = %e, "Failed to write to terminal");
        }
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for TerminalPresenter {
    fn begin_submission(&self) {
        self.write("Processing...\n");
    }

    fn end_submission(&self) {}

    fn show_result(&self, view: &ResultView) {
        let text = format!(
            "\nAQI {}  [{}]\nCategory: {}\nAdvice:   {}\n",
            view.score_text(),
            view.tier.label(),
            view.category,
            view.health_advice,
        );
        self.write(&text);
    }

    fn show_error(&self, message: &str) {
        self.write(&format!("{}\n", message));
    }

    fn show_history(&self, entries: &[HistoryEntry]) {
        self.write(&render_history_table(entries));
    }

    fn show_chart(&self, snapshot: &ChartSnapshot) {
        self.write(&render_chart(snapshot));
    }

    fn show_summary(&self, summary: &HistorySummary) {
        self.write(&format!(
            "Total scans: {}    Average AQI: {}\n",
            summary.total_scans,
            summary.average_text()
        ));
    }

    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        self.write(&format!("{} [y/N] ", prompt));

        let mut line = String::new();
        match self.input.borrow_mut().read_line(&mut line) {
            Ok(_) => matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read confirmation");
                false
            }
        }
    }
}

/// Table of `Time | AQI | Category`, newest first
pub fn render_history_table(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return format!("{}\n", EMPTY_HISTORY_MESSAGE);
    }

    let mut out = format!("{:<12} {:>8}  {}\n", "TIME", "AQI", "CATEGORY");
    out.push_str(&format!("{}\n", "-".repeat(40)));
    for entry in entries {
        out.push_str(&format!(
            "{:<12} {:>8}  {}\n",
            entry.date,
            format_score(entry.aqi),
            entry.category
        ));
    }
    out
}

/// Horizontal bar chart scaled to the largest value
pub fn render_chart(snapshot: &ChartSnapshot) -> String {
    let max = snapshot.max_value();
    let mut out = String::from("\nPollutant Concentration (latest reading)\n");

    for bar in &snapshot.bars {
        let len = if max > 0.0 && bar.value > 0.0 {
            ((bar.value / max) * CHART_WIDTH as f64).round().max(1.0) as usize
        } else {
            0
        };
        out.push_str(&format!(
            "{:<6} {:<width$} {}\n",
            bar.label,
            "#".repeat(len),
            bar.value,
            width = CHART_WIDTH
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::Reading;
    use crate::tier::Tier;
    use std::rc::Rc;

    /// Writer that keeps its bytes readable after being boxed
    #[derive(Clone, Default)]
    struct SharedBuf(Rc<RefCell<Vec<u8>>>);

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn presenter(input: &str) -> (TerminalPresenter, SharedBuf) {
        let buf = SharedBuf::default();
        let presenter = TerminalPresenter::with_io(
            Box::new(buf.clone()),
            Box::new(std::io::Cursor::new(input.as_bytes().to_vec())),
        );
        (presenter, buf)
    }

    fn entry(aqi: f64, category: &str) -> HistoryEntry {
        HistoryEntry {
            date: "3:04:05 PM".to_string(),
            aqi,
            category: category.to_string(),
            data: Reading::default(),
            id: 1,
        }
    }

    #[test]
    fn test_show_result() {
        let (presenter, buf) = presenter("");
        presenter.show_result(&ResultView {
            aqi: 155.0,
            category: "Unhealthy".to_string(),
            health_advice: "Limit outdoor exertion".to_string(),
            tier: Tier::Moderate,
        });

        let text = buf.text();
        assert!(text.contains("AQI 155  [Moderate]"));
        assert!(text.contains("Limit outdoor exertion"));
    }

    #[test]
    fn test_empty_history_table() {
        assert_eq!(
            render_history_table(&[]),
            "No predictions recorded yet.\n"
        );
    }

    #[test]
    fn test_history_table_rows_in_order() {
        let table = render_history_table(&[entry(155.0, "Unhealthy"), entry(42.5, "Good")]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[2].contains("155") && lines[2].contains("Unhealthy"));
        assert!(lines[3].contains("42.5") && lines[3].contains("Good"));
    }

    #[test]
    fn test_chart_scales_to_largest_bar() {
        let snapshot = ChartSnapshot::from_reading(&Reading {
            pm25: 100.0,
            pm10: 50.0,
            ..Reading::default()
        });
        let chart = render_chart(&snapshot);

        let pm25 = chart.lines().find(|l| l.starts_with("PM2.5")).unwrap();
        let pm10 = chart.lines().find(|l| l.starts_with("PM10")).unwrap();
        let no2 = chart.lines().find(|l| l.starts_with("NO2")).unwrap();
        assert_eq!(pm25.matches('#').count(), CHART_WIDTH);
        assert_eq!(pm10.matches('#').count(), CHART_WIDTH / 2);
        assert_eq!(no2.matches('#').count(), 0);
    }

    #[test]
    fn test_confirm_reads_answer() {
        let (yes, _) = presenter("y\n");
        assert!(yes.confirm("Clear?"));

        let (no, buf) = presenter("\n");
        assert!(!no.confirm("Clear?"));
        assert!(buf.text().contains("Clear? [y/N]"));

        let (assumed, _) = presenter("");
        assert!(assumed.assume_yes(true).confirm("Clear?"));
    }
}
