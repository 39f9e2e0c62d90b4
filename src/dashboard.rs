//! Dashboard
//!
//! Page-load rendering of the history ledger and the confirmed clear
//! action. Reads only from the history store.

use std::rc::Rc;

use crate::error::HistoryResult;
use crate::history::{HistoryStore, HistorySummary};
use crate::presenter::{ChartSnapshot, Presenter, CLEAR_HISTORY_PROMPT};

pub struct Dashboard {
    store: Rc<dyn HistoryStore>,
    presenter: Rc<dyn Presenter>,
}

impl Dashboard {
    pub fn new(store: Rc<dyn HistoryStore>, presenter: Rc<dyn Presenter>) -> Self {
        Self { store, presenter }
    }

    /// Render table, summary and (when there is data) the snapshot chart of
    /// the most recent reading.
    pub fn init(&self) {
        let entries = self.store.load();
        tracing::debug!(entries = entries.len(), "Initializing dashboard");

        self.presenter.show_history(&entries);
        self.presenter
            .show_summary(&HistorySummary::from_entries(&entries));

        if let Some(latest) = entries.first() {
            self.presenter
                .show_chart(&ChartSnapshot::from_reading(&latest.data));
        }
    }

    /// Wipe the ledger after confirmation. Returns whether it was cleared.
    pub fn clear_history(&self) -> HistoryResult<bool> {
        if !self.presenter.confirm(CLEAR_HISTORY_PROMPT) {
            return Ok(false);
        }

        self.store.clear()?;
        tracing::info!("Prediction history cleared");

        self.init();
        self.presenter.show_summary(&HistorySummary::default());
        Ok(true)
    }
}
