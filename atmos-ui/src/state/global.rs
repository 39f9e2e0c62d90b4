//! Global Application State
//!
//! Reactive state management using Leptos signals. [`GlobalState`] is also
//! the browser's [`Presenter`]: the core controller and dashboard write to
//! these signals and the components render from them.

use atmos::{ChartSnapshot, HistoryEntry, HistorySummary, Presenter, ResultView};
use leptos::*;
use wasm_bindgen::{JsCast, JsValue};

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// A prediction request is in flight
    pub busy: RwSignal<bool>,
    /// Alert region text, hidden when `None`
    pub error: RwSignal<Option<String>>,
    /// Latest result card, hidden when `None`
    pub result: RwSignal<Option<ResultView>>,
    /// Empty-state placeholder next to the form
    pub placeholder_visible: RwSignal<bool>,
    /// History table rows, newest first
    pub history: RwSignal<Vec<HistoryEntry>>,
    /// Pollutant snapshot of the latest entry
    pub chart: RwSignal<Option<ChartSnapshot>>,
    /// Total scans and average score
    pub summary: RwSignal<HistorySummary>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        busy: create_rw_signal(false),
        error: create_rw_signal(None),
        result: create_rw_signal(None),
        placeholder_visible: create_rw_signal(true),
        history: create_rw_signal(Vec::new()),
        chart: create_rw_signal(None),
        summary: create_rw_signal(HistorySummary::default()),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Clear error message
    pub fn clear_error(&self) {
        self.error.set(None);
    }
}

impl Presenter for GlobalState {
    fn begin_submission(&self) {
        self.busy.set(true);
        self.error.set(None);
        self.result.set(None);
        self.placeholder_visible.set(false);
    }

    fn end_submission(&self) {
        self.busy.set(false);
    }

    fn show_result(&self, view: &ResultView) {
        self.result.set(Some(view.clone()));
        refresh_scroll_reveal();
    }

    fn show_error(&self, message: &str) {
        web_sys::console::error_1(&message.into());
        self.error.set(Some(message.to_string()));
        self.placeholder_visible.set(true);
    }

    fn show_history(&self, entries: &[HistoryEntry]) {
        if entries.is_empty() {
            self.chart.set(None);
        }
        self.history.set(entries.to_vec());
    }

    fn show_chart(&self, snapshot: &ChartSnapshot) {
        self.chart.set(Some(snapshot.clone()));
    }

    fn show_summary(&self, summary: &HistorySummary) {
        self.summary.set(*summary);
    }

    fn confirm(&self, prompt: &str) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(prompt).ok())
            .unwrap_or(false)
    }
}

/// Ask the page's scroll-reveal library (`window.AOS`) to pick up the newly
/// shown card. Absent library is a no-op.
fn refresh_scroll_reveal() {
    let Some(window) = web_sys::window() else {
        return;
    };

    let aos = match js_sys::Reflect::get(&window, &JsValue::from_str("AOS")) {
        Ok(aos) if aos.is_object() => aos,
        _ => return,
    };

    let refresh = js_sys::Reflect::get(&aos, &JsValue::from_str("refresh"))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok());

    if let Some(refresh) = refresh {
        if let Err(e) = refresh.call0(&aos) {
            web_sys::console::warn_1(&format!("AOS refresh failed: {:?}", e).into());
        }
    }
}
