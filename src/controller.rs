//! Submission Controller
//!
//! Orchestrates one prediction request end to end:
//!
//! ```text
//! form → Reading → POST /predict → interpret → history (dedup) → show_result
//!                                           ↘ any failure → show_error
//! ```
//!
//! # Guard
//!
//! Each controller owns a [`SubmitState`]. It is checked and set before the
//! first `.await`, so on a single-threaded executor a second submission can
//! never slip in while one is in flight. After completion the controller
//! cools down for [`ControllerConfig::cooldown`] before accepting the next
//! submission.

use async_trait::async_trait;
use chrono::Local;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::error::SubmitError;
use crate::history::{History, HistoryStore};
use crate::prediction::{interpret_response, PredictionApi, PredictionResult};
use crate::presenter::Presenter;
use crate::reading::{FormInput, Reading};
use crate::tier::ResultView;

/// Default delay before the guard re-opens
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(500);

/// Where a controller is in its submission cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    InFlight,
    CoolingDown,
}

/// What happened to a call to [`SubmissionController::submit`]
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Another submission was in flight or cooling down; nothing was sent
    Ignored,
    /// The service scored the reading
    Completed {
        view: ResultView,
        /// Whether a new history entry was written
        recorded: bool,
    },
    /// The attempt failed and the error panel was shown
    Failed(SubmitError),
}

/// Controller settings
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub cooldown: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            cooldown: DEFAULT_COOLDOWN,
        }
    }
}

/// Waits out the cooldown. Runtime-specific: tokio natively, browser timers
/// in WebAssembly.
#[async_trait(?Send)]
pub trait Cooldown {
    async fn wait(&self, duration: Duration);
}

/// Cooldown that returns immediately
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCooldown;

#[async_trait(?Send)]
impl Cooldown for NoCooldown {
    async fn wait(&self, _duration: Duration) {}
}

/// Cooldown backed by `tokio::time::sleep`
#[cfg(feature = "native")]
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioCooldown;

#[cfg(feature = "native")]
#[async_trait(?Send)]
impl Cooldown for TokioCooldown {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

pub struct SubmissionController {
    api: Rc<dyn PredictionApi>,
    store: Rc<dyn HistoryStore>,
    presenter: Rc<dyn Presenter>,
    cooldown: Rc<dyn Cooldown>,
    config: ControllerConfig,
    state: Cell<SubmitState>,
}

/// Returns the controller to `Idle` however the submission ends. While
/// armed with a presenter it also restores the submit control, so a
/// submission future dropped mid-request does not leave the UI busy.
struct StateGuard<'a> {
    state: &'a Cell<SubmitState>,
    presenter: Option<&'a dyn Presenter>,
}

impl StateGuard<'_> {
    /// Call `end_submission` once, if still armed
    fn finish(&mut self) {
        if let Some(presenter) = self.presenter.take() {
            presenter.end_submission();
        }
    }
}

impl Drop for StateGuard<'_> {
    fn drop(&mut self) {
        self.finish();
        self.state.set(SubmitState::Idle);
    }
}

impl SubmissionController {
    pub fn new(
        api: Rc<dyn PredictionApi>,
        store: Rc<dyn HistoryStore>,
        presenter: Rc<dyn Presenter>,
        cooldown: Rc<dyn Cooldown>,
        config: ControllerConfig,
    ) -> Self {
        Self {
            api,
            store,
            presenter,
            cooldown,
            config,
            state: Cell::new(SubmitState::Idle),
        }
    }

    pub fn state(&self) -> SubmitState {
        self.state.get()
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Handle one form submission.
    ///
    /// Never returns an error: failures are shown through the presenter and
    /// reported as [`SubmitOutcome::Failed`].
    pub async fn submit(&self, form: &FormInput) -> SubmitOutcome {
        if self.state.get() != SubmitState::Idle {
            tracing::debug!(state = ?self.state.get(), "Submission ignored, request already in progress");
            return SubmitOutcome::Ignored;
        }
        self.state.set(SubmitState::InFlight);
        let mut guard = StateGuard {
            state: &self.state,
            presenter: None,
        };

        let reading = Reading::from_form(form);
        tracing::debug!(?reading, "Analyzing reading");

        self.presenter.begin_submission();
        guard.presenter = Some(self.presenter.as_ref());

        let outcome = match self.request(&reading).await {
            Ok(result) => {
                let recorded = self.record(reading, &result);
                let view = ResultView::new(&result);
                tracing::info!(aqi = result.aqi, category = %result.category, tier = ?view.tier, "Prediction received");
                self.presenter.show_result(&view);
                SubmitOutcome::Completed { view, recorded }
            }
            Err(e) => {
                tracing::error!(error = %e, "Prediction failed");
                self.presenter.show_error(&e.alert_message());
                SubmitOutcome::Failed(e)
            }
        };

        guard.finish();

        self.state.set(SubmitState::CoolingDown);
        self.cooldown.wait(self.config.cooldown).await;

        outcome
    }

    async fn request(&self, reading: &Reading) -> Result<PredictionResult, SubmitError> {
        let raw = self.api.post_reading(reading).await?;
        interpret_response(&raw)
    }

    /// Read-modify-write of the ledger. Returns whether an entry was added.
    fn record(&self, reading: Reading, result: &PredictionResult) -> bool {
        let mut history = History::from_entries(self.store.load());
        if !history.record(reading, result, Local::now()) {
            return false;
        }

        if let Err(e) = self.store.save(history.entries()) {
            tracing::warn!(error = %e, "Failed to persist prediction history");
        }
        true
    }
}
