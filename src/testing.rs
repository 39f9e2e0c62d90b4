//! Test doubles for the controller and dashboard ports

use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use crate::error::SubmitError;
use crate::history::{HistoryEntry, HistorySummary};
use crate::prediction::{PredictionApi, RawResponse};
use crate::presenter::{ChartSnapshot, Presenter};
use crate::reading::{FormInput, Reading};
use crate::tier::ResultView;

pub fn form(fields: &[(&str, &str)]) -> FormInput {
    fields.iter().map(|(k, v)| (*k, *v)).collect()
}

/// `{pm25:120, pm10:80, no2:30, so2:10, co:1.2, o3:40}`
pub fn scenario_form() -> FormInput {
    form(&[
        ("pm25", "120"),
        ("pm10", "80"),
        ("no2", "30"),
        ("so2", "10"),
        ("co", "1.2"),
        ("o3", "40"),
    ])
}

/// Answers each call with the next scripted response
pub struct ScriptedApi {
    responses: RefCell<VecDeque<Result<RawResponse, SubmitError>>>,
    calls: Cell<usize>,
    last_reading: Cell<Option<Reading>>,
}

impl ScriptedApi {
    pub fn new(responses: Vec<Result<RawResponse, SubmitError>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            calls: Cell::new(0),
            last_reading: Cell::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn last_reading(&self) -> Option<Reading> {
        self.last_reading.get()
    }
}

#[async_trait(?Send)]
impl PredictionApi for ScriptedApi {
    async fn post_reading(&self, reading: &Reading) -> Result<RawResponse, SubmitError> {
        self.calls.set(self.calls.get() + 1);
        self.last_reading.set(Some(*reading));
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(SubmitError::Transport("no scripted response".to_string())))
    }
}

/// Holds every request open until [`GatedApi::release`] is called
pub struct GatedApi {
    response: RawResponse,
    gate: tokio::sync::Notify,
    calls: Cell<usize>,
}

impl GatedApi {
    pub fn new(response: RawResponse) -> Self {
        Self {
            response,
            gate: tokio::sync::Notify::new(),
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait(?Send)]
impl PredictionApi for GatedApi {
    async fn post_reading(&self, _reading: &Reading) -> Result<RawResponse, SubmitError> {
        self.calls.set(self.calls.get() + 1);
        self.gate.notified().await;
        Ok(self.response.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PresenterEvent {
    Begin,
    End,
    Result,
    Error(String),
}

/// Records what was shown instead of drawing it
#[derive(Default)]
pub struct RecordingPresenter {
    events: RefCell<Vec<PresenterEvent>>,
    result: RefCell<Option<ResultView>>,
    history: RefCell<Option<Vec<HistoryEntry>>>,
    chart: RefCell<Option<ChartSnapshot>>,
    summary: Cell<Option<HistorySummary>>,
    confirm_answer: Cell<bool>,
    prompts: RefCell<Vec<String>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_confirm(&self, answer: bool) {
        self.confirm_answer.set(answer);
    }

    pub fn events(&self) -> Vec<PresenterEvent> {
        self.events.borrow().clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            PresenterEvent::Error(msg) => Some(msg.clone()),
            _ => None,
        })
    }

    pub fn result(&self) -> Option<ResultView> {
        self.result.borrow().clone()
    }

    pub fn history(&self) -> Option<Vec<HistoryEntry>> {
        self.history.borrow().clone()
    }

    pub fn chart(&self) -> Option<ChartSnapshot> {
        self.chart.borrow().clone()
    }

    pub fn summary(&self) -> Option<HistorySummary> {
        self.summary.get()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Presenter for RecordingPresenter {
    fn begin_submission(&self) {
        self.events.borrow_mut().push(PresenterEvent::Begin);
        self.result.borrow_mut().take();
    }

    fn end_submission(&self) {
        self.events.borrow_mut().push(PresenterEvent::End);
    }

    fn show_result(&self, view: &ResultView) {
        self.events.borrow_mut().push(PresenterEvent::Result);
        *self.result.borrow_mut() = Some(view.clone());
    }

    fn show_error(&self, message: &str) {
        self.events
            .borrow_mut()
            .push(PresenterEvent::Error(message.to_string()));
    }

    fn show_history(&self, entries: &[HistoryEntry]) {
        *self.history.borrow_mut() = Some(entries.to_vec());
    }

    fn show_chart(&self, snapshot: &ChartSnapshot) {
        *self.chart.borrow_mut() = Some(snapshot.clone());
    }

    fn show_summary(&self, summary: &HistorySummary) {
        self.summary.set(Some(*summary));
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.confirm_answer.get()
    }
}
