//! # Atmos
//!
//! Client for an air-quality prediction service: collects pollutant readings,
//! submits them to a remote scoring endpoint, renders a categorized result
//! and keeps a small local history ledger for a dashboard.
//!
//! ## Modules
//!
//! - [`reading`]: Form input and the six-pollutant [`Reading`]
//! - [`prediction`]: Service contract and response interpretation
//! - [`tier`]: Score → severity tier mapping
//! - [`history`]: Bounded, deduplicated, persisted ledger
//! - [`controller`]: Submission orchestration with an in-flight guard
//! - [`dashboard`]: Page-load rendering and the clear action
//! - [`presenter`]: The UI port everything above talks to
//!
//! With the default `native` feature the crate also provides a reqwest
//! client ([`client`]), a JSON file store, TOML configuration
//! ([`config`]) and terminal output ([`terminal`]). The browser front end
//! builds against the core with `default-features = false`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use atmos::*;
//! use std::rc::Rc;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let api = Rc::new(HttpPredictionClient::new(&config.api)?);
//!     let store = Rc::new(JsonFileStore::new(config.history.data_path()));
//!     let presenter = Rc::new(TerminalPresenter::new());
//!
//!     let controller = SubmissionController::new(
//!         api,
//!         store,
//!         presenter,
//!         Rc::new(TokioCooldown),
//!         ControllerConfig::default(),
//!     );
//!
//!     let form = FormInput::new().field("pm25", "120").field("pm10", "80");
//!     controller.submit(&form).await;
//!     Ok(())
//! }
//! ```

pub mod controller;
pub mod dashboard;
pub mod error;
pub mod history;
pub mod prediction;
pub mod presenter;
pub mod reading;
pub mod tier;

#[cfg(feature = "native")]
pub mod client;
#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod export;
#[cfg(feature = "native")]
pub mod terminal;

#[cfg(test)]
pub(crate) mod testing;

// Re-export top-level types for convenience
pub use controller::{
    ControllerConfig, Cooldown, NoCooldown, SubmissionController, SubmitOutcome, SubmitState,
    DEFAULT_COOLDOWN,
};

#[cfg(feature = "native")]
pub use controller::TokioCooldown;

pub use dashboard::Dashboard;

pub use error::{HistoryError, HistoryResult, SubmitError};

pub use history::{
    History, HistoryEntry, HistoryStore, HistorySummary, MemoryStore, DEDUP_TOLERANCE,
    HISTORY_CAPACITY, HISTORY_KEY,
};

#[cfg(feature = "native")]
pub use history::JsonFileStore;

pub use prediction::{
    interpret_response, PredictionApi, PredictionResult, RawResponse, ServiceStatus,
    PREDICT_PATH,
};

pub use presenter::{
    ChartBar, ChartSnapshot, Presenter, CLEAR_HISTORY_PROMPT, EMPTY_HISTORY_MESSAGE,
};

pub use reading::{FormInput, Reading, POLLUTANT_FIELDS, POLLUTANT_LABELS};

pub use tier::{format_score, ResultView, Tier, TierStyle};

#[cfg(feature = "native")]
pub use client::{ClientError, HttpPredictionClient};

#[cfg(feature = "native")]
pub use config::{
    ApiConfig, Config, ConfigError, HistoryConfig, LoadedConfig, LoggingConfig, SubmissionConfig,
};

#[cfg(feature = "native")]
pub use terminal::TerminalPresenter;
