//! UI Components
//!
//! Reusable Leptos components for the prediction and dashboard pages.

pub mod nav;
pub mod chart;
pub mod history_table;
pub mod loading;
pub mod predict_form;
pub mod result_card;
pub mod summary;
pub mod toast;

pub use nav::Nav;
pub use chart::Chart;
pub use history_table::HistoryTable;
pub use loading::InlineLoading;
pub use predict_form::PredictForm;
pub use result_card::ResultPanel;
pub use summary::SummaryCards;
pub use toast::Toast;
