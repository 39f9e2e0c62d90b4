//! Pages
//!
//! Top-level page components for each route.

pub mod dashboard;
pub mod predict;

pub use dashboard::Dashboard;
pub use predict::Predict;
