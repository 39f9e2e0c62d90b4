//! State Management
//!
//! Global application state, the shared submission controller and the
//! browser implementations of the core's persistence ports.

pub mod global;
pub mod storage;
pub mod submission;

pub use global::{provide_global_state, GlobalState};
pub use storage::{GlooCooldown, LocalStorageStore};
pub use submission::{provide_submission_controller, use_submission_controller};
