//! API Module
//!
//! HTTP client for the prediction service.

pub mod client;

pub use client::*;
