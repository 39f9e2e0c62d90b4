//! Atmos Dashboard
//!
//! Air-quality prediction front end built with Leptos (WASM).
//!
//! # Features
//!
//! - Pollutant form submitted to the prediction service
//! - Result card styled by AQI tier
//! - Local prediction history with summary and snapshot chart
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. Submission, dedup and dashboard logic come from the `atmos`
//! core crate; this crate supplies the browser side of its ports: reactive
//! signals as the presenter, `localStorage` as the history store and
//! `fetch` as the transport.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
