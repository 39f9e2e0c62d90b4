//! Loading Component
//!
//! Spinners shown while a prediction is in flight.

use leptos::*;

/// Block loading spinner with caption
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center space-x-3 py-6 text-gray-400">
            <div class="loading-spinner w-8 h-8" />
            <span class="animate-pulse">"Analyzing air quality..."</span>
        </div>
    }
}

/// Inline loading spinner
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span class="inline-block loading-spinner w-4 h-4" />
    }
}
