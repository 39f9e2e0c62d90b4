//! Summary Cards Component
//!
//! Total scans and average score over the stored history.

use leptos::*;

use crate::state::global::GlobalState;

#[component]
pub fn SummaryCards() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="grid grid-cols-2 gap-4">
            <SummaryCard
                label="Total Scans"
                value=Signal::derive(move || state.summary.get().total_scans.to_string())
            />
            <SummaryCard
                label="Average AQI"
                value=Signal::derive(move || state.summary.get().average_text())
            />
        </div>
    }
}

#[component]
fn SummaryCard(
    label: &'static str,
    #[prop(into)]
    value: Signal<String>,
) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-xl p-6">
            <p class="text-sm text-gray-400">{label}</p>
            <p class="text-3xl font-bold mt-1">{move || value.get()}</p>
        </div>
    }
}
