//! History Table Component

use atmos::{format_score, EMPTY_HISTORY_MESSAGE};
use leptos::*;

use crate::state::global::GlobalState;

/// Recorded predictions, newest first
#[component]
pub fn HistoryTable() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <table class="w-full text-left">
            <thead>
                <tr class="text-gray-400 text-sm border-b border-gray-700">
                    <th class="p-4">"Time"</th>
                    <th class="p-4">"AQI"</th>
                    <th class="p-4">"Category"</th>
                </tr>
            </thead>
            <tbody>
                {move || {
                    let entries = state.history.get();
                    if entries.is_empty() {
                        view! {
                            <tr>
                                <td colspan="3" class="p-4 text-center text-gray-500">
                                    {EMPTY_HISTORY_MESSAGE}
                                </td>
                            </tr>
                        }.into_view()
                    } else {
                        entries
                            .into_iter()
                            .map(|entry| view! {
                                <tr class="border-b border-white/5 hover:bg-white/5 transition">
                                    <td class="p-4">{entry.date}</td>
                                    <td class="p-4 font-bold text-cyan-400">{format_score(entry.aqi)}</td>
                                    <td class="p-4">
                                        <span class="px-2 py-1 rounded text-xs bg-white/10">
                                            {entry.category}
                                        </span>
                                    </td>
                                </tr>
                            })
                            .collect_view()
                    }
                }}
            </tbody>
        </table>
    }
}
