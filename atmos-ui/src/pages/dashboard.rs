//! Dashboard Page
//!
//! Prediction history, summary figures, the latest pollutant snapshot and
//! the API connection settings.

use atmos::Dashboard as HistoryDashboard;
use leptos::*;
use std::rc::Rc;

use crate::api;
use crate::components::{Chart, HistoryTable, SummaryCards, Toast};
use crate::state::{GlobalState, LocalStorageStore};

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let dashboard = Rc::new(HistoryDashboard::new(
        Rc::new(LocalStorageStore::new()),
        Rc::new(state),
    ));

    // Render stored history on mount
    dashboard.init();

    let on_clear = move |_| match dashboard.clear_history() {
        Ok(true) => state.show_success("History cleared"),
        Ok(false) => {}
        Err(e) => {
            web_sys::console::error_1(&format!("Failed to clear history: {}", e).into());
        }
    };

    view! {
        <div class="space-y-8">
            // Header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Dashboard"</h1>
                    <p class="text-gray-400 mt-1">"Your recent predictions"</p>
                </div>
                <button
                    on:click=on_clear
                    class="px-4 py-2 bg-red-600 hover:bg-red-700 rounded-lg font-medium transition-colors"
                >
                    "Clear History"
                </button>
            </div>

            <SummaryCards />

            <div class="grid grid-cols-1 lg:grid-cols-2 gap-8">
                <section class="bg-gray-800 rounded-xl p-6 overflow-x-auto">
                    <h2 class="text-xl font-semibold mb-4">"History"</h2>
                    <HistoryTable />
                </section>

                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"Latest Pollutant Snapshot"</h2>
                    <Chart />
                </section>
            </div>

            <ApiSettings />

            <Toast />
        </div>
    }
}

/// API connection settings
#[component]
fn ApiSettings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (api_url, set_api_url) = create_signal(api::get_api_base());
    let (testing, set_testing) = create_signal(false);
    let (test_result, set_test_result) = create_signal(None::<Result<String, String>>);

    let test_connection = move |_| {
        set_testing.set(true);
        set_test_result.set(None);
        api::set_api_base(&api_url.get());

        spawn_local(async move {
            let outcome = api::check_status().await.map(|status| {
                if status.model_loaded {
                    format!("{} (model loaded)", status.status)
                } else {
                    format!("{} (model missing)", status.status)
                }
            });
            set_test_result.set(Some(outcome));
            set_testing.set(false);
        });
    };

    let save_url = move |_| {
        api::set_api_base(&api_url.get());
        state.show_success("API URL saved");
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"API Connection"</h2>

            <div class="space-y-4">
                <div>
                    <label class="block text-sm text-gray-400 mb-2">
                        "Prediction service URL (blank for same origin)"
                    </label>
                    <div class="flex space-x-2">
                        <input
                            type="text"
                            placeholder="http://localhost:5000"
                            prop:value=move || api_url.get()
                            on:input=move |ev| set_api_url.set(event_target_value(&ev))
                            class="flex-1 bg-gray-700 rounded-lg px-4 py-3
                                   border border-gray-600 focus:border-cyan-500 focus:outline-none"
                        />
                        <button
                            on:click=test_connection
                            disabled=move || testing.get()
                            class="px-4 py-3 bg-gray-600 hover:bg-gray-500 disabled:bg-gray-700
                                   rounded-lg font-medium transition-colors"
                        >
                            {move || if testing.get() { "Testing..." } else { "Test" }}
                        </button>
                        <button
                            on:click=save_url
                            class="px-4 py-3 bg-cyan-600 hover:bg-cyan-700
                                   rounded-lg font-medium transition-colors"
                        >
                            "Save"
                        </button>
                    </div>
                </div>

                // Connection status
                <div class="flex items-center space-x-2">
                    <span class="text-sm text-gray-400">"Status:"</span>
                    {move || match test_result.get() {
                        Some(Ok(status)) => view! {
                            <span class="text-green-400">{format!("✓ {}", status)}</span>
                        }.into_view(),
                        Some(Err(e)) => view! {
                            <span class="text-red-400">{format!("✕ {}", e)}</span>
                        }.into_view(),
                        None => view! {
                            <span class="text-gray-500">"Not tested"</span>
                        }.into_view(),
                    }}
                </div>
            </div>
        </section>
    }
}
