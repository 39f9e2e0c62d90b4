//! Result Panel Component
//!
//! The right-hand column of the prediction page: busy indicator, alert
//! region, empty-state placeholder and the tier-styled result card.

use atmos::ResultView;
use leptos::*;

use crate::components::loading::Loading;
use crate::state::global::GlobalState;

/// Result column component
#[component]
pub fn ResultPanel() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="space-y-4 h-full">
            // Busy indicator
            <Show when=move || state.busy.get()>
                <Loading />
            </Show>

            // Alert region
            {move || {
                state.error.get().map(|msg| view! {
                    <div
                        role="alert"
                        class="bg-red-900/50 border border-red-500 text-red-300 rounded-lg px-4 py-3"
                    >
                        {msg}
                    </div>
                })
            }}

            // Empty-state placeholder
            <Show when=move || state.placeholder_visible.get() && state.result.get().is_none()>
                <div class="flex flex-col items-center justify-center h-64 text-center
                            bg-gray-800 rounded-xl text-gray-500">
                    <span class="text-4xl mb-2">"🌫"</span>
                    <p>"Enter pollutant levels to get a prediction."</p>
                </div>
            </Show>

            // Result card
            {move || state.result.get().map(|result| view! { <ResultCard result=result /> })}
        </div>
    }
}

/// One prediction, styled by tier
#[component]
fn ResultCard(result: ResultView) -> impl IntoView {
    let style = result.style();

    view! {
        <div
            class=format!("result-card bg-gray-800 rounded-xl p-10 h-full border-t-8 {}", style.border_class)
            data-aos="fade-up"
        >
            <div class="flex items-center justify-between mb-6">
                <h2 class="text-lg text-gray-400">"Predicted AQI"</h2>
                <span class=format!(
                    "px-4 py-2 rounded-full font-bold uppercase text-xs tracking-wider {}",
                    style.badge_class
                )>
                    {result.category.clone()}
                </span>
            </div>

            <div class="text-6xl font-bold mb-2" style=format!("color: {}", style.accent)>
                {result.score_text()}
            </div>
            <div class="text-xl mb-6">{result.category}</div>

            <p class="text-gray-300">{result.health_advice}</p>
        </div>
    }
}
