//! Predict Page
//!
//! Pollutant form on the left, result column on the right.

use leptos::*;

use crate::components::{PredictForm, ResultPanel};

#[component]
pub fn Predict() -> impl IntoView {
    view! {
        <div class="space-y-8">
            // Header
            <div>
                <h1 class="text-3xl font-bold">"Air Quality Prediction"</h1>
                <p class="text-gray-400 mt-1">
                    "Enter pollutant concentrations to estimate the AQI"
                </p>
            </div>

            <div class="grid grid-cols-1 lg:grid-cols-2 gap-8">
                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"Pollutant Levels"</h2>
                    <PredictForm />
                </section>

                <section>
                    <ResultPanel />
                </section>
            </div>
        </div>
    }
}
