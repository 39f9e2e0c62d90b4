//! Prediction Form Component
//!
//! Six pollutant inputs. Submission is handed to the app-wide core
//! `SubmissionController`, which drives [`GlobalState`] through the
//! presenter port.

use atmos::{FormInput, POLLUTANT_FIELDS, POLLUTANT_LABELS};
use leptos::*;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys::{FormData, HtmlFormElement};

use crate::components::InlineLoading;
use crate::state::{use_submission_controller, GlobalState};

/// Prediction form component
#[component]
pub fn PredictForm() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let form_ref = create_node_ref::<html::Form>();

    let controller = use_submission_controller();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        ev.stop_propagation();

        let Some(form) = form_ref.get() else {
            return;
        };

        let input = match read_form(&form) {
            Ok(input) => input,
            Err(e) => {
                web_sys::console::error_1(&e);
                return;
            }
        };

        let controller = Rc::clone(&controller);
        spawn_local(async move {
            controller.submit(&input).await;
        });
    };

    view! {
        <form node_ref=form_ref on:submit=on_submit novalidate=true class="space-y-6">
            <div class="grid grid-cols-1 sm:grid-cols-2 gap-4">
                {POLLUTANT_FIELDS
                    .into_iter()
                    .zip(POLLUTANT_LABELS)
                    .map(|(name, label)| view! { <PollutantInput name=name label=label /> })
                    .collect_view()}
            </div>

            // Submit button
            <button
                type="submit"
                disabled=move || state.busy.get()
                class=move || {
                    let base = "w-full bg-cyan-600 hover:bg-cyan-700 rounded-lg py-3 font-semibold \
                                transition-colors flex items-center justify-center space-x-2";
                    if state.busy.get() {
                        format!("{} opacity-50 cursor-not-allowed", base)
                    } else {
                        base.to_string()
                    }
                }
            >
                {move || if state.busy.get() {
                    view! {
                        <InlineLoading />
                        <span class="animate-pulse">"Processing..."</span>
                    }.into_view()
                } else {
                    view! {
                        <span>"Predict AQI"</span>
                    }.into_view()
                }}
            </button>
        </form>
    }
}

#[component]
fn PollutantInput(
    name: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <div>
            <label for=name class="block text-sm text-gray-400 mb-2">{label}</label>
            <input
                id=name
                name=name
                type="number"
                step="any"
                placeholder="0.0"
                class="w-full bg-gray-700 rounded-lg px-4 py-3 text-white
                       border border-gray-600 focus:border-cyan-500 focus:outline-none"
            />
        </div>
    }
}

/// Collect the raw field strings. Parsing is left to the core so blank and
/// malformed values follow the same lenient rule everywhere.
fn read_form(form: &HtmlFormElement) -> Result<FormInput, JsValue> {
    let data = FormData::new_with_form(form)?;

    Ok(POLLUTANT_FIELDS
        .into_iter()
        .filter_map(|name| data.get(name).as_string().map(|value| (name, value)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{provide_global_state, provide_submission_controller};
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::HtmlInputElement;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount_form() -> HtmlFormElement {
        let document = web_sys::window().unwrap().document().unwrap();
        let host = document.create_element("div").unwrap();
        document.body().unwrap().append_child(&host).unwrap();

        mount_to(host.clone().unchecked_into(), || {
            provide_global_state();
            provide_submission_controller();
            view! { <PredictForm /> }
        });

        host.query_selector("form")
            .unwrap()
            .unwrap()
            .unchecked_into::<HtmlFormElement>()
    }

    fn input(form: &HtmlFormElement, name: &str) -> HtmlInputElement {
        form.query_selector(&format!("input[name='{}']", name))
            .unwrap()
            .unwrap()
            .unchecked_into::<HtmlInputElement>()
    }

    #[wasm_bindgen_test]
    fn test_blank_and_negative_fields_do_not_block_submit() {
        let form = mount_form();
        assert!(form.no_validate());

        input(&form, "pm25").set_value("120");
        input(&form, "pm10").set_value("");
        input(&form, "no2").set_value("-3");

        for name in POLLUTANT_FIELDS {
            assert!(!input(&form, name).required());
        }
        assert!(form.check_validity());

        let reading = atmos::Reading::from_form(&read_form(&form).unwrap());
        assert_eq!(reading.pm25, 120.0);
        assert_eq!(reading.pm10, 0.0);
        assert_eq!(reading.no2, -3.0);
    }
}
