//! Shared Submission Controller
//!
//! One controller for the whole app, so its in-flight guard and cooldown
//! survive the prediction form being unmounted and mounted again.

use atmos::{ControllerConfig, SubmissionController};
use leptos::*;
use std::rc::Rc;

use super::global::GlobalState;
use super::storage::{GlooCooldown, LocalStorageStore};
use crate::api::BrowserPredictionClient;

/// Context handle to the app-wide controller
#[derive(Clone)]
pub struct SharedController(pub Rc<SubmissionController>);

/// Build the controller over the browser ports and provide it to the tree.
/// Call once, after [`super::provide_global_state`].
pub fn provide_submission_controller() {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let controller = SubmissionController::new(
        Rc::new(BrowserPredictionClient::new()),
        Rc::new(LocalStorageStore::new()),
        Rc::new(state),
        Rc::new(GlooCooldown),
        ControllerConfig::default(),
    );

    provide_context(SharedController(Rc::new(controller)));
}

/// The controller provided at the app root
pub fn use_submission_controller() -> Rc<SubmissionController> {
    let SharedController(controller) =
        use_context::<SharedController>().expect("SharedController not found");
    controller
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::provide_global_state;
    use std::cell::Cell;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_every_mount_gets_the_same_controller() {
        let document = web_sys::window().unwrap().document().unwrap();
        let host = document.create_element("div").unwrap();
        document.body().unwrap().append_child(&host).unwrap();

        let shared = Rc::new(Cell::new(false));
        let seen = Rc::clone(&shared);

        mount_to(host.unchecked_into(), move || {
            provide_global_state();
            provide_submission_controller();

            let first_mount = use_submission_controller();
            let second_mount = use_submission_controller();
            seen.set(Rc::ptr_eq(&first_mount, &second_mount));

            view! { <p>"mounted"</p> }
        });

        assert!(shared.get());
    }
}
