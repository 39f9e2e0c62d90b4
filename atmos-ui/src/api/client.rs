//! HTTP API Client
//!
//! Browser transport for the prediction service, built on `fetch`.

use async_trait::async_trait;
use atmos::{PredictionApi, RawResponse, Reading, ServiceStatus, SubmitError, PREDICT_PATH};
use gloo_net::http::Request;

/// Local storage key holding an API base override
pub const API_BASE_KEY: &str = "atmos_api_url";

/// Default API base URL. Empty means same origin as the page.
pub const DEFAULT_API_BASE: &str = "";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_BASE_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage. Blank input restores same-origin.
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let url = url.trim();
            let _ = if url.is_empty() {
                storage.remove_item(API_BASE_KEY)
            } else {
                storage.set_item(API_BASE_KEY, url)
            };
        }
    }
}

/// `fetch`-backed [`PredictionApi`]
#[derive(Debug, Clone, Default)]
pub struct BrowserPredictionClient {
    base_url: String,
}

impl BrowserPredictionClient {
    /// Client against the configured (or same-origin) base URL
    pub fn new() -> Self {
        Self {
            base_url: get_api_base(),
        }
    }

    pub fn predict_url(&self) -> String {
        format!("{}{}", self.base_url, PREDICT_PATH)
    }
}

#[async_trait(?Send)]
impl PredictionApi for BrowserPredictionClient {
    async fn post_reading(&self, reading: &Reading) -> Result<RawResponse, SubmitError> {
        let response = Request::post(&self.predict_url())
            .json(reading)
            .map_err(|e| SubmitError::Transport(format!("Request build error: {}", e)))?
            .send()
            .await
            .map_err(|e| SubmitError::Transport(format!("Network error: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SubmitError::Transport(format!("Read error: {}", e)))?;

        Ok(RawResponse::new(status, body))
    }
}

/// Check the service root for liveness and model status
pub async fn check_status() -> Result<ServiceStatus, String> {
    let api_base = get_api_base();
    let url = if api_base.is_empty() {
        "/".to_string()
    } else {
        format!("{}/", api_base)
    };

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(format!("Server Error ({})", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}
