//! Prediction Service HTTP Client
//!
//! reqwest transport for [`PredictionApi`]. Status codes are passed through
//! untouched; only connection-level failures become errors.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use crate::config::ApiConfig;
use crate::error::SubmitError;
use crate::prediction::{PredictionApi, RawResponse, ServiceStatus, PREDICT_PATH};
use crate::reading::Reading;

/// HTTP client for the prediction service
pub struct HttpPredictionClient {
    client: Client,
    base_url: String,
}

impl HttpPredictionClient {
    /// Create a client from the API configuration
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            client,
            // Normalize: remove trailing slash
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn predict_url(&self) -> String {
        format!("{}{}", self.base_url, PREDICT_PATH)
    }

    /// Check the service root (`GET /`)
    pub async fn status(&self) -> Result<ServiceStatus, SubmitError> {
        let url = format!("{}/", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::rejection(status.as_u16(), None));
        }

        response.json().await.map_err(transport_error)
    }
}

#[async_trait(?Send)]
impl PredictionApi for HttpPredictionClient {
    async fn post_reading(&self, reading: &Reading) -> Result<RawResponse, SubmitError> {
        let url = self.predict_url();
        tracing::debug!(%url, "Posting reading");

        let response = self
            .client
            .post(&url)
            .json(reading)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;

        Ok(RawResponse::new(status, body))
    }
}

fn transport_error(e: reqwest::Error) -> SubmitError {
    if e.is_timeout() {
        SubmitError::Transport("Request timeout".to_string())
    } else if e.is_connect() {
        SubmitError::Transport(format!("Service unavailable: {}", e))
    } else {
        SubmitError::Transport(e.to_string())
    }
}

/// Errors constructing the client
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to create HTTP client: {0}")]
    Build(reqwest::Error),
}
