//! Prediction service contract
//!
//! The scoring service is an external collaborator. Transports only move
//! bytes ([`RawResponse`]); [`interpret_response`] turns a status and body
//! into a [`PredictionResult`] or a [`SubmitError`] the same way for every
//! transport.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SubmitError;
use crate::reading::Reading;

/// Path of the scoring endpoint, relative to the service base URL
pub const PREDICT_PATH: &str = "/predict";

/// Scored response from the prediction service
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PredictionResult {
    pub aqi: f64,
    pub category: String,
    pub health_advice: String,
}

impl PredictionResult {
    /// Decode from an untyped JSON value, tolerating missing fields
    pub fn from_value(value: &Value) -> Self {
        let aqi = match value.get("aqi").and_then(Value::as_f64) {
            Some(aqi) => aqi,
            None => {
                tracing::warn!(body = %value, "Prediction response has no numeric aqi, using 0");
                0.0
            }
        };

        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        Self {
            aqi,
            category: text("category"),
            health_advice: text("health_advice"),
        }
    }
}

/// Status code and body exactly as the transport received them
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outbound port to the scoring service
#[async_trait(?Send)]
pub trait PredictionApi {
    /// POST the reading as JSON to [`PREDICT_PATH`].
    ///
    /// Only connection-level failures are errors here; any status code is
    /// returned as a [`RawResponse`].
    async fn post_reading(&self, reading: &Reading) -> Result<RawResponse, SubmitError>;
}

/// Turn a raw response into a result.
///
/// The body is decoded as JSON before the status is looked at, so a failed
/// status can still carry the server's `error` message.
pub fn interpret_response(raw: &RawResponse) -> Result<PredictionResult, SubmitError> {
    let body: Value = serde_json::from_str(&raw.body).map_err(|e| {
        tracing::error!(status = raw.status, error = %e, "Undecodable prediction response");
        SubmitError::Transport(e.to_string())
    })?;

    if !raw.is_success() {
        let server_message = body.get("error").and_then(Value::as_str);
        return Err(SubmitError::rejection(raw.status, server_message));
    }

    Ok(PredictionResult::from_value(&body))
}

/// Response of the service's status check (`GET /`)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServiceStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub model_loaded: bool,
}
