//! Error types
//!
//! Submission failures are caught at the controller boundary and shown in
//! the alert region; history failures are logged and never end a session.

use thiserror::Error;

/// Errors that can end a single submission attempt
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    /// The service answered with a non-success status
    #[error("{message}")]
    RemoteRejection { status: u16, message: String },

    /// The request never completed, or the body could not be decoded
    #[error("{0}")]
    Transport(String),
}

impl SubmitError {
    /// Rejection for a failed status, preferring the server's own message
    pub fn rejection(status: u16, server_message: Option<&str>) -> Self {
        let message = match server_message {
            Some(msg) if !msg.is_empty() => msg.to_string(),
            _ => format!("Server Error ({})", status),
        };
        SubmitError::RemoteRejection { status, message }
    }

    /// Text shown in the alert region
    pub fn alert_message(&self) -> String {
        format!("System Alert: {}", self)
    }
}

/// Errors that can occur when writing or deleting the persisted history
#[derive(Error, Debug)]
pub enum HistoryError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The storage area refused the write (unavailable, quota, ...)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for HistoryError {
    fn from(err: serde_json::Error) -> Self {
        HistoryError::Serialization(err.to_string())
    }
}

/// Result type alias for history persistence
pub type HistoryResult<T> = Result<T, HistoryError>;
