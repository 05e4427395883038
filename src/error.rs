use std::result;

use crate::retry::RetryableError;
use thiserror::Error;

/// Maximum number of body characters carried into an `ApiError` message.
pub(crate) const DIAGNOSTIC_LIMIT: usize = 200;

/// Error types for MedTox upstream operations
#[derive(Error, Debug)]
pub enum MedToxError {
    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Upstream returned a non-success HTTP status
    #[error("HTTP {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Invalid query input, rejected before any outbound call
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

pub type Result<T> = result::Result<T, MedToxError>;

impl MedToxError {
    /// Build an `ApiError` from a status code and a raw body, keeping only
    /// the leading fragment of the body for diagnostics.
    pub(crate) fn api_error(status: u16, body: &str) -> Self {
        let message: String = body.chars().take(DIAGNOSTIC_LIMIT).collect();
        MedToxError::ApiError { status, message }
    }
}

impl RetryableError for MedToxError {
    fn is_retryable(&self) -> bool {
        match self {
            // Network-level failures (timeouts, connect errors, dropped
            // connections) are transient.
            MedToxError::RequestError(_) => true,

            // NCBI occasionally returns truncated or malformed bodies under
            // load; a decode failure gets the same retry budget as a bad
            // status.
            MedToxError::JsonError(_) => true,

            // Every non-2xx status is retried within the attempt budget.
            // Once attempts are exhausted the last ApiError is the terminal
            // failure surfaced to the caller.
            MedToxError::ApiError { .. } => true,

            // Caller input problems never reach the network and are never
            // retried.
            MedToxError::InvalidQuery(_) => false,
        }
    }

    fn retry_reason(&self) -> &str {
        match self {
            MedToxError::RequestError(err) if err.is_timeout() => "Request timeout",
            MedToxError::RequestError(err) if err.is_connect() => "Connection error",
            MedToxError::RequestError(_) => "Network error",
            MedToxError::JsonError(_) => "Malformed response body",
            MedToxError::ApiError { status, .. } => match status {
                429 => "Rate limit exceeded",
                500..=599 => "Server error",
                _ => "Upstream error status",
            },
            MedToxError::InvalidQuery(_) => "Invalid input",
        }
    }
}
