//! Fare estimate error types.

use std::time::Duration;

/// Errors from a fare estimator.
#[derive(Debug, thiserror::Error)]
pub enum EstimateError {
    /// The estimate request is missing a field or has a bad value
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },

    /// HTTP request to the provider failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned an error status code
    #[error("provider error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the provider
    #[error("rate limited by estimate provider")]
    RateLimited,

    /// API key rejected
    #[error("unauthorized: check GEMINI_API_KEY")]
    Unauthorized,

    /// Provider answered, but not with a valid estimate
    #[error("invalid estimate response: {message}")]
    InvalidResponse {
        message: String,
        body: Option<String>,
    },

    /// No answer within the configured bound
    #[error("estimate timed out after {0:?}")]
    Timeout(Duration),
}

impl EstimateError {
    pub(crate) fn invalid_response(message: impl Into<String>, body: Option<&str>) -> Self {
        EstimateError::InvalidResponse {
            message: message.into(),
            body: body.map(|b| b.chars().take(500).collect()),
        }
    }
}
