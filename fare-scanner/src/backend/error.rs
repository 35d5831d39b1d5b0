//! Fare API error types.

use crate::planner::ScanError;

use super::convert::ConversionError;

/// Errors from the fare API client.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the API
    #[error("rate limited by fare API")]
    RateLimited,

    /// Request rejected by the API
    #[error("unauthorized by fare API")]
    Unauthorized,

    /// Response parsed but contained invalid data
    #[error("invalid response data: {0}")]
    Conversion(#[from] ConversionError),
}

impl From<BackendError> for ScanError {
    fn from(err: BackendError) -> Self {
        ScanError::BackendUnavailable(err.to_string())
    }
}
