//! Remote API error types.

use std::sync::Arc;

/// Errors that can occur when fetching from the fuel price API.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Body was not JSON, or not the expected shape
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The API answered but reported a failed query
    #[error("query rejected by API: {0}")]
    Rejected(String),

    /// A failure handed out by the reference cache to every waiting caller
    #[error(transparent)]
    Shared(#[from] Arc<FetchError>),
}

impl FetchError {
    pub(crate) fn json(message: impl Into<String>) -> Self {
        FetchError::Json {
            message: message.into(),
        }
    }
}
