//! Error types for data-package operations.

use thiserror::Error;

use crate::fetch::FetchError;

/// Result type for data-package operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur while loading settings, packages, models or members.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Downloading a document failed. Surfaced unchanged, never retried.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The settings document lacks an endpoint the operation needs.
    #[error("settings document has no {0}")]
    MissingSetting(&'static str),

    /// An endpoint URL from the settings could not be used as a base URL.
    #[error("invalid endpoint URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A document was valid JSON but not of the expected top-level shape.
    #[error("unexpected document shape from {url}: {reason}")]
    Decode { url: String, reason: String },

    /// Settings were requested before any load succeeded.
    #[error("settings have not been loaded")]
    ConfigNotLoaded,
}

impl ApiError {
    /// Build a decode error for the document fetched from `url`.
    pub(crate) fn decode(url: &str, err: serde_json::Error) -> Self {
        ApiError::Decode {
            url: url.to_string(),
            reason: err.to_string(),
        }
    }
}
