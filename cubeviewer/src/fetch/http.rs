//! HTTP JSON client abstraction for testability.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use super::error::FetchError;

/// Default timeout for HTTP requests in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("cubeviewer/", env!("CARGO_PKG_VERSION"));

/// Trait for downloading JSON documents.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock clients in tests. Implementations fail on transport
/// errors, non-success statuses and malformed bodies; they never retry.
pub trait JsonFetcher: Send + Sync {
    /// Performs an HTTP GET request and parses the body as JSON.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    fn get_json(&self, url: &str) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

impl<T: JsonFetcher> JsonFetcher for Arc<T> {
    fn get_json(&self, url: &str) -> impl Future<Output = Result<Value, FetchError>> + Send {
        (**self).get_json(url)
    }
}

impl<T: JsonFetcher> JsonFetcher for &T {
    fn get_json(&self, url: &str) -> impl Future<Output = Result<Value, FetchError>> + Send {
        (**self).get_json(url)
    }
}

/// Real JSON client implementation using async reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// Creates a new fetcher with default configuration.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_settings(Duration::from_secs(DEFAULT_TIMEOUT_SECS), DEFAULT_USER_AGENT)
    }

    /// Creates a new fetcher with custom timeout and user agent.
    pub fn with_settings(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl JsonFetcher for ReqwestFetcher {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        debug!(url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Http(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Http(format!("Failed to read response: {}", e)))?;

        serde_json::from_slice(&body).map_err(|e| FetchError::Parse {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}
