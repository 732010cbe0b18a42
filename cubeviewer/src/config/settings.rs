//! The remote settings document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

/// Default location of the settings document.
pub const DEFAULT_SETTINGS_URL: &str = "settings.json";

/// An endpoint block of the settings document (`{"url": ...}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(default)]
    pub url: Option<String>,
}

/// Parsed settings document.
///
/// Recognized top-level fields are `api`, `search` and `dataMine`; anything
/// else is ignored. Missing endpoint blocks are tolerated at load time and
/// reported by [`Settings::api_url`] / [`Settings::search_url`] when an
/// operation actually needs them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api: Option<Endpoint>,

    #[serde(default)]
    pub search: Option<Endpoint>,

    /// Opaque data-mine block, passed through verbatim.
    #[serde(default, rename = "dataMine")]
    pub data_mine: Option<Value>,
}

impl Settings {
    /// Create settings with both endpoints set.
    pub fn new(api_url: impl Into<String>, search_url: impl Into<String>) -> Self {
        Self {
            api: Some(Endpoint {
                url: Some(api_url.into()),
            }),
            search: Some(Endpoint {
                url: Some(search_url.into()),
            }),
            data_mine: None,
        }
    }

    /// Decode a settings document fetched from `source`.
    pub fn from_value(source: &str, value: Value) -> ApiResult<Self> {
        serde_json::from_value(value).map_err(|e| ApiError::decode(source, e))
    }

    /// Base URL of the cube API.
    pub fn api_url(&self) -> ApiResult<&str> {
        endpoint_url(self.api.as_ref()).ok_or(ApiError::MissingSetting("api.url"))
    }

    /// URL of the package search endpoint.
    pub fn search_url(&self) -> ApiResult<&str> {
        endpoint_url(self.search.as_ref()).ok_or(ApiError::MissingSetting("search.url"))
    }
}

fn endpoint_url(endpoint: Option<&Endpoint>) -> Option<&str> {
    endpoint
        .and_then(|e| e.url.as_deref())
        .filter(|url| !url.is_empty())
}
