//! Configuration for the data-package client.

use std::time::Duration;

use super::settings::DEFAULT_SETTINGS_URL;
use crate::fetch::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

/// Default cap on concurrent member requests while loading a whole model.
pub const DEFAULT_MAX_CONCURRENT_MEMBER_LOADS: usize = 8;

/// Configuration for [`DataPackageApi`](crate::api::DataPackageApi).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Where the settings document is loaded from.
    pub settings_url: String,

    /// HTTP request timeout.
    pub timeout: Duration,

    /// User agent for outgoing requests.
    pub user_agent: String,

    /// Maximum member requests in flight during a batch load.
    pub max_concurrent_member_loads: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            settings_url: DEFAULT_SETTINGS_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_concurrent_member_loads: DEFAULT_MAX_CONCURRENT_MEMBER_LOADS,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration loading settings from `settings_url`.
    pub fn new(settings_url: impl Into<String>) -> Self {
        Self {
            settings_url: settings_url.into(),
            ..Default::default()
        }
    }

    /// Set the HTTP timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the member-load concurrency. Values below 1 are raised to 1.
    pub fn with_max_concurrent_member_loads(mut self, max: usize) -> Self {
        self.max_concurrent_member_loads = max.max(1);
        self
    }
}
