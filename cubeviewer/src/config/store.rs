//! Lazily loaded, reloadable settings shared by every operation.
//!
//! The store keeps the last successfully loaded [`Settings`] as an
//! `Arc` snapshot. Operations take a snapshot when they start, so a reload that
//! happens while they are in flight never changes the endpoints they use.
//!
//! Loads are single-flight: while one load is in progress, other callers wait
//! for it, and a waiter whose source matches the load that just completed
//! reuses that result instead of fetching again. Sequential calls always
//! re-fetch.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::debug;

use super::settings::Settings;
use crate::error::{ApiError, ApiResult};
use crate::fetch::JsonFetcher;

#[derive(Debug, Clone)]
struct Loaded {
    source: String,
    settings: Arc<Settings>,
}

/// Process-wide settings cache.
#[derive(Debug, Default)]
pub struct ConfigStore {
    current: RwLock<Option<Loaded>>,
    /// Serializes loads.
    gate: Mutex<()>,
    /// Bumped after every successful load.
    generation: AtomicU64,
}

impl ConfigStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `settings`.
    ///
    /// Useful when the settings are known up front and no settings document
    /// has to be fetched. A later [`ensure`](Self::ensure) still reloads.
    pub fn preloaded(source: impl Into<String>, settings: Settings) -> Self {
        let store = Self::new();
        *store.current.write() = Some(Loaded {
            source: source.into(),
            settings: Arc::new(settings),
        });
        store
    }

    /// Load the settings document from `source` and make it current.
    ///
    /// On failure the previously stored settings are left untouched and the
    /// error is returned to this caller only.
    pub async fn ensure<F: JsonFetcher>(
        &self,
        fetcher: &F,
        source: &str,
    ) -> ApiResult<Arc<Settings>> {
        let observed = self.generation.load(Ordering::Acquire);
        let _gate = self.gate.lock().await;

        if self.generation.load(Ordering::Acquire) != observed {
            if let Some(settings) = self.loaded_from(source) {
                debug!(source, "Reusing settings loaded by a concurrent caller");
                return Ok(settings);
            }
        }

        debug!(source, "Loading settings");
        let document = fetcher.get_json(source).await?;
        let settings = Arc::new(Settings::from_value(source, document)?);

        *self.current.write() = Some(Loaded {
            source: source.to_string(),
            settings: Arc::clone(&settings),
        });
        self.generation.fetch_add(1, Ordering::AcqRel);

        Ok(settings)
    }

    /// The last successfully loaded settings, without any I/O.
    pub fn current(&self) -> ApiResult<Arc<Settings>> {
        self.current
            .read()
            .as_ref()
            .map(|loaded| Arc::clone(&loaded.settings))
            .ok_or(ApiError::ConfigNotLoaded)
    }

    /// Number of successful loads so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    fn loaded_from(&self, source: &str) -> Option<Arc<Settings>> {
        self.current
            .read()
            .as_ref()
            .filter(|loaded| loaded.source == source)
            .map(|loaded| Arc::clone(&loaded.settings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use serde_json::json;

    use crate::fetch::{FetchError, MockJsonFetcher};

    const SOURCE: &str = "http://viewer.example.org/settings.json";

    fn settings_doc(api: &str) -> serde_json::Value {
        json!({"api": {"url": api}, "search": {"url": "http://search.example.org"}})
    }

    #[test]
    fn test_current_before_load_fails() {
        let store = ConfigStore::new();
        assert_eq!(store.current(), Err(ApiError::ConfigNotLoaded));
        assert_eq!(store.generation(), 0);
    }

    #[tokio::test]
    async fn test_ensure_loads_and_stores() {
        let fetcher = MockJsonFetcher::new().route(SOURCE, settings_doc("http://api.one"));
        let store = ConfigStore::new();

        let settings = store.ensure(&fetcher, SOURCE).await.unwrap();

        assert_eq!(settings.api_url().unwrap(), "http://api.one");
        assert_eq!(store.current().unwrap(), settings);
        assert_eq!(store.generation(), 1);
    }

    #[tokio::test]
    async fn test_sequential_calls_refetch() {
        let fetcher = MockJsonFetcher::new().route(SOURCE, settings_doc("http://api.one"));
        let store = ConfigStore::new();

        store.ensure(&fetcher, SOURCE).await.unwrap();
        fetcher.set_route(SOURCE, Ok(settings_doc("http://api.two")));
        let reloaded = store.ensure(&fetcher, SOURCE).await.unwrap();

        assert_eq!(fetcher.request_count(SOURCE), 2);
        assert_eq!(reloaded.api_url().unwrap(), "http://api.two");
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_settings() {
        let fetcher = MockJsonFetcher::new().route(SOURCE, settings_doc("http://api.one"));
        let store = ConfigStore::new();
        let first = store.ensure(&fetcher, SOURCE).await.unwrap();

        fetcher.set_route(SOURCE, Err(FetchError::Http("network down".to_string())));
        let result = store.ensure(&fetcher, SOURCE).await;

        assert!(matches!(result, Err(ApiError::Fetch(FetchError::Http(_)))));
        assert_eq!(store.current().unwrap(), first);
        assert_eq!(store.generation(), 1);
    }

    #[tokio::test]
    async fn test_malformed_reload_keeps_previous_settings() {
        let fetcher = MockJsonFetcher::new().route(SOURCE, settings_doc("http://api.one"));
        let store = ConfigStore::new();
        store.ensure(&fetcher, SOURCE).await.unwrap();

        fetcher.set_route(SOURCE, Ok(json!("just a string")));
        assert!(matches!(
            store.ensure(&fetcher, SOURCE).await,
            Err(ApiError::Decode { .. })
        ));
        assert_eq!(store.current().unwrap().api_url().unwrap(), "http://api.one");
    }

    #[tokio::test]
    async fn test_overlapping_loads_are_coalesced() {
        let fetcher = MockJsonFetcher::with_delay(Duration::from_millis(20))
            .route(SOURCE, settings_doc("http://api.one"));
        let store = ConfigStore::new();

        let (a, b) = tokio::join!(store.ensure(&fetcher, SOURCE), store.ensure(&fetcher, SOURCE));

        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(fetcher.request_count(SOURCE), 1);
    }

    #[tokio::test]
    async fn test_overlapping_loads_of_different_sources_both_fetch() {
        let other = "http://other.example.org/settings.json";
        let fetcher = MockJsonFetcher::with_delay(Duration::from_millis(10))
            .route(SOURCE, settings_doc("http://api.one"))
            .route(other, settings_doc("http://api.two"));
        let store = ConfigStore::new();

        let (a, b) = tokio::join!(store.ensure(&fetcher, SOURCE), store.ensure(&fetcher, other));

        assert_eq!(a.unwrap().api_url().unwrap(), "http://api.one");
        assert_eq!(b.unwrap().api_url().unwrap(), "http://api.two");
        assert_eq!(fetcher.requests().len(), 2);
    }

    #[test]
    fn test_preloaded_store() {
        let store = ConfigStore::preloaded("inline", Settings::new("http://api", "http://search"));
        assert_eq!(store.current().unwrap().api_url().unwrap(), "http://api");
        assert_eq!(store.generation(), 0);
    }
}
