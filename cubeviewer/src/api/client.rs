//! The data-package API facade.

use std::sync::Arc;

use reqwest::Url;
use tracing::debug;

use crate::catalog::{self, PackageSummary};
use crate::config::{ClientConfig, ConfigStore, Settings};
use crate::endpoints;
use crate::error::{ApiError, ApiResult};
use crate::fetch::{JsonFetcher, ReqwestFetcher};
use crate::members;
use crate::model::{self, Dimension, MemberValue, PackageModel, RawCubeModel, RawCubeResponse, RawDescriptor};

/// Entry point for everything the presentation layer needs.
///
/// Every remote operation first loads the settings document and then works
/// on that snapshot only. The [`ConfigStore`] can be shared between several
/// clients with [`with_store`](Self::with_store).
pub struct DataPackageApi<F: JsonFetcher> {
    fetcher: F,
    store: Arc<ConfigStore>,
    config: ClientConfig,
}

impl DataPackageApi<ReqwestFetcher> {
    /// Create a client backed by reqwest, configured from `config`.
    ///
    /// The settings URL must be absolute; a relative one such as the default
    /// `settings.json` fails with [`ApiError::InvalidUrl`].
    pub fn from_config(config: ClientConfig) -> ApiResult<Self> {
        if let Err(e) = Url::parse(&config.settings_url) {
            return Err(ApiError::InvalidUrl {
                url: config.settings_url,
                reason: format!("{}; an absolute settings URL is required", e),
            });
        }
        let fetcher = ReqwestFetcher::with_settings(config.timeout, &config.user_agent)?;
        Ok(Self::new(fetcher, config))
    }
}

impl<F: JsonFetcher> DataPackageApi<F> {
    /// Create a client with its own, empty settings store.
    pub fn new(fetcher: F, config: ClientConfig) -> Self {
        Self {
            fetcher,
            store: Arc::new(ConfigStore::new()),
            config,
        }
    }

    /// Use a shared settings store.
    pub fn with_store(mut self, store: Arc<ConfigStore>) -> Self {
        self.store = store;
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// (Re)load the settings document from `source`, or from the configured
    /// settings URL.
    pub async fn ensure_config(&self, source: Option<&str>) -> ApiResult<Arc<Settings>> {
        let source = source.unwrap_or(&self.config.settings_url);
        self.store.ensure(&self.fetcher, source).await
    }

    /// Packages available on the search endpoint, in server order.
    pub async fn list_packages(&self, auth_token: Option<&str>) -> ApiResult<Vec<PackageSummary>> {
        let settings = self.ensure_config(None).await?;
        catalog::list_packages(&self.fetcher, &settings, auth_token).await
    }

    /// Bare model from already fetched documents. No I/O.
    pub fn build_model(
        &self,
        package_id: &str,
        descriptor: &RawDescriptor,
        cube: &RawCubeModel,
    ) -> PackageModel {
        model::build_model(package_id, descriptor, cube)
    }

    /// Fetch descriptor and cube model, build the package model, and unless
    /// `load_bare_model` is set, load the members of every dimension.
    pub async fn get_data_package(
        &self,
        package_id: &str,
        load_bare_model: bool,
    ) -> ApiResult<PackageModel> {
        let settings = self.ensure_config(None).await?;

        let info_url = endpoints::package_info(&settings, package_id)?;
        let model_url = endpoints::cube_model(&settings, package_id)?;
        debug!(package = package_id, "Fetching descriptor and cube model");

        let (descriptor, cube) = futures::try_join!(
            self.fetcher.get_json(&info_url),
            self.fetcher.get_json(&model_url)
        )?;

        let descriptor: RawDescriptor =
            serde_json::from_value(descriptor).map_err(|e| ApiError::decode(&info_url, e))?;
        let cube: RawCubeResponse =
            serde_json::from_value(cube).map_err(|e| ApiError::decode(&model_url, e))?;

        let package_model = model::build_model(package_id, &descriptor, &cube.model);
        if load_bare_model {
            return Ok(package_model);
        }

        members::load_all_members(
            &self.fetcher,
            &settings,
            package_model,
            None,
            self.config.max_concurrent_member_loads,
        )
        .await
    }

    /// Raw members of one dimension.
    pub async fn load_members_for(
        &self,
        package_id: &str,
        dimension: &Dimension,
    ) -> ApiResult<Vec<MemberValue>> {
        let settings = self.ensure_config(None).await?;
        members::load_members_for(&self.fetcher, &settings, package_id, dimension).await
    }

    /// Load display members for `dimension_ids` (all dimensions when `None`)
    /// into `model`. An empty selection returns the model untouched without
    /// loading settings or members.
    pub async fn load_all_members(
        &self,
        model: PackageModel,
        dimension_ids: Option<&[usize]>,
    ) -> ApiResult<PackageModel> {
        if members::select_targets(&model, dimension_ids).is_empty() {
            return Ok(model);
        }

        let settings = self.ensure_config(None).await?;
        members::load_all_members(
            &self.fetcher,
            &settings,
            model,
            dimension_ids,
            self.config.max_concurrent_member_loads,
        )
        .await
    }
}
