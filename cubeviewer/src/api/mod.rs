//! Operations exposed to the presentation layer.
//!
//! [`DataPackageApi`] owns a [`JsonFetcher`](crate::fetch::JsonFetcher) and a
//! settings store and wires the pipeline together:
//!
//! ```text
//! ensure_config ─┬─► list_packages
//!                └─► get_data_package ─► build_model ─► load_all_members
//! ```
//!
//! # Example
//!
//! ```ignore
//! use cubeviewer::api::DataPackageApi;
//! use cubeviewer::config::ClientConfig;
//!
//! let api = DataPackageApi::from_config(ClientConfig::new("https://viewer.example.org/settings.json"))?;
//! let packages = api.list_packages(None).await?;
//! let model = api.get_data_package(packages[0].id.as_deref().unwrap(), false).await?;
//! ```

mod client;

pub use client::DataPackageApi;
