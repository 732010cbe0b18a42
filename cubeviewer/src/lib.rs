//! Cubeviewer - client library for normalized OpenSpending data packages
//!
//! The library loads a viewer settings document, talks to the OpenSpending
//! search and cube APIs, and turns their raw responses into a
//! presentation-ready [`PackageModel`]: metadata, measures, dimensions,
//! hierarchies grouped by semantic type, and dimension members with display
//! labels.
//!
//! # Architecture
//!
//! ```text
//! api::DataPackageApi
//!   ├── config   settings snapshot (single-flight reload), client options
//!   ├── catalog  package search
//!   ├── model    raw documents ─► PackageModel (pure)
//!   └── members  bounded fan-out of member requests
//!         │
//!         ▼
//!   endpoints ─► fetch::JsonFetcher (reqwest in production, mocks in tests)
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod fetch;
pub mod members;
pub mod model;

pub use api::DataPackageApi;
pub use catalog::PackageSummary;
pub use config::{ClientConfig, Settings};
pub use error::{ApiError, ApiResult};
pub use fetch::{FetchError, JsonFetcher, ReqwestFetcher};
pub use model::{Dimension, DimensionType, Hierarchy, Measure, MemberValue, PackageMeta, PackageModel};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
