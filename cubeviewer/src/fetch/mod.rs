//! JSON download abstraction.
//!
//! Every remote document the pipeline touches (settings, search results,
//! package descriptors, cube models, member lists) is fetched through the
//! [`JsonFetcher`] trait. Production code uses [`ReqwestFetcher`]; tests inject
//! a mock with canned per-URL responses.
//!
//! ```ignore
//! use cubeviewer::fetch::{JsonFetcher, ReqwestFetcher};
//!
//! let fetcher = ReqwestFetcher::new()?;
//! let settings = fetcher.get_json("https://viewer.example.org/settings.json").await?;
//! ```

mod error;
mod http;

pub use error::FetchError;
pub use http::{JsonFetcher, ReqwestFetcher, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

#[cfg(test)]
pub use http::tests::MockJsonFetcher;
