//! Configuration: the remote settings document, the store that caches it,
//! and the local client configuration.
//!
//! Two layers are involved:
//!
//! - **Remote settings** ([`Settings`]): the `settings.json` document that
//!   tells the client where the cube API and the package search live. Held by
//!   a [`ConfigStore`] and reloaded on demand.
//! - **Local configuration** ([`ClientConfig`], [`ConfigFile`]): where to find
//!   the settings document, HTTP timeouts, member-load concurrency. Read from
//!   `config.ini` by the CLI.

mod client;
mod file;
mod settings;
mod store;

pub use client::{ClientConfig, DEFAULT_MAX_CONCURRENT_MEMBER_LOADS};
pub use file::{ConfigFile, ConfigFileError};
pub use settings::{Endpoint, Settings, DEFAULT_SETTINGS_URL};
pub use store::ConfigStore;
