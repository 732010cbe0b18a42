//! On-disk configuration (`config.ini`).
//!
//! ```ini
//! [settings]
//! url = https://viewer.example.org/settings.json
//!
//! [http]
//! timeout_secs = 30
//! user_agent = my-tool/1.0
//!
//! [members]
//! max_concurrent = 8
//!
//! [auth]
//! jwt = eyJhbGciOi...
//! ```
//!
//! Every key is optional. A missing file yields the defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;
use thiserror::Error;

use super::client::ClientConfig;

const SECTION_SETTINGS: &str = "settings";
const SECTION_HTTP: &str = "http";
const SECTION_MEMBERS: &str = "members";
const SECTION_AUTH: &str = "auth";

/// Errors raised while reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid value for [{section}] {key}: {value:?}")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        value: String,
    },
}

/// Parsed `config.ini`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub settings_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
    pub max_concurrent_members: Option<usize>,
    pub jwt: Option<String>,
}

impl ConfigFile {
    /// Default location: `<config dir>/cubeviewer/config.ini`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cubeviewer").join("config.ini"))
    }

    /// Load from the default location, falling back to defaults when there is
    /// no config directory or no file.
    pub fn load() -> Result<Self, ConfigFileError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|source| ConfigFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigFileError> {
        let get = |section: &str, key: &str| {
            ini.get_from(Some(section), key)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Ok(Self {
            settings_url: get(SECTION_SETTINGS, "url"),
            timeout_secs: parse_number(get(SECTION_HTTP, "timeout_secs"), SECTION_HTTP, "timeout_secs")?,
            user_agent: get(SECTION_HTTP, "user_agent"),
            max_concurrent_members: parse_number(
                get(SECTION_MEMBERS, "max_concurrent"),
                SECTION_MEMBERS,
                "max_concurrent",
            )?,
            jwt: get(SECTION_AUTH, "jwt"),
        })
    }

    /// Write the file to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        let write_err = |source| ConfigFileError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let mut ini = Ini::new();
        if let Some(url) = &self.settings_url {
            ini.with_section(Some(SECTION_SETTINGS)).set("url", url.as_str());
        }
        if let Some(secs) = self.timeout_secs {
            ini.with_section(Some(SECTION_HTTP))
                .set("timeout_secs", secs.to_string());
        }
        if let Some(agent) = &self.user_agent {
            ini.with_section(Some(SECTION_HTTP))
                .set("user_agent", agent.as_str());
        }
        if let Some(max) = self.max_concurrent_members {
            ini.with_section(Some(SECTION_MEMBERS))
                .set("max_concurrent", max.to_string());
        }
        if let Some(jwt) = &self.jwt {
            ini.with_section(Some(SECTION_AUTH)).set("jwt", jwt.as_str());
        }

        ini.write_to_file(path).map_err(write_err)
    }

    /// Build a [`ClientConfig`], leaving unset keys at their defaults.
    pub fn to_client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::default();
        if let Some(url) = &self.settings_url {
            config.settings_url = url.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(agent) = &self.user_agent {
            config = config.with_user_agent(agent.clone());
        }
        if let Some(max) = self.max_concurrent_members {
            config = config.with_max_concurrent_member_loads(max);
        }
        config
    }
}

fn parse_number<T: std::str::FromStr>(
    raw: Option<String>,
    section: &'static str,
    key: &'static str,
) -> Result<Option<T>, ConfigFileError> {
    raw.map(|value| {
        value
            .parse()
            .map_err(|_| ConfigFileError::InvalidValue {
                section,
                key,
                value,
            })
    })
    .transpose()
}
