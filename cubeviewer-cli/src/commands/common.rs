//! Common types and utilities shared across CLI commands.

use std::io::{self, Write};
use std::path::Path;

use cubeviewer::config::{ClientConfig, ConfigFile};
use cubeviewer::{DataPackageApi, ReqwestFetcher};
use serde::Serialize;
use tracing::debug;

use crate::error::CliError;

/// Configuration resolved from the config file and global flags.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub file: ConfigFile,
    pub client: ClientConfig,
}

impl CommandContext {
    /// Load `config_path` (or the default config file) and apply overrides.
    /// Flags take precedence over the file.
    pub fn load(config_path: Option<&Path>, settings_url: Option<String>) -> Result<Self, CliError> {
        let file = match config_path {
            Some(path) => ConfigFile::load_from(path)?,
            None => ConfigFile::load()?,
        };
        let context = Self::from_file(file, settings_url);
        debug!(
            config = ?config_path,
            settings_url = %context.client.settings_url,
            "Resolved configuration"
        );
        Ok(context)
    }

    pub fn from_file(file: ConfigFile, settings_url: Option<String>) -> Self {
        let mut client = file.to_client_config();
        if let Some(url) = settings_url {
            client.settings_url = url;
        }
        Self { file, client }
    }

    /// API client backed by reqwest.
    pub fn api(&self) -> Result<DataPackageApi<ReqwestFetcher>, CliError> {
        Ok(DataPackageApi::from_config(self.client.clone())?)
    }

    /// Search token: the flag wins, then `[auth] jwt`.
    pub fn jwt(&self, cli_jwt: Option<String>) -> Option<String> {
        cli_jwt.or_else(|| self.file.jwt.clone())
    }
}

/// Pretty-print `value` as JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    write_json(io::stdout().lock(), value)
}

fn write_json<W: Write, T: Serialize + ?Sized>(mut out: W, value: &T) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out).map_err(serde_json::Error::io)?;
    out.flush().map_err(serde_json::Error::io)?;
    Ok(())
}
