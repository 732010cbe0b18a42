//! CLI error type.

use std::io;

use cubeviewer::config::ConfigFileError;
use cubeviewer::ApiError;

/// Errors surfaced by CLI commands. `main` prints them and exits with 1.
#[derive(Debug)]
pub enum CliError {
    /// The configuration file could not be read or holds a bad value.
    ConfigFile(ConfigFileError),

    /// A library operation failed.
    Api(ApiError),

    /// The dimension id does not exist in the package model.
    UnknownDimension {
        package_id: String,
        dimension_id: usize,
    },

    /// Failed to serialize command output.
    Output(serde_json::Error),

    /// Failed to start the async runtime.
    Runtime(io::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigFile(e) => write!(f, "configuration error: {}", e),
            Self::Api(e) => write!(f, "{}", e),
            Self::UnknownDimension {
                package_id,
                dimension_id,
            } => {
                write!(
                    f,
                    "package {} has no dimension with id {}",
                    package_id, dimension_id
                )
            }
            Self::Output(e) => write!(f, "failed to write output: {}", e),
            Self::Runtime(e) => write!(f, "failed to start runtime: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigFile(e) => Some(e),
            Self::Api(e) => Some(e),
            Self::Output(e) => Some(e),
            Self::Runtime(e) => Some(e),
            Self::UnknownDimension { .. } => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        Self::ConfigFile(e)
    }
}

impl From<ApiError> for CliError {
    fn from(e: ApiError) -> Self {
        Self::Api(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Output(e)
    }
}
