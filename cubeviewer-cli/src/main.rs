//! Cubeviewer CLI - Command-line interface
//!
//! Inspect OpenSpending data packages: list the catalog, print normalized
//! package models, and look at dimension members. Output is JSON on stdout.

mod commands;
mod error;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::common::CommandContext;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "cubeviewer")]
#[command(version = cubeviewer::VERSION)]
#[command(about = "Inspect normalized OpenSpending data packages", long_about = None)]
struct Cli {
    /// Path to config.ini (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// URL of the settings document, overrides [settings] url
    #[arg(long, global = true, value_name = "URL")]
    settings_url: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the packages available on the search endpoint
    Packages {
        /// Search token, overrides [auth] jwt
        #[arg(long)]
        jwt: Option<String>,
    },

    /// Print the normalized model of a package
    Model {
        /// Package id as listed by `packages`
        package_id: String,

        /// Skip loading dimension members
        #[arg(long)]
        bare: bool,
    },

    /// Print the raw members of one dimension
    Members {
        /// Package id as listed by `packages`
        package_id: String,

        /// Positional dimension id as shown by `model`
        dimension_id: usize,
    },

    /// Print the loaded settings document
    Settings,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr so stdout stays valid JSON. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: bool) {
    let default = if verbose { "cubeviewer=debug,warn" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let context = CommandContext::load(cli.config.as_deref(), cli.settings_url)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;

    runtime.block_on(async {
        match cli.command {
            Commands::Packages { jwt } => commands::packages::run(&context, jwt).await,
            Commands::Model { package_id, bare } => {
                commands::model::run(&context, &package_id, bare).await
            }
            Commands::Members {
                package_id,
                dimension_id,
            } => commands::members::run(&context, &package_id, dimension_id).await,
            Commands::Settings => commands::settings::run(&context).await,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_model_command() {
        let cli = Cli::try_parse_from(["cubeviewer", "model", "pkg1", "--bare", "-v"]).unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Model { package_id, bare } => {
                assert_eq!(package_id, "pkg1");
                assert!(bare);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "cubeviewer",
            "packages",
            "--jwt",
            "token",
            "--settings-url",
            "https://viewer.example.org/settings.json",
        ])
        .unwrap();

        assert_eq!(
            cli.settings_url.as_deref(),
            Some("https://viewer.example.org/settings.json")
        );
        assert!(matches!(cli.command, Commands::Packages { jwt: Some(ref t) } if t == "token"));
    }

    #[test]
    fn test_members_requires_numeric_dimension_id() {
        assert!(Cli::try_parse_from(["cubeviewer", "members", "pkg1", "admin"]).is_err());
        assert!(Cli::try_parse_from(["cubeviewer", "members", "pkg1", "2"]).is_ok());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
