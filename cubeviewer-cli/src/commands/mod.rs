//! CLI command implementations.
//!
//! Every command loads the settings document first and prints its result as
//! pretty JSON on stdout. Logs go to stderr.

pub mod common;
pub mod members;
pub mod model;
pub mod packages;
pub mod settings;
