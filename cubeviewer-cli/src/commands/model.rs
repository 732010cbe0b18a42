//! `cubeviewer model`: print a package model.

use crate::commands::common::{print_json, CommandContext};
use crate::error::CliError;

/// Print the package model, with member values unless `bare` is set.
pub async fn run(context: &CommandContext, package_id: &str, bare: bool) -> Result<(), CliError> {
    let api = context.api()?;
    let model = api.get_data_package(package_id, bare).await?;
    print_json(&model)
}
