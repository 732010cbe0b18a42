//! `cubeviewer members`: print the raw members of one dimension.

use cubeviewer::{Dimension, PackageModel};

use crate::commands::common::{print_json, CommandContext};
use crate::error::CliError;

/// Print `{key, label}` pairs for the dimension with `dimension_id`.
pub async fn run(
    context: &CommandContext,
    package_id: &str,
    dimension_id: usize,
) -> Result<(), CliError> {
    let api = context.api()?;
    let model = api.get_data_package(package_id, true).await?;
    let dimension = find_dimension(&model, dimension_id)?;
    let members = api.load_members_for(package_id, dimension).await?;
    print_json(&members)
}

fn find_dimension(model: &PackageModel, dimension_id: usize) -> Result<&Dimension, CliError> {
    model
        .dimension(dimension_id)
        .ok_or_else(|| CliError::UnknownDimension {
            package_id: model.id.clone(),
            dimension_id,
        })
}
