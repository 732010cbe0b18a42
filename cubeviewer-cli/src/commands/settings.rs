//! `cubeviewer settings`: print the loaded settings document.

use crate::commands::common::{print_json, CommandContext};
use crate::error::CliError;

pub async fn run(context: &CommandContext) -> Result<(), CliError> {
    let api = context.api()?;
    let settings = api.ensure_config(None).await?;
    print_json(settings.as_ref())
}
