//! `cubeviewer packages`: list the packages on the search endpoint.

use crate::commands::common::{print_json, CommandContext};
use crate::error::CliError;

/// Print the package summaries in server order.
pub async fn run(context: &CommandContext, jwt: Option<String>) -> Result<(), CliError> {
    let api = context.api()?;
    let token = context.jwt(jwt);
    let packages = api.list_packages(token.as_deref()).await?;
    print_json(&packages)
}
