//! Package summaries from the search endpoint.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Settings;
use crate::endpoints;
use crate::error::{ApiError, ApiResult};
use crate::fetch::JsonFetcher;

/// One entry of the search response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCatalogEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub package: RawCatalogPackage,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCatalogPackage {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A package as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageSummary {
    pub id: Option<String>,
    /// Author display name (trailing e-mail token removed).
    pub author: String,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl From<RawCatalogEntry> for PackageSummary {
    fn from(entry: RawCatalogEntry) -> Self {
        Self {
            id: entry.id,
            author: trim_author(entry.package.author.as_deref().unwrap_or_default()),
            title: entry.package.title,
            description: entry.package.description,
        }
    }
}

/// Drop the last space-separated token of an author string.
///
/// Authors are written as `Name <email>`; the e-mail is the last token.
/// Splitting is on single spaces, so runs of spaces are kept as-is.
pub fn trim_author(author: &str) -> String {
    let tokens: Vec<&str> = author.split(' ').collect();
    tokens[..tokens.len() - 1].join(" ")
}

/// Fetch the package list in server order.
pub async fn list_packages<F: JsonFetcher>(
    fetcher: &F,
    settings: &Settings,
    auth_token: Option<&str>,
) -> ApiResult<Vec<PackageSummary>> {
    let url = endpoints::search(settings, auth_token)?;
    let document = fetcher.get_json(&url).await?;

    let entries: Vec<RawCatalogEntry> =
        serde_json::from_value(document).map_err(|e| ApiError::decode(&url, e))?;
    debug!(count = entries.len(), "Fetched package catalog");

    Ok(entries.into_iter().map(PackageSummary::from).collect())
}
