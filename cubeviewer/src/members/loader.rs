//! Fetching member lists from the cube API.

use futures::stream::{self, StreamExt, TryStreamExt};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::format::{display_member, raw_member};
use crate::config::Settings;
use crate::endpoints;
use crate::error::{ApiError, ApiResult};
use crate::fetch::JsonFetcher;
use crate::model::{Dimension, MemberValue, PackageModel, RawMembers};

/// Members of one dimension, as `{key, label}` pairs read from the
/// dimension's key and label attributes.
pub async fn load_members_for<F: JsonFetcher>(
    fetcher: &F,
    settings: &Settings,
    package_id: &str,
    dimension: &Dimension,
) -> ApiResult<Vec<MemberValue>> {
    let rows = fetch_rows(fetcher, settings, package_id, dimension).await?;
    Ok(rows.iter().map(|row| raw_member(dimension, row)).collect())
}

/// Ids of the dimensions a batch load should cover.
///
/// `None` selects every dimension of the model. Unknown ids are skipped.
pub fn select_targets(model: &PackageModel, dimension_ids: Option<&[usize]>) -> Vec<usize> {
    match dimension_ids {
        None => model.dimensions.iter().map(|d| d.id).collect(),
        Some(ids) => ids
            .iter()
            .copied()
            .filter(|id| {
                let known = model.dimension(*id).is_some();
                if !known {
                    warn!(package = %model.id, dimension = id, "Unknown dimension id; skipping");
                }
                known
            })
            .collect(),
    }
}

/// Load display members for several dimensions and merge them into `model`.
///
/// At most `max_concurrent` requests are in flight. Values are written only
/// after every request succeeded; the first failure fails the whole load and
/// leaves no partial values behind. An empty selection returns the model
/// without any request.
pub async fn load_all_members<F: JsonFetcher>(
    fetcher: &F,
    settings: &Settings,
    mut model: PackageModel,
    dimension_ids: Option<&[usize]>,
    max_concurrent: usize,
) -> ApiResult<PackageModel> {
    let targets = select_targets(&model, dimension_ids);
    if targets.is_empty() {
        return Ok(model);
    }

    let loaded: Vec<(usize, Vec<MemberValue>)> = {
        let dimensions: Vec<&Dimension> = targets
            .iter()
            .filter_map(|id| model.dimension(*id))
            .collect();
        let package_id = model.id.as_str();

        stream::iter(dimensions)
            .map(|dimension| async move {
                let rows = fetch_rows(fetcher, settings, package_id, dimension).await?;
                let values: Vec<MemberValue> =
                    rows.iter().map(|row| display_member(dimension, row)).collect();
                Ok::<_, ApiError>((dimension.id, values))
            })
            .buffered(max_concurrent.max(1))
            .try_collect()
            .await?
    };

    for (id, values) in loaded {
        model.set_dimension_values(id, values);
    }

    info!(package = %model.id, dimensions = targets.len(), "Loaded dimension members");
    Ok(model)
}

async fn fetch_rows<F: JsonFetcher>(
    fetcher: &F,
    settings: &Settings,
    package_id: &str,
    dimension: &Dimension,
) -> ApiResult<Vec<Map<String, Value>>> {
    let url = endpoints::members(settings, package_id, &dimension.name)?;
    let document = fetcher.get_json(&url).await?;
    let members: RawMembers =
        serde_json::from_value(document).map_err(|e| ApiError::decode(&url, e))?;

    debug!(url, rows = members.data.len(), "Fetched members");
    Ok(members.data)
}
