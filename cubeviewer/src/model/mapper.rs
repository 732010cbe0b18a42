//! Mapping of raw descriptor + cube model into a [`PackageModel`].
//!
//! Pure and synchronous. Each step is its own function so the mapping rules
//! can be tested in isolation:
//!
//! ```text
//! RawDescriptor ──┬──► map_meta ──────────────────────────► meta
//!                 ├──► map_measures ◄── cube.measures/aggregates
//! RawCubeModel ───┼──► map_dimensions ◄── cube.dimensions
//!                 └──► map_hierarchies ◄── cube.hierarchies + dimensions
//!                          │
//!                          └──► filter_hierarchies_by_type (location, datetime)
//! ```

use reqwest::Url;
use serde_json::Value;
use tracing::{info, warn};

use super::filter::filter_hierarchies_by_type;
use super::raw::{RawCubeModel, RawDescriptor, RawResource};
use super::types::{Dimension, DimensionType, Hierarchy, Measure, PackageMeta, PackageModel, Resource};

/// Datastore used to build a descriptor address when the package does not
/// carry its own origin URL.
pub const DATASTORE_URL: &str = "http://datastore.openspending.org";

/// Build the bare package model (no member values).
pub fn build_model(
    package_id: &str,
    descriptor: &RawDescriptor,
    cube: &RawCubeModel,
) -> PackageModel {
    let dimensions = map_dimensions(descriptor, cube);
    let hierarchies = map_hierarchies(cube, &dimensions);
    let location_hierarchies = filter_hierarchies_by_type(&hierarchies, &DimensionType::Location);
    let date_time_hierarchies = filter_hierarchies_by_type(&hierarchies, &DimensionType::Datetime);

    let model = PackageModel {
        id: package_id.to_string(),
        meta: map_meta(descriptor, Some(cube)),
        measures: map_measures(descriptor, cube),
        dimensions,
        column_hierarchies: hierarchies.clone(),
        hierarchies,
        location_hierarchies,
        date_time_hierarchies,
    };

    info!(
        package = package_id,
        measures = model.measures.len(),
        dimensions = model.dimensions.len(),
        hierarchies = model.hierarchies.len(),
        "Built package model"
    );

    model
}

/// Descriptive metadata, with resource paths resolved against the package URL.
pub fn map_meta(descriptor: &RawDescriptor, cube: Option<&RawCubeModel>) -> PackageMeta {
    let url = descriptor
        .origin_url
        .clone()
        .unwrap_or_else(|| default_descriptor_url(descriptor));

    let resources = descriptor
        .resources
        .iter()
        .flatten()
        .filter_map(|resource| map_resource(&url, resource))
        .collect();

    PackageMeta {
        name: descriptor.name.clone(),
        title: descriptor.title.clone(),
        description: descriptor.description.clone(),
        owner: descriptor.owner.clone(),
        author: descriptor.author.clone(),
        country_code: descriptor
            .country_code
            .as_ref()
            .and_then(|code| code.first())
            .cloned(),
        fact_table: cube.and_then(|c| c.fact_table.clone()),
        url,
        resources,
    }
}

fn default_descriptor_url(descriptor: &RawDescriptor) -> String {
    [
        DATASTORE_URL,
        descriptor.owner.as_deref().unwrap_or_default(),
        descriptor.name.as_deref().unwrap_or_default(),
        "datapackage.json",
    ]
    .join("/")
}

/// A resource with a `path` resolves it against `base`; otherwise its `url`
/// is used verbatim. Resources with neither are dropped.
fn map_resource(base: &str, resource: &RawResource) -> Option<Resource> {
    let url = match (non_empty(&resource.path), non_empty(&resource.url)) {
        (Some(path), _) => resolve_against(base, path),
        (None, Some(url)) => url.to_string(),
        (None, None) => return None,
    };

    Some(Resource {
        name: resource.name.clone(),
        url,
    })
}

fn resolve_against(base: &str, path: &str) -> String {
    match Url::parse(base).and_then(|base| base.join(path)) {
        Ok(url) => url.to_string(),
        Err(e) => {
            warn!(base, path, error = %e, "Cannot resolve resource path; keeping it relative");
            path.to_string()
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Measures built from aggregates whose measure exists in the cube, sorted by
/// label. Currency comes from the descriptor's mapping of the measure's
/// original name.
pub fn map_measures(descriptor: &RawDescriptor, cube: &RawCubeModel) -> Vec<Measure> {
    let mappings = descriptor.model.as_ref().and_then(|m| m.measures.as_ref());

    let mut measures: Vec<Measure> = cube
        .aggregates
        .iter()
        .filter_map(|(_, aggregate)| {
            let measure_name = non_empty(&aggregate.measure)?;
            let measure = cube.measures.get(measure_name)?;

            let currency = mappings
                .zip(measure.orig_measure.as_deref())
                .and_then(|(mappings, original)| mappings.get(original))
                .and_then(|mapping| mapping.currency.clone());

            Some(Measure {
                id: measure_name.to_string(),
                key: aggregate.reference.clone().unwrap_or_default(),
                label: aggregate.label.clone().unwrap_or_default(),
                currency,
            })
        })
        .collect();

    measures.sort_by(|a, b| a.label.cmp(&b.label));
    measures
}

/// Dimensions with positional ids, sorted by label. The dimension type comes
/// from the descriptor's mapping of the dimension's original name.
pub fn map_dimensions(descriptor: &RawDescriptor, cube: &RawCubeModel) -> Vec<Dimension> {
    let mappings = descriptor.model.as_ref().and_then(|m| m.dimensions.as_ref());

    let mut dimensions: Vec<Dimension> = cube
        .dimensions
        .iter()
        .enumerate()
        .map(|(index, (name, dimension))| {
            let key = dimension.key_ref.clone().unwrap_or_default();
            let value_ref = non_empty(&dimension.label_ref)
                .map(str::to_string)
                .unwrap_or_else(|| key.clone());

            let dimension_type = mappings
                .zip(dimension.orig_dimension.as_deref())
                .and_then(|(mappings, original)| mappings.get(original))
                .and_then(|mapping| mapping.dimension_type.clone())
                .map(DimensionType::from);

            Dimension {
                id: index,
                name: name.to_string(),
                key,
                label: dimension.label.clone().unwrap_or_default(),
                value_ref,
                hierarchy: dimension.hierarchy.clone(),
                dimension_type,
                values: Vec::new(),
            }
        })
        .collect();

    dimensions.sort_by(|a, b| a.label.cmp(&b.label));
    dimensions
}

/// Hierarchies with their levels resolved to `dimensions`, sorted by label.
///
/// A level matches a dimension by source name or by positional id. Levels
/// that match nothing are skipped.
pub fn map_hierarchies(cube: &RawCubeModel, dimensions: &[Dimension]) -> Vec<Hierarchy> {
    let mut hierarchies: Vec<Hierarchy> = cube
        .hierarchies
        .iter()
        .enumerate()
        .map(|(index, (key, hierarchy))| {
            let resolved = hierarchy
                .levels
                .iter()
                .filter_map(|level| {
                    let found = resolve_level(level, dimensions);
                    if found.is_none() {
                        warn!(hierarchy = key, level = %level, "Hierarchy level matches no dimension");
                    }
                    found
                })
                .cloned()
                .collect();

            Hierarchy {
                id: index,
                key: key.to_string(),
                label: hierarchy.label.clone().unwrap_or_default(),
                dimensions: resolved,
            }
        })
        .collect();

    hierarchies.sort_by(|a, b| a.label.cmp(&b.label));
    hierarchies
}

fn resolve_level<'a>(level: &Value, dimensions: &'a [Dimension]) -> Option<&'a Dimension> {
    let reference = match level {
        Value::String(name) => name.clone(),
        Value::Number(position) => position.to_string(),
        _ => return None,
    };

    dimensions
        .iter()
        .find(|d| d.name == reference || d.id.to_string() == reference)
}
