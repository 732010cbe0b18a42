//! Wire shapes of the package descriptor and the cube model.
//!
//! Every field is optional. Absent fields become `None` (or an empty
//! collection) and are defaulted by the mapper; only a value of the wrong JSON
//! type fails decoding.

use std::collections::HashMap;

use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;

/// A collection that the server may send either as a JSON object keyed by
/// name or as an array.
///
/// Entries keep document order. Array entries are keyed by their index.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyed<T>(pub Vec<(String, T)>);

impl<T> Default for Keyed<T> {
    fn default() -> Self {
        Keyed(Vec::new())
    }
}

impl<T> Keyed<T> {
    pub fn get(&self, key: &str) -> Option<&T> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Keyed<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = match Value::deserialize(deserializer)? {
            Value::Null => Vec::new(),
            Value::Object(map) => map
                .into_iter()
                .map(|(key, value)| serde_json::from_value(value).map(|v| (key, v)))
                .collect::<Result<_, serde_json::Error>>()
                .map_err(D::Error::custom)?,
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, value)| {
                    serde_json::from_value(value).map(|v| (index.to_string(), v))
                })
                .collect::<Result<_, serde_json::Error>>()
                .map_err(D::Error::custom)?,
            other => {
                return Err(D::Error::custom(format!(
                    "expected an object or an array, found {}",
                    other
                )))
            }
        };
        Ok(Keyed(entries))
    }
}

/// A value that may be given once or as a list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// The single value, or the first element of the list.
    pub fn first(&self) -> Option<&T> {
        match self {
            OneOrMany::One(value) => Some(value),
            OneOrMany::Many(values) => values.first(),
        }
    }
}

/// `GET <api>/info/<id>/package`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawDescriptor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, rename = "countryCode")]
    pub country_code: Option<OneOrMany<String>>,
    #[serde(default, rename = "__origin_url")]
    pub origin_url: Option<String>,
    #[serde(default)]
    pub resources: Option<Vec<RawResource>>,
    /// Mapping tables from the original (pre-cube) model.
    #[serde(default)]
    pub model: Option<RawDescriptorModel>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawResource {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawDescriptorModel {
    #[serde(default)]
    pub measures: Option<HashMap<String, RawMeasureMapping>>,
    #[serde(default)]
    pub dimensions: Option<HashMap<String, RawDimensionMapping>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawMeasureMapping {
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawDimensionMapping {
    #[serde(default, rename = "dimensionType")]
    pub dimension_type: Option<String>,
}

/// `GET <api>/cubes/<id>/model` answers `{"model": RawCubeModel}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCubeResponse {
    #[serde(default)]
    pub model: RawCubeModel,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCubeModel {
    #[serde(default)]
    pub measures: Keyed<RawCubeMeasure>,
    #[serde(default)]
    pub aggregates: Keyed<RawAggregate>,
    #[serde(default)]
    pub dimensions: Keyed<RawCubeDimension>,
    #[serde(default)]
    pub hierarchies: Keyed<RawHierarchy>,
    #[serde(default)]
    pub fact_table: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCubeMeasure {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, rename = "ref")]
    pub reference: Option<String>,
    /// Name of the measure in the descriptor's mapping table.
    #[serde(default)]
    pub orig_measure: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawAggregate {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, rename = "ref")]
    pub reference: Option<String>,
    /// Name of the cube measure this aggregate is computed from.
    #[serde(default)]
    pub measure: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCubeDimension {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub key_ref: Option<String>,
    #[serde(default)]
    pub label_ref: Option<String>,
    #[serde(default)]
    pub hierarchy: Option<String>,
    /// Name of the dimension in the descriptor's mapping table.
    #[serde(default)]
    pub orig_dimension: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawHierarchy {
    #[serde(default)]
    pub label: Option<String>,
    /// Dimension references, by name or by position.
    #[serde(default)]
    pub levels: Vec<Value>,
}

/// `GET <api>/cubes/<id>/members/<dimension>`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawMembers {
    #[serde(default)]
    pub data: Vec<serde_json::Map<String, Value>>,
}
