//! Canonical package model consumed by the presentation layer.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Semantic type of a dimension, taken from the descriptor's dimension
/// mappings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DimensionType {
    Location,
    Datetime,
    Other(String),
}

impl From<String> for DimensionType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "location" => DimensionType::Location,
            "datetime" => DimensionType::Datetime,
            _ => DimensionType::Other(value),
        }
    }
}

impl From<&str> for DimensionType {
    fn from(value: &str) -> Self {
        DimensionType::from(value.to_string())
    }
}

impl From<DimensionType> for String {
    fn from(value: DimensionType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for DimensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionType::Location => f.write_str("location"),
            DimensionType::Datetime => f.write_str("datetime"),
            DimensionType::Other(name) => f.write_str(name),
        }
    }
}

/// A data file belonging to the package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub name: Option<String>,
    pub url: String,
}

/// Descriptive metadata of a package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageMeta {
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub author: Option<String>,
    pub country_code: Option<String>,
    pub fact_table: Option<String>,
    /// Address of the package descriptor; base for relative resource paths.
    pub url: String,
    pub resources: Vec<Resource>,
}

/// A measure that can be aggregated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    /// Name of the cube measure.
    pub id: String,
    /// Aggregate reference used in queries.
    pub key: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// One member of a dimension.
///
/// Keys and labels are kept as JSON scalars so numeric keys stay numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberValue {
    pub key: Value,
    pub label: Value,
}

/// A dimension of the cube.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    /// Position of the dimension in the source cube model.
    pub id: usize,
    /// Key of the dimension in the source cube model.
    pub name: String,
    /// Attribute holding member keys.
    pub key: String,
    pub label: String,
    /// Attribute holding member display labels.
    pub value_ref: String,
    pub hierarchy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension_type: Option<DimensionType>,
    #[serde(default)]
    pub values: Vec<MemberValue>,
}

impl Dimension {
    pub fn has_type(&self, dimension_type: &DimensionType) -> bool {
        self.dimension_type.as_ref() == Some(dimension_type)
    }
}

/// A drill-down path through dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hierarchy {
    /// Position of the hierarchy in the source cube model.
    pub id: usize,
    /// Key of the hierarchy in the source cube model.
    pub key: String,
    pub label: String,
    pub dimensions: Vec<Dimension>,
}

/// Normalized description of a data package.
///
/// `measures` and `dimensions` are sorted by label. Hierarchy lists hold
/// copies of the dimensions they reference; [`set_dimension_values`]
/// keeps those copies in step with `dimensions`.
///
/// [`set_dimension_values`]: PackageModel::set_dimension_values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageModel {
    pub id: String,
    pub meta: PackageMeta,
    pub measures: Vec<Measure>,
    pub dimensions: Vec<Dimension>,
    pub hierarchies: Vec<Hierarchy>,
    pub column_hierarchies: Vec<Hierarchy>,
    pub location_hierarchies: Vec<Hierarchy>,
    pub date_time_hierarchies: Vec<Hierarchy>,
}

impl PackageModel {
    /// Look up a dimension by its positional id.
    pub fn dimension(&self, id: usize) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.id == id)
    }

    /// Replace the member values of dimension `id` everywhere it appears.
    ///
    /// Returns `false` when the model has no such dimension.
    pub fn set_dimension_values(&mut self, id: usize, values: Vec<MemberValue>) -> bool {
        let hierarchy_lists = [
            &mut self.hierarchies,
            &mut self.column_hierarchies,
            &mut self.location_hierarchies,
            &mut self.date_time_hierarchies,
        ];
        for list in hierarchy_lists {
            list.iter_mut()
                .flat_map(|h| h.dimensions.iter_mut())
                .filter(|d| d.id == id)
                .for_each(|d| d.values = values.clone());
        }

        match self.dimensions.iter_mut().find(|d| d.id == id) {
            Some(dimension) => {
                dimension.values = values;
                true
            }
            None => false,
        }
    }
}
