//! The canonical package model and the mapping that produces it.
//!
//! # Overview
//!
//! A package is described by three independently shaped documents:
//!
//! - **Descriptor** (`/info/<id>/package`): datapackage metadata plus the
//!   original measure/dimension mapping tables (currency, dimension type)
//! - **Cube model** (`/cubes/<id>/model`): measures, aggregates, dimensions,
//!   hierarchies as the analytics server exposes them
//! - **Members** (`/cubes/<id>/members/<dim>`): key/label rows per dimension
//!
//! [`build_model`] reconciles the first two into a [`PackageModel`]; member
//! values are merged in later by the [`members`](crate::members) module.
//!
//! # Type Hierarchy
//!
//! ```text
//! PackageModel
//! ├── meta: PackageMeta ── resources: Vec<Resource>
//! ├── measures: Vec<Measure>            (sorted by label)
//! ├── dimensions: Vec<Dimension>        (sorted by label, id = source position)
//! │   └── values: Vec<MemberValue>
//! ├── hierarchies / column_hierarchies: Vec<Hierarchy>
//! │   └── dimensions: Vec<Dimension>    (copies, resolved from levels)
//! └── location_hierarchies / date_time_hierarchies
//! ```

mod filter;
mod mapper;
mod raw;
mod types;

pub use filter::filter_hierarchies_by_type;
pub use mapper::{build_model, map_dimensions, map_hierarchies, map_measures, map_meta, DATASTORE_URL};
pub use raw::{
    Keyed, OneOrMany, RawAggregate, RawCubeDimension, RawCubeMeasure, RawCubeModel,
    RawCubeResponse, RawDescriptor, RawDescriptorModel, RawDimensionMapping, RawHierarchy,
    RawMeasureMapping, RawMembers, RawResource,
};
pub use types::{
    Dimension, DimensionType, Hierarchy, Measure, MemberValue, PackageMeta, PackageModel, Resource,
};
