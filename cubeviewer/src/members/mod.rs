//! Dimension member loading.
//!
//! Members are the distinct values of a dimension (`{key, label}` rows from
//! `/cubes/<id>/members/<dimension>`). They are loaded either for a single
//! dimension, returned as-is, or in a batch that formats display labels and
//! merges them into a [`PackageModel`](crate::model::PackageModel).
//!
//! # Batch semantics
//!
//! ```text
//! dimensions ──► buffered(max_concurrent) ──► all Ok? ──► set_dimension_values
//!                     │                          │
//!                     └── first Err ─────────────┴──► whole load fails
//! ```

mod format;
mod loader;

pub use format::{display_member, member_label, raw_member, row_field};
pub use loader::{load_all_members, load_members_for, select_targets};
