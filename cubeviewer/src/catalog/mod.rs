//! Listing of the packages available on the search endpoint.

mod summary;

pub use summary::{list_packages, trim_author, PackageSummary, RawCatalogEntry, RawCatalogPackage};
