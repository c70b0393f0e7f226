// Export modules for library usage
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod compare;
pub mod config;
pub mod core;
pub mod filter;
pub mod formatting;
pub mod io;
pub mod observability;
pub mod sort;

// Re-export commonly used types
pub use crate::core::{
    CatalogError, DetailRecord, FeatureBucket, FeatureCategory, FeatureSelection,
    ManufacturerScope, Result, VehicleId, VehicleRecord,
};

pub use crate::catalog::CatalogQuery;

pub use crate::filter::{filter_by_features, filter_by_search_and_scope, FeatureCatalog};

pub use crate::sort::{sort_vehicles, SortDirection, SortField, SortSpec};

pub use crate::compare::{
    best_value, resolve_comparison, AddOutcome, CapacityPolicy, CompareEvent, CompareOutcome,
    CompareSelection, ComparisonLoader, ComparisonMatrix, DetailResolver, MatrixState, Viewport,
};

pub use crate::io::{CatalogData, FileDetailResolver, FileRecordSource, RecordSource};
