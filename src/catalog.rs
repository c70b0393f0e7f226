//! The browsable list: search/scope, feature buckets, then sort.

use crate::core::{FeatureSelection, ManufacturerScope, VehicleRecord};
use crate::filter::{filter_by_features, filter_by_search_and_scope};
use crate::sort::{sort_vehicles, SortSpec};

/// Current list intent supplied by the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    search_term: String,
    scope: Option<ManufacturerScope>,
    features: Vec<FeatureSelection>,
    sort: SortSpec,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn manufacturer_scope(&self) -> Option<&ManufacturerScope> {
        self.scope.as_ref()
    }

    /// `None` lifts the manufacturer restriction.
    pub fn set_manufacturer_scope(&mut self, scope: Option<ManufacturerScope>) {
        self.scope = scope;
    }

    pub fn feature_selections(&self) -> &[FeatureSelection] {
        &self.features
    }

    pub fn set_feature_selections(&mut self, selections: Vec<FeatureSelection>) {
        self.features = selections;
    }

    pub fn add_feature_selection(&mut self, selection: FeatureSelection) {
        self.features.push(selection);
    }

    pub fn clear_feature_selections(&mut self) {
        self.features.clear();
    }

    pub fn sort_spec(&self) -> SortSpec {
        self.sort
    }

    /// Replace the ordering. Specs never merge.
    pub fn set_sort_spec(&mut self, spec: SortSpec) {
        self.sort = spec;
    }

    /// Run the full pipeline over `records`.
    pub fn apply<'a>(&self, records: &'a [VehicleRecord]) -> Vec<&'a VehicleRecord> {
        let query = Some(self.search_term.as_str());
        let scoped = filter_by_search_and_scope(records, query, self.scope.as_ref());
        let bucketed = filter_by_features(scoped, &self.features);
        let count = bucketed.len();
        let sorted = sort_vehicles(bucketed, self.sort);

        tracing::debug!(
            total = records.len(),
            matched = count,
            sort = %self.sort.display_name(),
            "Applied catalog query"
        );
        sorted
    }
}
