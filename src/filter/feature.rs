//! Feature-bucket filtering: OR within a category, AND across categories.
//!
//! Selections are grouped by category name. Each group contributes the union
//! of its member ids, and a record survives only if its id is in every
//! group's union. A category whose union is empty therefore excludes every
//! record, and an empty selection list excludes nothing.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::{FeatureCategory, FeatureSelection, VehicleId, VehicleRecord};

/// Union of member ids per category, keyed by category name.
pub fn category_unions(selections: &[FeatureSelection]) -> BTreeMap<&str, BTreeSet<VehicleId>> {
    selections
        .iter()
        .fold(BTreeMap::new(), |mut groups, selection| {
            groups
                .entry(selection.category_name.as_str())
                .or_insert_with(BTreeSet::new)
                .extend(selection.member_ids.iter().copied());
            groups
        })
}

/// Keep records whose id is in every category's union, in input order.
pub fn filter_by_features<'a, I>(records: I, selections: &[FeatureSelection]) -> Vec<&'a VehicleRecord>
where
    I: IntoIterator<Item = &'a VehicleRecord>,
{
    let unions = category_unions(selections);
    records
        .into_iter()
        .filter(|record| unions.values().all(|members| members.contains(&record.id)))
        .collect()
}

/// Bucket definitions published by the record source.
#[derive(Debug, Clone, Default)]
pub struct FeatureCatalog {
    categories: Vec<FeatureCategory>,
}

impl FeatureCatalog {
    pub fn new(categories: Vec<FeatureCategory>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[FeatureCategory] {
        &self.categories
    }

    /// Snapshot a bucket into a selection.
    ///
    /// Category and bucket names compare case-insensitively. An unknown
    /// category or bucket produces a selection with no members, which
    /// filters out every record.
    pub fn select(&self, category: &str, bucket: &str) -> FeatureSelection {
        let known_category = self
            .categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(category));
        let members = known_category
            .and_then(|c| c.buckets.iter().find(|b| b.name.eq_ignore_ascii_case(bucket)))
            .map(|b| b.car_id_list.clone());

        if members.is_none() {
            tracing::warn!(category, bucket, "Unknown feature bucket, selection will match nothing");
        }

        // Grouping is by exact name, so use the canonical spelling when known.
        let category_name = known_category.map_or(category, |c| c.name.as_str());
        FeatureSelection {
            category_name: category_name.to_string(),
            bucket_name: bucket.to_string(),
            member_ids: members.unwrap_or_default(),
        }
    }

    /// Parse a `Category:Bucket` pair and snapshot it.
    ///
    /// A value without a colon is treated as a category with an unnamed bucket.
    pub fn select_spec(&self, spec: &str) -> FeatureSelection {
        let (category, bucket) = spec.split_once(':').unwrap_or((spec, ""));
        self.select(category.trim(), bucket.trim())
    }
}
