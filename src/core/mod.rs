pub mod errors;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub use errors::{CatalogError, Result};

/// Identity of a vehicle record across every collection.
pub type VehicleId = u32;

/// A vehicle summary as shown in the browsable list.
///
/// Records are read-only to the engine: filters and sorts hand back
/// references into the caller's collection.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    pub id: VehicleId,
    #[serde(default)]
    pub make_name: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub submodel: String,
    #[serde(default)]
    pub generation: String,
    #[serde(default)]
    pub make_model_slug: String,
    #[serde(default)]
    pub current_price: f64,
    #[serde(default)]
    pub acceleration_zero_to_sixty: Option<f64>,
    #[serde(default)]
    pub top_speed: Option<f64>,
    #[serde(default)]
    pub epa_range: Option<f64>,
    #[serde(default)]
    pub battery_capacity: Option<f64>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    /// Release date in a lexicographically sortable form (`YYYY-MM-DD`).
    #[serde(default)]
    pub trim_first_released: Option<String>,
}

impl VehicleRecord {
    /// `"{make} {model}"`, the key used for name ordering.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.make_name, self.model)
    }
}

/// A manufacturer and the closed set of vehicle ids it owns.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ManufacturerScope {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub car_id_list: BTreeSet<VehicleId>,
}

impl ManufacturerScope {
    pub fn contains(&self, id: VehicleId) -> bool {
        self.car_id_list.contains(&id)
    }

    /// Case-insensitive match on name or slug.
    pub fn matches_key(&self, key: &str) -> bool {
        self.name.eq_ignore_ascii_case(key)
            || self
                .slug
                .as_deref()
                .is_some_and(|slug| slug.eq_ignore_ascii_case(key))
    }
}

/// One chosen bucket, snapshotted at selection time.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSelection {
    pub category_name: String,
    pub bucket_name: String,
    pub member_ids: BTreeSet<VehicleId>,
}

impl FeatureSelection {
    pub fn new(
        category_name: impl Into<String>,
        bucket_name: impl Into<String>,
        member_ids: impl IntoIterator<Item = VehicleId>,
    ) -> Self {
        Self {
            category_name: category_name.into(),
            bucket_name: bucket_name.into(),
            member_ids: member_ids.into_iter().collect(),
        }
    }
}

/// A named bucket within a feature category, as published by the record source.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeatureBucket {
    pub name: String,
    #[serde(default)]
    pub car_id_list: BTreeSet<VehicleId>,
}

/// A feature category ("Price", "Range", ...) and its buckets.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeatureCategory {
    pub name: String,
    #[serde(default)]
    pub buckets: Vec<FeatureBucket>,
}

/// Full attribute set for one vehicle, used by the comparison matrix.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DetailRecord {
    pub id: VehicleId,
    pub make_name: String,
    pub model: String,
    pub submodel: String,
    pub current_price: Option<f64>,
    pub epa_range: Option<f64>,
    pub battery_capacity: Option<f64>,
    pub acceleration_zero_to_sixty: Option<f64>,
    pub top_speed: Option<f64>,
    pub horsepower: Option<f64>,
    pub torque: Option<f64>,
    /// Peak DC fast-charge power in kW.
    pub charging_speed: Option<f64>,
    pub curb_weight: Option<f64>,
    pub seating_capacity: Option<f64>,
    pub cargo_volume: Option<f64>,
    pub average_rating: Option<f64>,
    pub drivetrain: Option<String>,
    pub body_style: Option<String>,
}

impl DetailRecord {
    pub fn display_name(&self) -> String {
        if self.submodel.is_empty() {
            format!("{} {}", self.make_name, self.model)
        } else {
            format!("{} {} {}", self.make_name, self.model, self.submodel)
        }
    }
}
