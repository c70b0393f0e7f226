//! Sort functionality for vehicle lists.
//!
//! Every field has one comparator. Direction is a sign applied to the
//! comparator's result, and the underlying sort is stable, so records with
//! equal keys keep their input order in both directions.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::core::VehicleRecord;

/// Field a vehicle list can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    /// `"{make} {model}"`, compared case-insensitively
    Name,
    CurrentPrice,
    EpaRange,
    BatteryCapacity,
    AccelerationZeroToSixty,
    TopSpeed,
    AverageRating,
    /// Release date string; absent dates sort as the empty string
    TrimFirstReleased,
    /// Input order. Unrecognised field names resolve here.
    #[default]
    Insertion,
}

impl SortField {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SortField::Name => "Name",
            SortField::CurrentPrice => "Price",
            SortField::EpaRange => "EPA Range",
            SortField::BatteryCapacity => "Battery Capacity",
            SortField::AccelerationZeroToSixty => "0-60 mph",
            SortField::TopSpeed => "Top Speed",
            SortField::AverageRating => "Rating",
            SortField::TrimFirstReleased => "Release Date",
            SortField::Insertion => "Default",
        }
    }

    /// Get all sortable fields
    pub fn all() -> &'static [SortField] {
        &[
            SortField::Name,
            SortField::CurrentPrice,
            SortField::EpaRange,
            SortField::BatteryCapacity,
            SortField::AccelerationZeroToSixty,
            SortField::TopSpeed,
            SortField::AverageRating,
            SortField::TrimFirstReleased,
        ]
    }

    /// Resolve a record key or short alias. Unknown keys keep input order.
    pub fn parse(key: &str) -> SortField {
        match key.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "name" | "displayname" | "makemodel" => SortField::Name,
            "currentprice" | "price" => SortField::CurrentPrice,
            "eparange" | "range" => SortField::EpaRange,
            "batterycapacity" | "battery" => SortField::BatteryCapacity,
            "accelerationzerotosixty" | "acceleration" | "060" => {
                SortField::AccelerationZeroToSixty
            }
            "topspeed" | "speed" => SortField::TopSpeed,
            "averagerating" | "rating" => SortField::AverageRating,
            "trimfirstreleased" | "released" | "date" => SortField::TrimFirstReleased,
            other => {
                tracing::debug!(field = other, "Unknown sort field, keeping input order");
                SortField::Insertion
            }
        }
    }

    fn numeric_key(&self, record: &VehicleRecord) -> Option<f64> {
        let value = match self {
            SortField::CurrentPrice => Some(record.current_price),
            SortField::EpaRange => record.epa_range,
            SortField::BatteryCapacity => record.battery_capacity,
            SortField::AccelerationZeroToSixty => record.acceleration_zero_to_sixty,
            SortField::TopSpeed => record.top_speed,
            SortField::AverageRating => record.average_rating,
            _ => return None,
        };
        // Absent and non-finite numbers compare as zero.
        Some(value.filter(|v| v.is_finite()).unwrap_or(0.0))
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// `asc`/`ascending` or `desc`/`descending`; anything else is ascending.
    pub fn parse(value: &str) -> SortDirection {
        match value.trim().to_ascii_lowercase().as_str() {
            "desc" | "descending" => SortDirection::Descending,
            _ => SortDirection::Ascending,
        }
    }

    /// Whether `value` names a direction `parse` understands.
    pub fn is_known(value: &str) -> bool {
        matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "asc" | "ascending" | "desc" | "descending"
        )
    }

    /// +1 for ascending, -1 for descending.
    pub fn multiplier(&self) -> i8 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }

    /// Scale a comparator result by the direction multiplier.
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        (ordering as i8 * self.multiplier()).cmp(&0)
    }

    pub fn toggled(&self) -> SortDirection {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Field plus direction. A new spec replaces the old ordering entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn ascending(field: SortField) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    pub fn descending(field: SortField) -> Self {
        Self::new(field, SortDirection::Descending)
    }

    pub fn parse(field: &str, direction: &str) -> Self {
        Self::new(SortField::parse(field), SortDirection::parse(direction))
    }

    pub fn display_name(&self) -> String {
        let arrow = match self.direction {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        };
        format!("{} ({})", self.field.display_name(), arrow)
    }
}

/// Compare two records on one field, ascending.
pub fn compare_by_field(a: &VehicleRecord, b: &VehicleRecord, field: SortField) -> Ordering {
    match field {
        SortField::Name => locale_compare(&a.display_name(), &b.display_name()),
        SortField::TrimFirstReleased => {
            let date_a = a.trim_first_released.as_deref().unwrap_or("");
            let date_b = b.trim_first_released.as_deref().unwrap_or("");
            date_a.cmp(date_b)
        }
        SortField::Insertion => Ordering::Equal,
        numeric => {
            let key_a = numeric.numeric_key(a).unwrap_or(0.0);
            let key_b = numeric.numeric_key(b).unwrap_or(0.0);
            key_a.partial_cmp(&key_b).unwrap_or(Ordering::Equal)
        }
    }
}

/// Precomputed collation levels for one display name.
///
/// Primary folds case and strips diacritics, so "Škoda" files under "s".
/// Secondary keeps the accents, tertiary keeps the case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollationKey {
    primary: String,
    secondary: String,
    original: String,
}

impl CollationKey {
    pub fn new(value: &str) -> Self {
        let secondary = value.to_lowercase();
        let primary = secondary
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .collect();
        Self {
            primary,
            secondary,
            original: value.to_string(),
        }
    }
}

impl Ord for CollationKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.primary
            .cmp(&other.primary)
            .then_with(|| self.secondary.cmp(&other.secondary))
            .then_with(|| lowercase_first(&self.original, &other.original))
    }
}

impl PartialOrd for CollationKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn lowercase_first(a: &str, b: &str) -> Ordering {
    a.chars()
        .zip(b.chars())
        .find_map(|(ca, cb)| match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) => Some(Ordering::Less),
            (false, true) => Some(Ordering::Greater),
            _ => None,
        })
        .unwrap_or_else(|| a.cmp(b))
}

/// Accent- and case-insensitive string ordering.
///
/// Strings equal after folding fall back to accents, then to a
/// lowercase-first comparison, so the order stays total.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}

/// Produce a new ordering of `records` according to `spec`.
///
/// The sort is stable and leaves the caller's collection untouched.
pub fn sort_vehicles<'a, I>(records: I, spec: SortSpec) -> Vec<&'a VehicleRecord>
where
    I: IntoIterator<Item = &'a VehicleRecord>,
{
    let mut sorted: Vec<&'a VehicleRecord> = records.into_iter().collect();
    if spec.field == SortField::Insertion {
        return sorted;
    }

    match spec.field {
        // Build the name keys once instead of per comparison.
        SortField::Name => {
            let mut keyed: Vec<(CollationKey, &'a VehicleRecord)> = sorted
                .into_iter()
                .map(|r| (CollationKey::new(&r.display_name()), r))
                .collect();
            keyed.sort_by(|(a, _), (b, _)| spec.direction.apply(a.cmp(b)));
            sorted = keyed.into_iter().map(|(_, r)| r).collect();
        }
        field => {
            sorted.sort_by(|a, b| spec.direction.apply(compare_by_field(a, b, field)));
        }
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn priced(id: u32, price: f64) -> VehicleRecord {
        VehicleRecord {
            id,
            current_price: price,
            ..Default::default()
        }
    }

    fn named(id: u32, make: &str, model: &str) -> VehicleRecord {
        VehicleRecord {
            id,
            make_name: make.into(),
            model: model.into(),
            ..Default::default()
        }
    }

    fn ids(records: &[&VehicleRecord]) -> Vec<u32> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_price_descending_keeps_ties_in_input_order() {
        let cars: Vec<_> = [30000.0, 45000.0, 45000.0, 60000.0, 80000.0]
            .into_iter()
            .enumerate()
            .map(|(i, p)| priced(i as u32 + 1, p))
            .collect();
        let sorted = sort_vehicles(&cars, SortSpec::descending(SortField::CurrentPrice));
        assert_eq!(ids(&sorted), vec![5, 4, 2, 3, 1]);
    }

    #[test]
    fn test_price_ascending() {
        let cars = vec![priced(1, 50.0), priced(2, 10.0), priced(3, 30.0)];
        let sorted = sort_vehicles(&cars, SortSpec::ascending(SortField::CurrentPrice));
        assert_eq!(ids(&sorted), vec![2, 3, 1]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let cars = vec![priced(1, 50.0), priced(2, 10.0)];
        let _ = sort_vehicles(&cars, SortSpec::ascending(SortField::CurrentPrice));
        assert_eq!(cars[0].id, 1);
        assert_eq!(cars[1].id, 2);
    }

    #[test]
    fn test_absent_numbers_sort_as_zero() {
        let mut fast = priced(1, 0.0);
        fast.top_speed = Some(155.0);
        let unknown = priced(2, 0.0);
        let mut slow = priced(3, 0.0);
        slow.top_speed = Some(-1.0);

        let cars = vec![fast, unknown, slow];
        let sorted = sort_vehicles(&cars, SortSpec::ascending(SortField::TopSpeed));
        assert_eq!(ids(&sorted), vec![3, 2, 1]);
    }

    #[test]
    fn test_non_finite_numbers_sort_as_zero() {
        let mut nan = priced(1, 0.0);
        nan.epa_range = Some(f64::NAN);
        let mut long = priced(2, 0.0);
        long.epa_range = Some(300.0);
        let mut short = priced(3, 0.0);
        short.epa_range = Some(100.0);
        let mut infinite = priced(4, 0.0);
        infinite.epa_range = Some(f64::INFINITY);
        let unknown = priced(5, 0.0);

        let cars = vec![long, nan, short, infinite, unknown];
        let asc = sort_vehicles(&cars, SortSpec::ascending(SortField::EpaRange));
        assert_eq!(ids(&asc), vec![1, 4, 5, 3, 2]);
        let desc = sort_vehicles(&cars, SortSpec::descending(SortField::EpaRange));
        assert_eq!(ids(&desc), vec![2, 3, 1, 4, 5]);
    }

    #[test]
    fn test_absent_release_dates_sort_first_ascending() {
        let mut newer = priced(1, 0.0);
        newer.trim_first_released = Some("2024-03-01".into());
        let undated = priced(2, 0.0);
        let mut older = priced(3, 0.0);
        older.trim_first_released = Some("2019-11-15".into());

        let cars = vec![newer, undated, older];
        let asc = sort_vehicles(&cars, SortSpec::ascending(SortField::TrimFirstReleased));
        assert_eq!(ids(&asc), vec![2, 3, 1]);
        let desc = sort_vehicles(&cars, SortSpec::descending(SortField::TrimFirstReleased));
        assert_eq!(ids(&desc), vec![1, 3, 2]);
    }

    #[test]
    fn test_name_sort_ignores_case() {
        let cars = vec![
            named(1, "polestar", "2"),
            named(2, "BMW", "i4"),
            named(3, "Audi", "e-tron"),
        ];
        let sorted = sort_vehicles(&cars, SortSpec::ascending(SortField::Name));
        assert_eq!(ids(&sorted), vec![3, 2, 1]);
    }

    #[test]
    fn test_name_sort_files_accented_letters_with_base_letter() {
        let cars = vec![
            named(1, "Volvo", "EX30"),
            named(2, "Škoda", "Enyaq"),
            named(3, "Citroën", "ë-C4"),
            named(4, "Tesla", "Model 3"),
        ];
        let sorted = sort_vehicles(&cars, SortSpec::ascending(SortField::Name));
        assert_eq!(ids(&sorted), vec![3, 2, 4, 1]);
        assert_eq!(locale_compare("Škoda Enyaq", "Volvo EX30"), Ordering::Less);
    }

    #[test]
    fn test_locale_compare_breaks_accent_ties_after_base_letters() {
        assert_eq!(locale_compare("Skoda", "Škoda"), Ordering::Less);
        assert_eq!(locale_compare("Škoda", "Skodb"), Ordering::Less);
        assert_eq!(locale_compare("škoda", "Škoda"), Ordering::Less);
    }

    #[test]
    fn test_locale_compare_lowercase_first_on_fold_tie() {
        assert_eq!(locale_compare("bmw i4", "BMW i4"), Ordering::Less);
        assert_eq!(locale_compare("BMW i4", "bmw i4"), Ordering::Greater);
        assert_eq!(locale_compare("Kia", "Kia"), Ordering::Equal);
    }

    #[test]
    fn test_unknown_field_keeps_insertion_order() {
        let cars = vec![priced(3, 5.0), priced(1, 1.0), priced(2, 9.0)];
        let spec = SortSpec::parse("horsepower", "desc");
        assert_eq!(spec.field, SortField::Insertion);
        assert_eq!(ids(&sort_vehicles(&cars, spec)), vec![3, 1, 2]);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(SortField::parse("currentPrice"), SortField::CurrentPrice);
        assert_eq!(SortField::parse("price"), SortField::CurrentPrice);
        assert_eq!(SortField::parse("epa_range"), SortField::EpaRange);
        assert_eq!(SortField::parse("0-60"), SortField::AccelerationZeroToSixty);
        assert_eq!(SortField::parse("trimFirstReleased"), SortField::TrimFirstReleased);
        assert_eq!(SortDirection::parse("DESC"), SortDirection::Descending);
        assert_eq!(SortDirection::parse("sideways"), SortDirection::Ascending);
        assert!(!SortDirection::is_known("sideways"));
    }

    #[test]
    fn test_direction_multiplier() {
        assert_eq!(SortDirection::Ascending.apply(Ordering::Less), Ordering::Less);
        assert_eq!(SortDirection::Descending.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortDirection::Descending.apply(Ordering::Equal), Ordering::Equal);
        assert_eq!(SortDirection::Ascending.toggled(), SortDirection::Descending);
    }

    #[test]
    fn test_all_sort_fields() {
        let all = SortField::all();
        assert_eq!(all.len(), 8);
        assert!(!all.contains(&SortField::Insertion));
    }
}
