//! Free-text search and manufacturer scope filtering.

use crate::core::{ManufacturerScope, VehicleRecord};

/// Check whether a record sits inside the manufacturer scope.
///
/// No scope means no restriction.
pub fn in_scope(record: &VehicleRecord, scope: Option<&ManufacturerScope>) -> bool {
    scope.is_none_or(|scope| scope.contains(record.id))
}

/// Check whether a record matches a search query.
///
/// The lower-cased query must be a substring of the make, model, submodel,
/// or one of their space-joined combinations. An empty or absent query
/// matches everything.
pub fn matches_query(record: &VehicleRecord, query: Option<&str>) -> bool {
    let needle = match query {
        Some(q) if !q.is_empty() => q.to_lowercase(),
        _ => return true,
    };

    search_haystacks(record)
        .iter()
        .any(|haystack| haystack.to_lowercase().contains(&needle))
}

fn search_haystacks(record: &VehicleRecord) -> [String; 6] {
    let make = &record.make_name;
    let model = &record.model;
    let submodel = &record.submodel;
    [
        make.clone(),
        model.clone(),
        submodel.clone(),
        format!("{make} {model}"),
        format!("{model} {submodel}"),
        format!("{make} {model} {submodel}"),
    ]
}

/// Keep the records that pass both the scope and the query, in input order.
pub fn filter_by_search_and_scope<'a, I>(
    records: I,
    query: Option<&str>,
    scope: Option<&ManufacturerScope>,
) -> Vec<&'a VehicleRecord>
where
    I: IntoIterator<Item = &'a VehicleRecord>,
{
    records
        .into_iter()
        .filter(|record| in_scope(record, scope) && matches_query(record, query))
        .collect()
}
