//! Best-value scoring and the comparison matrix.

use serde::Serialize;

use crate::core::{DetailRecord, VehicleId};

use super::attributes::{AttributeDescriptor, AttributeKey, Polarity};

/// Winning value for one attribute across `records`.
///
/// Only finite numbers take part. Returns `None` when no record has a
/// numeric value for `key`.
pub fn best_value(records: &[DetailRecord], key: AttributeKey, polarity: Polarity) -> Option<f64> {
    let values = records.iter().filter_map(|record| key.numeric_value(record));
    match polarity {
        Polarity::HigherIsBetter => values.reduce(f64::max),
        Polarity::LowerIsBetter => values.reduce(f64::min),
    }
}

/// A record wins when its own value equals the best value exactly.
///
/// Several records can win the same attribute.
pub fn is_best(record: &DetailRecord, key: AttributeKey, best: Option<f64>) -> bool {
    match (key.numeric_value(record), best) {
        (Some(value), Some(best)) => value == best,
        _ => false,
    }
}

/// One record in the comparison header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixColumn {
    pub id: VehicleId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixCell {
    pub display: String,
    pub is_best: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixRow {
    pub descriptor: AttributeDescriptor,
    /// `None` for unscored rows and rows with no numeric values.
    pub best: Option<f64>,
    pub cells: Vec<MatrixCell>,
}

/// Attribute × record grid with winners marked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonMatrix {
    pub columns: Vec<MatrixColumn>,
    pub rows: Vec<MatrixRow>,
}

impl ComparisonMatrix {
    /// Build the grid for `records` in their given order.
    pub fn build(records: &[DetailRecord], descriptors: &[AttributeDescriptor]) -> Self {
        let columns = records
            .iter()
            .map(|record| MatrixColumn {
                id: record.id,
                name: record.display_name(),
            })
            .collect();

        let rows = descriptors
            .iter()
            .map(|descriptor| build_row(records, descriptor))
            .collect();

        Self { columns, rows }
    }

    pub fn row(&self, key: AttributeKey) -> Option<&MatrixRow> {
        self.rows.iter().find(|row| row.descriptor.key == key)
    }

    /// Ids of the records that win `key`.
    pub fn winners(&self, key: AttributeKey) -> Vec<VehicleId> {
        self.row(key)
            .map(|row| {
                row.cells
                    .iter()
                    .zip(&self.columns)
                    .filter(|(cell, _)| cell.is_best)
                    .map(|(_, column)| column.id)
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn build_row(records: &[DetailRecord], descriptor: &AttributeDescriptor) -> MatrixRow {
    let best = descriptor
        .polarity
        .and_then(|polarity| best_value(records, descriptor.key, polarity));

    let cells = records
        .iter()
        .map(|record| MatrixCell {
            display: descriptor.render(record),
            is_best: is_best(record, descriptor.key, best),
        })
        .collect();

    MatrixRow {
        descriptor: *descriptor,
        best,
        cells,
    }
}
