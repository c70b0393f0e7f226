//! Comparison row definitions.
//!
//! Rows are a fixed, typed list: each [`AttributeKey`] knows how to read its
//! value from a [`DetailRecord`], and each [`AttributeDescriptor`] pairs a key
//! with a label, an optional polarity, and a display format.

use serde::{Deserialize, Serialize};

use crate::core::DetailRecord;

/// Placeholder shown for a missing value.
pub const MISSING: &str = "—";

/// Attribute that can appear as a comparison row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttributeKey {
    CurrentPrice,
    EpaRange,
    BatteryCapacity,
    AccelerationZeroToSixty,
    TopSpeed,
    Horsepower,
    Torque,
    ChargingSpeed,
    CurbWeight,
    SeatingCapacity,
    CargoVolume,
    AverageRating,
    Drivetrain,
    BodyStyle,
}

/// A cell value read from a detail record.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Number(f64),
    Text(String),
}

impl AttributeValue {
    /// Finite numeric value, if any. Text never scores.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }
}

impl AttributeKey {
    pub fn value(&self, record: &DetailRecord) -> Option<AttributeValue> {
        let number = |v: Option<f64>| v.map(AttributeValue::Number);
        let text = |v: &Option<String>| v.clone().map(AttributeValue::Text);
        match self {
            AttributeKey::CurrentPrice => number(record.current_price),
            AttributeKey::EpaRange => number(record.epa_range),
            AttributeKey::BatteryCapacity => number(record.battery_capacity),
            AttributeKey::AccelerationZeroToSixty => number(record.acceleration_zero_to_sixty),
            AttributeKey::TopSpeed => number(record.top_speed),
            AttributeKey::Horsepower => number(record.horsepower),
            AttributeKey::Torque => number(record.torque),
            AttributeKey::ChargingSpeed => number(record.charging_speed),
            AttributeKey::CurbWeight => number(record.curb_weight),
            AttributeKey::SeatingCapacity => number(record.seating_capacity),
            AttributeKey::CargoVolume => number(record.cargo_volume),
            AttributeKey::AverageRating => number(record.average_rating),
            AttributeKey::Drivetrain => text(&record.drivetrain),
            AttributeKey::BodyStyle => text(&record.body_style),
        }
    }

    pub fn numeric_value(&self, record: &DetailRecord) -> Option<f64> {
        self.value(record).and_then(|v| v.as_number())
    }
}

/// Which end of the scale wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Polarity {
    HigherIsBetter,
    LowerIsBetter,
}

/// How a value is rendered in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueFormat {
    /// `$45,990`
    Currency,
    /// Rounded number with a unit suffix, e.g. `310 mi`
    Unit(&'static str),
    /// Fixed decimals with a unit suffix, e.g. `3.1 s`
    Decimal(usize, &'static str),
    /// Text or a bare number
    Plain,
}

impl ValueFormat {
    pub fn render(&self, value: Option<&AttributeValue>) -> String {
        let Some(value) = value else {
            return MISSING.to_string();
        };
        match (self, value) {
            (_, AttributeValue::Text(text)) => text.clone(),
            (ValueFormat::Currency, AttributeValue::Number(n)) => {
                format!("${}", group_thousands(n.round() as i64))
            }
            (ValueFormat::Unit(unit), AttributeValue::Number(n)) => {
                format!("{} {unit}", group_thousands(n.round() as i64))
            }
            (ValueFormat::Decimal(places, unit), AttributeValue::Number(n)) => {
                let places = *places;
                format!("{n:.places$} {unit}")
            }
            (ValueFormat::Plain, AttributeValue::Number(n)) => {
                if n.fract() == 0.0 {
                    format!("{n:.0}")
                } else {
                    n.to_string()
                }
            }
        }
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let grouped = digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(",");
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// One comparison row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttributeDescriptor {
    pub key: AttributeKey,
    pub label: &'static str,
    /// Rows without a polarity are shown but never scored.
    pub polarity: Option<Polarity>,
    pub format: ValueFormat,
}

impl AttributeDescriptor {
    pub const fn new(
        key: AttributeKey,
        label: &'static str,
        polarity: Option<Polarity>,
        format: ValueFormat,
    ) -> Self {
        Self {
            key,
            label,
            polarity,
            format,
        }
    }

    pub fn render(&self, record: &DetailRecord) -> String {
        self.format.render(self.key.value(record).as_ref())
    }
}

use AttributeKey as K;
use Polarity::{HigherIsBetter as Higher, LowerIsBetter as Lower};

const DEFAULT_DESCRIPTORS: [AttributeDescriptor; 14] = [
    AttributeDescriptor::new(K::CurrentPrice, "Price", Some(Lower), ValueFormat::Currency),
    AttributeDescriptor::new(K::EpaRange, "EPA Range", Some(Higher), ValueFormat::Unit("mi")),
    AttributeDescriptor::new(K::BatteryCapacity, "Battery", Some(Higher), ValueFormat::Decimal(1, "kWh")),
    AttributeDescriptor::new(K::AccelerationZeroToSixty, "0-60 mph", Some(Lower), ValueFormat::Decimal(1, "s")),
    AttributeDescriptor::new(K::TopSpeed, "Top Speed", Some(Higher), ValueFormat::Unit("mph")),
    AttributeDescriptor::new(K::Horsepower, "Horsepower", Some(Higher), ValueFormat::Unit("hp")),
    AttributeDescriptor::new(K::Torque, "Torque", Some(Higher), ValueFormat::Unit("lb-ft")),
    AttributeDescriptor::new(K::ChargingSpeed, "DC Fast Charge", Some(Higher), ValueFormat::Unit("kW")),
    AttributeDescriptor::new(K::CurbWeight, "Curb Weight", None, ValueFormat::Unit("lbs")),
    AttributeDescriptor::new(K::SeatingCapacity, "Seats", None, ValueFormat::Plain),
    AttributeDescriptor::new(K::CargoVolume, "Cargo", Some(Higher), ValueFormat::Decimal(1, "cu ft")),
    AttributeDescriptor::new(K::AverageRating, "Rating", Some(Higher), ValueFormat::Decimal(1, "/ 5")),
    AttributeDescriptor::new(K::Drivetrain, "Drivetrain", None, ValueFormat::Plain),
    AttributeDescriptor::new(K::BodyStyle, "Body Style", None, ValueFormat::Plain),
];

/// The comparison rows, in display order.
pub fn default_descriptors() -> &'static [AttributeDescriptor] {
    &DEFAULT_DESCRIPTORS
}
