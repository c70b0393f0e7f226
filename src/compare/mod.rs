//! Side-by-side comparison: a bounded selection, the typed attribute rows,
//! best-value scoring, and last-request-wins detail resolution.

pub mod attributes;
pub mod best_value;
pub mod resolver;
pub mod selection;
pub mod viewport;

pub use attributes::{
    default_descriptors, AttributeDescriptor, AttributeKey, AttributeValue, Polarity, ValueFormat,
};
pub use best_value::{best_value, is_best, ComparisonMatrix, MatrixCell, MatrixColumn, MatrixRow};
pub use resolver::{
    resolve_comparison, ComparisonLoader, DetailResolver, MatrixState, ResolutionTicket,
};
pub use selection::{AddOutcome, CompareEvent, CompareOutcome, CompareSelection, MIN_COMPARE};
pub use viewport::{CapacityPolicy, Viewport};
