//! List narrowing stages.
//!
//! Both stages are pure: they borrow the caller's records and return the
//! survivors in input order.

pub mod feature;
pub mod search;

pub use feature::{category_unions, filter_by_features, FeatureCatalog};
pub use search::{filter_by_search_and_scope, in_scope, matches_query};
