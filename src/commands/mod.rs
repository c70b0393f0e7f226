//! CLI command implementations.
//!
//! - **list**: search, scope, feature-filter and sort the catalog
//! - **compare**: run a selection through the compare state machine and
//!   render the resolved matrix
//! - **init**: write a default `.evcatalog.toml`

pub mod compare;
pub mod init;
pub mod list;

pub use compare::{compare_vehicles, select_vehicles, CompareArgs, Declined};
pub use init::init_config;
pub use list::{build_query, list_vehicles, ListConfig};
