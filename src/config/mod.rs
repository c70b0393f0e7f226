//! Configuration: `.evcatalog.toml` discovery, parsing, and validation.

pub mod core;
pub mod loader;
pub mod validation;

pub use self::core::{CatalogConfig, CompareConfig, DisplayConfig};
pub use loader::{load_config, load_config_from, parse_and_validate_config, CONFIG_FILE_NAME};
pub use validation::{validate_config, validate_config_result, CatalogValidation};

/// Contents written by `evcatalog init`
pub const DEFAULT_CONFIG_TOML: &str = r#"# evcatalog configuration

[compare]
# Portrait viewports narrower than this (px) compare fewer vehicles
breakpoint = 768
narrow_capacity = 2
wide_capacity = 3

[display]
default_sort = "name"
default_direction = "asc"
color = "auto"
"#;
