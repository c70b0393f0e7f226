use serde::{Deserialize, Serialize};

use crate::compare::viewport::{
    CapacityPolicy, DEFAULT_BREAKPOINT, DEFAULT_NARROW_CAPACITY, DEFAULT_WIDE_CAPACITY,
};
use crate::formatting::ColorMode;
use crate::sort::{SortDirection, SortField, SortSpec};

/// Root configuration structure for evcatalog
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CatalogConfig {
    /// Comparison capacity configuration
    #[serde(default)]
    pub compare: Option<CompareConfig>,

    /// Display configuration for list output
    #[serde(default)]
    pub display: Option<DisplayConfig>,
}

impl CatalogConfig {
    pub fn capacity_policy(&self) -> CapacityPolicy {
        self.compare
            .as_ref()
            .map(CompareConfig::policy)
            .unwrap_or_default()
    }

    pub fn default_sort_spec(&self) -> SortSpec {
        self.display
            .as_ref()
            .map(DisplayConfig::sort_spec)
            .unwrap_or_default()
    }

    pub fn color_mode(&self) -> ColorMode {
        self.display
            .as_ref()
            .and_then(|d| ColorMode::parse(&d.color))
            .unwrap_or(ColorMode::Auto)
    }
}

/// Viewport breakpoint and the capacities on either side of it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompareConfig {
    /// Width (px) below which a portrait viewport is treated as a phone
    #[serde(default = "default_breakpoint")]
    pub breakpoint: u32,

    /// Capacity for phone portrait viewports (default: 2)
    #[serde(default = "default_narrow_capacity")]
    pub narrow_capacity: usize,

    /// Capacity for everything else (default: 3)
    #[serde(default = "default_wide_capacity")]
    pub wide_capacity: usize,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            breakpoint: default_breakpoint(),
            narrow_capacity: default_narrow_capacity(),
            wide_capacity: default_wide_capacity(),
        }
    }
}

impl CompareConfig {
    pub fn policy(&self) -> CapacityPolicy {
        CapacityPolicy {
            breakpoint: self.breakpoint,
            narrow_capacity: self.narrow_capacity,
            wide_capacity: self.wide_capacity,
        }
    }
}

fn default_breakpoint() -> u32 {
    DEFAULT_BREAKPOINT
}

fn default_narrow_capacity() -> usize {
    DEFAULT_NARROW_CAPACITY
}

fn default_wide_capacity() -> usize {
    DEFAULT_WIDE_CAPACITY
}

/// Display configuration for list output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Sort field used when none is given on the command line
    #[serde(default = "default_sort")]
    pub default_sort: String,

    /// `asc` or `desc`
    #[serde(default = "default_direction")]
    pub default_direction: String,

    /// `auto`, `always` or `never`
    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_sort: default_sort(),
            default_direction: default_direction(),
            color: default_color(),
        }
    }
}

impl DisplayConfig {
    pub fn sort_spec(&self) -> SortSpec {
        SortSpec::new(
            SortField::parse(&self.default_sort),
            SortDirection::parse(&self.default_direction),
        )
    }
}

fn default_sort() -> String {
    "name".to_string()
}

fn default_direction() -> String {
    "asc".to_string()
}

fn default_color() -> String {
    "auto".to_string()
}
