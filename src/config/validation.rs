//! Configuration validation with error accumulation.
//!
//! Every check runs and every problem is reported, using stillwater's
//! `Validation` instead of stopping at the first bad field.

use stillwater::{NonEmptyVec, Validation};

use crate::core::CatalogError;
use crate::formatting::ColorMode;
use crate::sort::SortDirection;

use super::core::{CatalogConfig, CompareConfig, DisplayConfig};

/// Validation result accumulating catalog errors
pub type CatalogValidation<T> = Validation<T, NonEmptyVec<CatalogError>>;

fn from_errors(errors: Vec<CatalogError>) -> CatalogValidation<()> {
    match NonEmptyVec::from_vec(errors) {
        Some(errors) => Validation::Failure(errors),
        None => Validation::Success(()),
    }
}

/// Validate the whole config, collecting every error.
pub fn validate_config(config: &CatalogConfig) -> CatalogValidation<()> {
    let mut errors = Vec::new();
    for validation in [
        validate_compare(config.compare.as_ref()),
        validate_display(config.display.as_ref()),
    ] {
        if let Validation::Failure(found) = validation {
            errors.extend(found);
        }
    }
    from_errors(errors)
}

/// Validate config with a fail-fast `anyhow::Result` API.
pub fn validate_config_result(config: &CatalogConfig) -> anyhow::Result<()> {
    match validate_config(config) {
        Validation::Success(()) => Ok(()),
        Validation::Failure(errors) => {
            let messages: Vec<String> = errors.into_iter().map(|e| e.to_string()).collect();
            Err(anyhow::anyhow!(
                "Invalid configuration ({} problem{}):\n  - {}",
                messages.len(),
                if messages.len() == 1 { "" } else { "s" },
                messages.join("\n  - ")
            ))
        }
    }
}

fn validate_compare(compare: Option<&CompareConfig>) -> CatalogValidation<()> {
    let Some(compare) = compare else {
        return Validation::Success(());
    };

    let mut errors = Vec::new();
    if compare.breakpoint == 0 {
        errors.push(CatalogError::config("compare.breakpoint must be greater than 0"));
    }
    if compare.narrow_capacity == 0 {
        errors.push(CatalogError::config("compare.narrow_capacity must be at least 1"));
    }
    if compare.wide_capacity == 0 {
        errors.push(CatalogError::config("compare.wide_capacity must be at least 1"));
    }
    if compare.narrow_capacity > compare.wide_capacity {
        errors.push(CatalogError::config(format!(
            "compare.narrow_capacity ({}) must not exceed compare.wide_capacity ({})",
            compare.narrow_capacity, compare.wide_capacity
        )));
    }
    from_errors(errors)
}

fn validate_display(display: Option<&DisplayConfig>) -> CatalogValidation<()> {
    let Some(display) = display else {
        return Validation::Success(());
    };

    let mut errors = Vec::new();
    if !SortDirection::is_known(&display.default_direction) {
        errors.push(CatalogError::config(format!(
            "display.default_direction must be 'asc' or 'desc', got '{}'",
            display.default_direction
        )));
    }
    if ColorMode::parse(&display.color).is_none() {
        errors.push(CatalogError::config(format!(
            "display.color must be 'auto', 'always' or 'never', got '{}'",
            display.color
        )));
    }
    from_errors(errors)
}
