//! Shared error types for the catalog engine.
//!
//! The filter, sort and compare stages never fail; these errors come from the
//! collaborators around them (record source, detail resolver, configuration).

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Main error type for evcatalog operations
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// A record collection could not be obtained from its source
    #[error("Failed to load '{resource}': {message}")]
    Source { resource: String, message: String },

    /// Detail records for a comparison could not be resolved
    #[error("Detail resolution failed: {0}")]
    Detail(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO errors
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: Arc<std::io::Error>,
    },

    /// JSON errors
    #[error("Invalid JSON: {0}")]
    Json(#[source] Arc<serde_json::Error>),
}

impl CatalogError {
    /// Create a source error for a named resource
    pub fn source(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Source {
            resource: resource.into(),
            message: message.into(),
        }
    }

    pub fn detail(message: impl Into<String>) -> Self {
        Self::Detail(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Attach a path to an I/O error
    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: Some(path.into()),
            source: Arc::new(source),
        }
    }

    /// Whether re-issuing the same request could succeed.
    ///
    /// Upstream failures are transient from the engine's point of view;
    /// configuration and validation problems need user action.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Source { .. } | Self::Detail(_) | Self::Io { .. } => true,
            Self::Configuration(_) | Self::Validation(_) | Self::Json(_) => false,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            source: Arc::new(err),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(Arc::new(err))
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, CatalogError>;
