//! Structured logging setup.
//!
//! Library code logs through `tracing` macros; the binary installs a
//! subscriber once at startup via [`init_tracing`].

pub mod tracing;

pub use self::tracing::{filter_directive, init_tracing, LOG_ENV_VAR};
