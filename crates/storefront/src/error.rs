//! Unified error handling for the site.
//!
//! Visitor-facing failures (validation, duplicate usernames, wrong
//! credentials) are not errors: controllers report them as feedback. `SiteError`
//! covers the infrastructure underneath.

use thiserror::Error;

use crate::config::ConfigError;
use crate::store::StoreError;

/// Application-level error type for the site.
#[derive(Debug, Error)]
pub enum SiteError {
    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A template failed to render.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// A delayed navigation was requested outside a tokio runtime.
    #[error("No async runtime available to schedule navigation")]
    NoRuntime,
}
