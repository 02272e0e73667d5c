//! Command implementations.

pub mod account;
pub mod cart;
pub mod catalog;
pub mod seed;

use sample_site_core::ProductId;
use sample_site_storefront::controllers::FormOutcome;
use sample_site_storefront::store::StoreError;
use sample_site_storefront::{Page, Site, SiteConfig, SiteError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The storefront failed underneath.
    #[error(transparent)]
    Site(#[from] SiteError),

    /// Storage failed underneath a service call.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The form rejected the submission.
    #[error("{0}")]
    Rejected(String),

    /// No product has this id.
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),
}

/// Load the page with every form over the configured store.
fn open_site(config: SiteConfig) -> Result<Site, CommandError> {
    Ok(Site::open(Page::full(), config)?)
}

/// Turn error feedback into `CommandError::Rejected` and log success lines.
fn report(outcome: Option<FormOutcome>) -> Result<(), CommandError> {
    let Some(feedback) = outcome.and_then(|o| o.feedback) else {
        return Ok(());
    };

    if !feedback.is_success() {
        return Err(CommandError::Rejected(feedback.text()));
    }

    for line in &feedback.lines {
        tracing::info!("{line}");
    }
    Ok(())
}
