//! Seed the store with default collections.

use sample_site_storefront::SiteConfig;
use tracing::info;

use super::{CommandError, open_site};

/// Load the page, which seeds any missing collection, and report what was written.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or written.
pub fn run(config: SiteConfig) -> Result<(), CommandError> {
    let path = config.storage_path.display().to_string();
    let site = open_site(config)?;
    let report = site.seed_report();

    if report.is_noop() {
        info!(path = %path, "All collections already present");
    } else {
        info!(path = %path, "Seeded collections:");
        for key in &report.written {
            info!("  - {key}");
        }
    }

    Ok(())
}
