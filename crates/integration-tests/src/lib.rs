//! Integration tests for Sample Site.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p sample-site-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_flow` - Register, log in, shop and search through the page
//! - `storefront_storage` - File persistence and malformed-data policies

use std::path::{Path, PathBuf};

use sample_site_storefront::SiteConfig;

/// A storage file under the OS temp dir, removed on drop.
pub struct TempStorage {
    dir: PathBuf,
}

impl TempStorage {
    /// Reserve a fresh, not-yet-created storage location.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: std::env::temp_dir().join(format!("sample-site-it-{}", uuid::Uuid::new_v4())),
        }
    }

    /// Path of the storage file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join("storage.json")
    }

    /// Default configuration pointing at this storage file.
    #[must_use]
    pub fn config(&self) -> SiteConfig {
        SiteConfig {
            storage_path: self.path(),
            ..SiteConfig::default()
        }
    }

    /// Directory holding the storage file.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Default for TempStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TempStorage {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}
