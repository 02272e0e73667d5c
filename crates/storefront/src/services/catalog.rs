//! Read-only catalog queries.

use sample_site_core::ProductId;

use crate::models::{NewsItem, Product};
use crate::store::{Storage, StoreError, keys};

/// Catalog service.
pub struct CatalogService<'a> {
    storage: &'a Storage,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All products.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Malformed` if `products` is malformed under the strict policy.
    pub fn products(&self) -> Result<Vec<Product>, StoreError> {
        self.storage.get_or_default(keys::PRODUCTS)
    }

    /// The product with `id`, if listed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Malformed` if `products` is malformed under the strict policy.
    pub fn product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.products()?.into_iter().find(|p| p.id == id))
    }

    /// All news articles.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Malformed` if `news` is malformed under the strict policy.
    pub fn news(&self) -> Result<Vec<NewsItem>, StoreError> {
        self.storage.get_or_default(keys::NEWS)
    }

    /// Products whose name, category or description contains `query`,
    /// ignoring case and surrounding whitespace. An empty query matches all.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Malformed` if `products` is malformed under the strict policy.
    pub fn search_products(&self, query: &str) -> Result<Vec<Product>, StoreError> {
        let needle = query.trim().to_lowercase();
        let products = self.products()?;

        if needle.is_empty() {
            return Ok(products);
        }

        Ok(products.into_iter().filter(|p| p.mentions(&needle)).collect())
    }
}
