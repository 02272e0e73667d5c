//! Catalog types: products and news articles.
//!
//! Both collections are seeded on first load and only read afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use sample_site_core::{NewsId, Price, ProductId};

/// A product listed in the shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub price: Price,
    #[serde(default)]
    pub description: String,
    /// Image file name, relative to the site's image directory.
    #[serde(default)]
    pub image: String,
}

impl Product {
    /// Returns `true` if the lowercase `needle` occurs in the name, category
    /// or description, ignoring case.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        [&self.name, &self.category, &self.description]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// A news article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: NewsId,
    pub title: String,
    pub category: String,
    pub content: String,
    /// Publication date, stored as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub image: String,
}
