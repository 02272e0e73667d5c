//! Catalog commands.

use sample_site_storefront::controllers::fields;
use sample_site_storefront::models::Product;
use sample_site_storefront::{FormData, FormId, SiteConfig};
use tracing::info;

use super::{CommandError, open_site};

fn log_product(product: &Product) {
    info!(
        "#{} {} [{}] {} - {}",
        product.id,
        product.name,
        product.category,
        product.price.display(),
        product.description
    );
}

/// List every product.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn products(config: SiteConfig) -> Result<(), CommandError> {
    let site = open_site(config)?;
    site.catalog().products()?.iter().for_each(log_product);
    Ok(())
}

/// List every news article.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn news(config: SiteConfig) -> Result<(), CommandError> {
    let site = open_site(config)?;
    let news = site.catalog().news()?;

    for item in &news {
        info!("{} [{}] {}: {}", item.date, item.category, item.title, item.content);
    }
    Ok(())
}

/// Submit the search form, then list what the results page would show.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn search(config: SiteConfig, query: &str) -> Result<(), CommandError> {
    let mut site = open_site(config)?;
    let mut form = FormData::new().with(fields::QUERY, query);
    site.submit(FormId::Search, &mut form)?;

    if let Some(url) = site.location().current() {
        info!("-> {url}");
    }

    let results = site.catalog().search_products(query)?;

    if results.is_empty() {
        info!("No products match {query:?}");
    }
    results.iter().for_each(log_product);
    Ok(())
}
