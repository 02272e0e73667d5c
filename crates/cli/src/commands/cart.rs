//! Cart commands.

use sample_site_core::ProductId;
use sample_site_storefront::SiteConfig;
use tracing::info;

use super::{CommandError, open_site};

/// List cart lines.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn show(config: SiteConfig) -> Result<(), CommandError> {
    let site = open_site(config)?;
    let cart = site.cart();
    let lines = cart.get_cart()?;

    if lines.is_empty() {
        info!("Cart is empty");
        return Ok(());
    }

    for item in &lines {
        info!(
            "#{} {} x{} = {}",
            item.id(),
            item.product.name,
            item.quantity(),
            item.line_total().display()
        );
    }
    info!("Total: {}", cart.get_total_price()?.display());
    Ok(())
}

/// Add one unit of product `id`.
///
/// # Errors
///
/// Returns `CommandError::UnknownProduct` if no product has this id.
pub fn add(config: SiteConfig, id: ProductId) -> Result<(), CommandError> {
    let site = open_site(config)?;
    let product = site
        .catalog()
        .product(id)?
        .ok_or(CommandError::UnknownProduct(id))?;

    let name = product.name.clone();
    site.cart().add_to_cart(product)?;
    info!("Added {name} ({} items in cart)", site.cart().item_count()?);
    Ok(())
}

/// Remove product `id` from the cart.
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub fn remove(config: SiteConfig, id: ProductId) -> Result<(), CommandError> {
    let site = open_site(config)?;
    site.cart().remove_from_cart(id)?;
    info!("Removed product {id}");
    Ok(())
}

/// Show the cart total.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn total(config: SiteConfig) -> Result<(), CommandError> {
    let site = open_site(config)?;
    let total = site.cart().get_total_price()?;
    info!("Total: {}", total.display());
    Ok(())
}
