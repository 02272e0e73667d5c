//! Shopping cart operations.

use tracing::{debug, instrument};

use sample_site_core::{Price, ProductId};

use crate::models::{CartItem, Product};
use crate::store::{Storage, StoreError, keys};

/// Cart service.
pub struct CartService<'a> {
    storage: &'a Storage,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Current cart lines, or an empty cart if none is stored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Malformed` if `cart` is malformed under the strict policy.
    pub fn get_cart(&self) -> Result<Vec<CartItem>, StoreError> {
        self.storage.get_or_default(keys::CART)
    }

    /// Add one unit of `product`.
    ///
    /// A product already in the cart has its quantity incremented; otherwise
    /// a new line with quantity 1 is appended.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if `cart` cannot be read or written.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(&self, product: Product) -> Result<(), StoreError> {
        let mut cart = self.get_cart()?;

        match cart.iter_mut().find(|item| item.id() == product.id) {
            Some(existing) => existing.increment(),
            None => cart.push(CartItem::new(product)),
        }

        self.storage.set(keys::CART, &cart)?;
        debug!(lines = cart.len(), "Cart updated");
        Ok(())
    }

    /// Remove every line for `id`. Removing a missing id changes nothing.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if `cart` cannot be read or written.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&self, id: ProductId) -> Result<(), StoreError> {
        let mut cart = self.get_cart()?;
        cart.retain(|item| item.id() != id);
        self.storage.set(keys::CART, &cart)
    }

    /// Sum of unit price times quantity over all lines. Zero when empty.
    ///
    /// Totals beyond the decimal range saturate at the maximum price.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Malformed` if `cart` is malformed under the strict policy.
    pub fn get_total_price(&self) -> Result<Price, StoreError> {
        Ok(self.get_cart()?.iter().map(CartItem::line_total).sum())
    }

    /// Total number of units in the cart, saturating at `u32::MAX`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Malformed` if `cart` is malformed under the strict policy.
    pub fn item_count(&self) -> Result<u32, StoreError> {
        Ok(self
            .get_cart()?
            .iter()
            .map(CartItem::quantity)
            .fold(0, u32::saturating_add))
    }
}
