//! Cart line type.

use serde::{Deserialize, Serialize};

use sample_site_core::{Price, ProductId};

use super::Product;

/// A product in the cart.
///
/// A line is a copy of the product taken when it was first added, plus a
/// quantity. Stored lines may lack the quantity, which counts as 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl CartItem {
    /// Create a line holding one unit of `product`.
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self {
            product,
            quantity: Some(1),
        }
    }

    /// Product id of this line.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Quantity, counting a missing value as 1.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity.unwrap_or(1)
    }

    /// Add one more unit.
    pub fn increment(&mut self) {
        self.quantity = Some(self.quantity().saturating_add(1));
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity())
    }
}

impl From<Product> for CartItem {
    fn from(product: Product) -> Self {
        Self::new(product)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const LINE_WITHOUT_QUANTITY: &str = r#"{"id":4,"name":"Access Point","category":"access-points",
        "price":85,"description":"Wireless Access Point","image":"product4.jpg"}"#;

    #[test]
    fn test_missing_quantity_counts_as_one() {
        let item: CartItem = serde_json::from_str(LINE_WITHOUT_QUANTITY).unwrap();
        assert_eq!(item.quantity, None);
        assert_eq!(item.quantity(), 1);
        assert_eq!(item.line_total(), Price::from_whole(85));
    }

    #[test]
    fn test_increment_from_missing_quantity() {
        let mut item: CartItem = serde_json::from_str(LINE_WITHOUT_QUANTITY).unwrap();
        item.increment();
        assert_eq!(item.quantity, Some(2));
    }

    #[test]
    fn test_serializes_flat() {
        let item: CartItem = serde_json::from_str(LINE_WITHOUT_QUANTITY).unwrap();
        let mut item = item;
        item.increment();
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["id"], 4);
        assert_eq!(value["name"], "Access Point");
        assert_eq!(value["quantity"], 2);
        assert!(value.get("product").is_none());
    }
}
