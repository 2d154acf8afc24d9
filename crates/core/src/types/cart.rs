//! Cart line model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::product::Product;

/// Identity key for a cart line.
///
/// Two lines with the same product but a different size or color are
/// distinct entries; the wishlist, by contrast, keys on product alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl LineKey {
    /// Create a key from its parts.
    #[must_use]
    pub const fn new(product_id: ProductId, size: Option<String>, color: Option<String>) -> Self {
        Self {
            product_id,
            size,
            color,
        }
    }
}

/// A single line in the cart.
///
/// Invariant: `1 <= quantity <= stock` at the moment of mutation. `stock`
/// is a snapshot taken when the line was created, not live-revalidated.
/// A quantity of zero is never stored; the line is removed instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_unit_price: Option<Decimal>,
    pub image: Option<String>,
    pub category: String,
    pub quantity: u32,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    pub stock: u32,
    pub sku: String,
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Build a new line from a product snapshot and the buyer's selection.
    ///
    /// Captures the effective (possibly discounted) unit price, keeping
    /// the list price alongside when they differ, and timestamps the line.
    #[must_use]
    pub fn from_product(
        product: &Product,
        quantity: u32,
        size: Option<String>,
        color: Option<String>,
    ) -> Self {
        let unit_price = product.effective_price();
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price,
            original_unit_price: (unit_price != product.price).then_some(product.price),
            image: product.primary_image().map(String::from),
            category: product.category.clone(),
            quantity,
            size,
            color,
            stock: product.stock,
            sku: product.sku.clone(),
            added_at: Utc::now(),
        }
    }

    /// The identity key distinguishing this line.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product_id, self.size.clone(), self.color.clone())
    }

    /// Whether this line matches the given identity key.
    #[must_use]
    pub fn matches(&self, key: &LineKey) -> bool {
        self.product_id == key.product_id && self.size == key.size && self.color == key.color
    }

    /// Line total: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::option_list::OptionList;

    fn product() -> Product {
        Product {
            id: ProductId::new(7),
            name: "Camisa lino".to_string(),
            price: Decimal::new(2990, 2),
            stock: 3,
            category: "camisas".to_string(),
            sku: "CAM-007".to_string(),
            images: OptionList::from(vec!["front.jpg"]),
            sizes: OptionList::from(vec!["S", "M"]),
            colors: OptionList::new(),
            discount_percent: None,
            discount_price: Some(Decimal::new(2500, 2)),
            material: None,
            description: None,
        }
    }

    #[test]
    fn test_from_product_captures_discounted_price() {
        let line = CartLine::from_product(&product(), 2, Some("M".to_string()), None);
        assert_eq!(line.unit_price, Decimal::new(2500, 2));
        assert_eq!(line.original_unit_price, Some(Decimal::new(2990, 2)));
        assert_eq!(line.line_total(), Decimal::new(5000, 2));
    }

    #[test]
    fn test_lines_differing_only_in_size_have_distinct_keys() {
        let small = CartLine::from_product(&product(), 1, Some("S".to_string()), None);
        let medium = CartLine::from_product(&product(), 1, Some("M".to_string()), None);
        assert_ne!(small.key(), medium.key());
        assert!(small.matches(&small.key()));
        assert!(!small.matches(&medium.key()));
    }
}
