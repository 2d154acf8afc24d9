//! Wishlist entry model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::product::Product;

/// A favorited product.
///
/// Set semantics: at most one entry per product. Size and color play no
/// part in wishlist identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub image: Option<String>,
    pub sku: String,
}

impl WishlistEntry {
    /// Build an entry from a product snapshot.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price: product.effective_price(),
            image: product.primary_image().map(String::from),
            sku: product.sku.clone(),
        }
    }
}
