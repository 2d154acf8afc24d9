//! Catalog product model.
//!
//! Products are read-only from the client's point of view: they are
//! fetched from the API and never mutated locally. Option fields
//! (`images`, `sizes`, `colors`) normalize through [`OptionList`] at
//! deserialization, so every consumer sees one canonical shape.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::option_list::OptionList;

/// A catalog product as served by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
    pub category: String,
    pub sku: String,
    #[serde(default)]
    pub images: OptionList,
    #[serde(default)]
    pub sizes: OptionList,
    #[serde(default)]
    pub colors: OptionList,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    /// The price a buyer actually pays: the discounted price when one is
    /// set, the list price otherwise.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        self.discount_price.unwrap_or(self.price)
    }

    /// Whether the product carries an active discount.
    #[must_use]
    pub const fn is_discounted(&self) -> bool {
        self.discount_price.is_some()
    }

    /// First image, used as the thumbnail everywhere.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.as_slice().first().map(String::as_str)
    }

    /// Whether the product is currently purchasable at all.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
