//! Integration tests for Telar.
//!
//! # Running Tests
//!
//! ```bash
//! # Flow tests run against the in-memory store; no services required
//! cargo test -p telar-integration-tests
//!
//! # Live API tests need a running server and database
//! STOREFRONT_BASE_URL=http://localhost:3000 \
//!     cargo test -p telar-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart/wishlist flows over the client-state library
//! - `storefront_api` - Live HTTP tests against the API server (ignored
//!   by default)

use telar_core::{OptionList, Product, ProductId};

/// Build a product fixture with the given id and stock.
#[must_use]
pub fn product_fixture(id: i64, stock: u32) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Producto {id}"),
        price: rust_decimal::Decimal::new(1990, 2),
        stock,
        category: "camisas".to_string(),
        sku: format!("SKU-{id:03}"),
        images: OptionList::from(vec!["front.jpg"]),
        sizes: OptionList::new(),
        colors: OptionList::new(),
        discount_percent: None,
        discount_price: None,
        material: None,
        description: None,
    }
}

/// Base URL for the storefront API (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}
