//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                                  - Liveness check
//! GET    /health/ready                            - Readiness check (DB ping)
//!
//! # Catalog (read-only)
//! GET    /api/products                            - Product list
//! GET    /api/products/ofertas                    - Discounted products
//! GET    /api/products/{id}                       - Single product (404 if absent)
//! GET    /api/categories                          - Distinct category names
//!
//! # Session
//! GET    /api/session                             - Session snapshot
//!
//! # Wishlist (mutations require a session)
//! GET    /api/wishlist/check/{productId}          - Membership for current user
//! POST   /api/wishlist                            - Add for current user
//! DELETE /api/users/{userId}/wishlist/{productId} - Remove for that user
//! GET    /api/users/{userId}/wishlist             - That user's entries
//! ```

pub mod products;
pub mod session;
pub mod wishlist;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Create the API router.
///
/// `/api/products/ofertas` is registered before `/api/products/{id}` so
/// the literal segment never parses as an id.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(products::index))
        .route("/api/products/ofertas", get(products::discounted))
        .route("/api/products/{id}", get(products::show))
        .route("/api/categories", get(products::categories))
        .route("/api/session", get(session::show))
        .route("/api/wishlist/check/{product_id}", get(wishlist::check))
        .route("/api/wishlist", post(wishlist::add))
        .route(
            "/api/users/{user_id}/wishlist/{product_id}",
            delete(wishlist::remove),
        )
        .route("/api/users/{user_id}/wishlist", get(wishlist::index))
}
