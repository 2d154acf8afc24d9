//! Wishlist route handlers.
//!
//! Reads are open; mutations require an authenticated session. The
//! delete route carries the user id in the path and is additionally
//! checked against the session user.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use telar_core::{ProductId, UserId, WishlistEntry};

use crate::db::WishlistRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::state::AppState;

/// Body of `POST /api/wishlist`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToWishlist {
    pub product_id: ProductId,
}

/// `GET /api/wishlist/check/{productId}` - membership for the current user.
#[instrument(skip(state, user))]
pub async fn check(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(product_id): Path<i64>,
) -> Result<Json<Value>> {
    let in_wishlist = WishlistRepository::new(state.pool())
        .contains(user.id, ProductId::new(product_id))
        .await?;
    Ok(Json(json!({ "in_wishlist": in_wishlist })))
}

/// `POST /api/wishlist` - add for the current user.
#[instrument(skip(state, user))]
pub async fn add(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(body): Json<AddToWishlist>,
) -> Result<StatusCode> {
    WishlistRepository::new(state.pool())
        .add(user.id, body.product_id)
        .await?;
    Ok(StatusCode::CREATED)
}

/// `DELETE /api/users/{userId}/wishlist/{productId}` - remove for that user.
#[instrument(skip(state, user))]
pub async fn remove(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path((user_id, product_id)): Path<(i64, i64)>,
) -> Result<StatusCode> {
    if user.id != UserId::new(user_id) {
        return Err(AppError::Unauthorized(
            "wishlist belongs to another user".to_string(),
        ));
    }
    WishlistRepository::new(state.pool())
        .remove(user.id, ProductId::new(product_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/users/{userId}/wishlist` - that user's entries.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<WishlistEntry>>> {
    let entries = WishlistRepository::new(state.pool())
        .list_for(UserId::new(user_id))
        .await?;
    Ok(Json(entries))
}
