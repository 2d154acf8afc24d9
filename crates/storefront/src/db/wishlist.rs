//! Wishlist repository for database operations.

use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use telar_core::{OptionList, ProductId, UserId, WishlistEntry};

use super::RepositoryError;

/// Wishlist row joined with its product snapshot fields.
#[derive(Debug, FromRow)]
struct WishlistRow {
    product_id: i64,
    name: String,
    price: Decimal,
    discount_price: Option<Decimal>,
    images: Option<String>,
    sku: String,
}

impl From<WishlistRow> for WishlistEntry {
    fn from(row: WishlistRow) -> Self {
        let images = row.images.as_deref().map(OptionList::from_raw).unwrap_or_default();
        Self {
            product_id: ProductId::new(row.product_id),
            name: row.name,
            price: row.discount_price.unwrap_or(row.price),
            image: images.as_slice().first().cloned(),
            sku: row.sku,
        }
    }
}

/// Repository for per-user wishlist state.
pub struct WishlistRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WishlistRepository<'a> {
    /// Create a new wishlist repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Whether the user has wishlisted the product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn contains(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<bool, RepositoryError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM wishlist WHERE user_id = $1 AND product_id = $2)",
        )
        .bind(user_id.as_i64())
        .bind(product_id.as_i64())
        .fetch_one(self.pool)
        .await?;
        Ok(exists)
    }

    /// Add a product to the user's wishlist. Adding an already-present
    /// product is a no-op (set semantics).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn add(&self, user_id: UserId, product_id: ProductId) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO wishlist (user_id, product_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, product_id) DO NOTHING",
        )
        .bind(user_id.as_i64())
        .bind(product_id.as_i64())
        .execute(self.pool)
        .await?;
        Ok(())
    }

    /// Remove a product from the user's wishlist. Removing an absent
    /// product is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn remove(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM wishlist WHERE user_id = $1 AND product_id = $2")
            .bind(user_id.as_i64())
            .bind(product_id.as_i64())
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// The user's wishlist entries, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for(&self, user_id: UserId) -> Result<Vec<WishlistEntry>, RepositoryError> {
        let rows: Vec<WishlistRow> = sqlx::query_as(
            "SELECT w.product_id, p.name, p.price, p.discount_price, p.images, p.sku \
             FROM wishlist w \
             JOIN product p ON p.id = w.product_id \
             WHERE w.user_id = $1 \
             ORDER BY w.created_at",
        )
        .bind(user_id.as_i64())
        .fetch_all(self.pool)
        .await?;
        Ok(rows.into_iter().map(WishlistEntry::from).collect())
    }
}
