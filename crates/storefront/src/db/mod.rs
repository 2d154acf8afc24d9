//! Database operations for the storefront `PostgreSQL`.
//!
//! Stores the minimal record set behind the public API:
//!
//! ## Tables
//!
//! - `product` - Catalog products; option columns (`images`, `sizes`,
//!   `colors`) are text in any of the three historical shapes and are
//!   normalized exactly once at row decode
//! - `wishlist` - Per-user wishlisted products
//! - `app_user` - Users referenced by sessions and wishlists
//! - `tower_sessions.session` - Backing table for the session store
//!
//! # Migrations
//!
//! Migrations live in `crates/storefront/migrations/` and are embedded
//! via [`MIGRATOR`]; they are not run automatically on startup.

pub mod products;
pub mod wishlist;

pub use products::ProductRepository;
pub use wishlist::WishlistRepository;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Embedded migrations for the storefront database.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Query failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored value violates the data model (e.g., negative stock).
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

#[cfg(test)]
mod tests {
    use super::MIGRATOR;

    #[test]
    fn test_migrations_create_session_store_table() {
        // tower-sessions' PostgresStore reads and writes
        // tower_sessions.session; the schema must provide it.
        assert!(
            MIGRATOR
                .iter()
                .any(|m| m.sql.contains(r#""tower_sessions"."session""#))
        );
    }
}
