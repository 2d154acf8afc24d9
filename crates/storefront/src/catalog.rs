//! Catalog API client and fetch-driven view states.
//!
//! Every fetch-driven render path starts at [`ViewState::Loading`] and
//! settles to `Ready` or `Failed`; transport and non-2xx failures are
//! caught here and never escape as unhandled errors. Product and
//! category reads go through a `moka` cache (5-minute TTL). All requests
//! carry a fixed client timeout; a timed-out request fails like any
//! other transport error, there is no retry.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use telar_core::{Product, ProductId, UserId, WishlistEntry};

use crate::models::SessionView;

/// Cache TTL for product and category reads.
const CACHE_TTL: Duration = Duration::from_secs(300);
const CACHE_CAPACITY: u64 = 1000;

/// Errors from catalog API calls.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport failure, including the fixed request timeout.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The resource does not exist (404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// The endpoint requires an authenticated session (401).
    #[error("Not authenticated")]
    Unauthorized,

    /// Any other non-success status.
    #[error("Unexpected status: {0}")]
    Status(reqwest::StatusCode),

    /// Base URL or path could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Cache key for catalog reads.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    Products,
    Discounted,
    Product(ProductId),
    Categories,
}

/// Cached value types.
#[derive(Debug, Clone)]
enum CacheValue {
    Products(Vec<Product>),
    Product(Box<Product>),
    Categories(Vec<String>),
}

/// Client for the storefront JSON API.
///
/// Cheaply cloneable; clones share the HTTP connection pool and cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base: Url,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a client against `base_url` with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the base URL does not parse or the HTTP
    /// client cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let base = Url::parse(base_url)?;
        // The cookie store carries the session cookie the wishlist
        // endpoints require.
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()?;
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base,
                cache,
            }),
        })
    }

    /// Create a client from the configured API base URL and timeout.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the configured base URL does not parse
    /// or the HTTP client cannot be constructed.
    pub fn from_config(config: &crate::config::StorefrontConfig) -> Result<Self, CatalogError> {
        Self::new(&config.api_base_url, config.fetch_timeout)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = self.inner.base.join(path)?;
        debug!(%url, "catalog GET");
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(path.to_string()));
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(CatalogError::Unauthorized);
        }
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }
        Ok(response.json().await?)
    }

    /// Fetch the full product list (cached).
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on transport failure or non-2xx status.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&CacheKey::Products).await
        {
            return Ok(products);
        }
        let products: Vec<Product> = self.get_json("/api/products").await?;
        self.inner
            .cache
            .insert(CacheKey::Products, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// Fetch a single product by id (cached). 404 maps to
    /// [`CatalogError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on transport failure, 404, or other
    /// non-2xx status.
    #[instrument(skip(self))]
    pub async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        if let Some(CacheValue::Product(product)) =
            self.inner.cache.get(&CacheKey::Product(id)).await
        {
            return Ok(*product);
        }
        let product: Product = self.get_json(&format!("/api/products/{id}")).await?;
        self.inner
            .cache
            .insert(
                CacheKey::Product(id),
                CacheValue::Product(Box::new(product.clone())),
            )
            .await;
        Ok(product)
    }

    /// Fetch the discounted-products list (cached).
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on transport failure or non-2xx status.
    #[instrument(skip(self))]
    pub async fn discounted(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(CacheValue::Products(products)) =
            self.inner.cache.get(&CacheKey::Discounted).await
        {
            return Ok(products);
        }
        let products: Vec<Product> = self.get_json("/api/products/ofertas").await?;
        self.inner
            .cache
            .insert(CacheKey::Discounted, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// Fetch the category list (cached).
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on transport failure or non-2xx status.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<String>, CatalogError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            return Ok(categories);
        }
        let categories: Vec<String> = self.get_json("/api/categories").await?;
        self.inner
            .cache
            .insert(
                CacheKey::Categories,
                CacheValue::Categories(categories.clone()),
            )
            .await;
        Ok(categories)
    }

    /// Fetch the current session snapshot. Never cached.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on transport failure or non-2xx status.
    #[instrument(skip(self))]
    pub async fn session(&self) -> Result<SessionView, CatalogError> {
        self.get_json("/api/session").await
    }

    /// Ask whether the current session's user has wishlisted a product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Unauthorized` without a session, or any
    /// transport failure.
    #[instrument(skip(self))]
    pub async fn wishlist_check(&self, product_id: ProductId) -> Result<bool, CatalogError> {
        #[derive(Deserialize)]
        struct Check {
            in_wishlist: bool,
        }
        let check: Check = self
            .get_json(&format!("/api/wishlist/check/{product_id}"))
            .await?;
        Ok(check.in_wishlist)
    }

    /// Add a product to the current session user's wishlist.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Unauthorized` without a session, or any
    /// transport failure.
    #[instrument(skip(self))]
    pub async fn wishlist_add(&self, product_id: ProductId) -> Result<(), CatalogError> {
        let url = self.inner.base.join("/api/wishlist")?;
        let response = self
            .inner
            .client
            .post(url)
            .json(&serde_json::json!({ "productId": product_id }))
            .send()
            .await?;
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(CatalogError::Unauthorized);
        }
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }
        Ok(())
    }

    /// Remove a product from a user's wishlist.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on transport failure or non-2xx status.
    #[instrument(skip(self))]
    pub async fn wishlist_remove(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<(), CatalogError> {
        let url = self
            .inner
            .base
            .join(&format!("/api/users/{user_id}/wishlist/{product_id}"))?;
        let response = self.inner.client.delete(url).send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(CatalogError::Unauthorized);
        }
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }
        Ok(())
    }

    /// Fetch a user's wishlist entries.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on transport failure or non-2xx status.
    #[instrument(skip(self))]
    pub async fn wishlist_for(&self, user_id: UserId) -> Result<Vec<WishlistEntry>, CatalogError> {
        self.get_json(&format!("/api/users/{user_id}/wishlist"))
            .await
    }
}

// =============================================================================
// View states
// =============================================================================

/// Render state of a fetch-driven view region.
///
/// The region renders `Loading` before the request is issued and settles
/// to `Ready` or `Failed` when it completes. A failure in one region
/// never takes down the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> ViewState<T> {
    /// Settle a fetch result into a render state.
    #[must_use]
    pub fn settle(result: Result<T, CatalogError>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(e) => {
                tracing::warn!(error = %e, "fetch failed, rendering error state");
                Self::Failed(e.to_string())
            }
        }
    }

    /// Whether the region has settled with content.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// The home view: three independent fetches, rendered only after all of
/// them settle.
#[derive(Debug, Clone)]
pub struct HomeView {
    pub products: ViewState<Vec<Product>>,
    pub offers: ViewState<Vec<Product>>,
    pub categories: ViewState<Vec<String>>,
}

impl HomeView {
    /// The initial render state, before any request is issued.
    #[must_use]
    pub const fn loading() -> Self {
        Self {
            products: ViewState::Loading,
            offers: ViewState::Loading,
            categories: ViewState::Loading,
        }
    }

    /// Issue the three independent fetches concurrently and wait for all
    /// of them before producing the final view.
    pub async fn load(client: &CatalogClient) -> Self {
        let (products, offers, categories) =
            tokio::join!(client.products(), client.discounted(), client.categories());
        Self {
            products: ViewState::settle(products),
            offers: ViewState::settle(offers),
            categories: ViewState::settle(categories),
        }
    }
}

// =============================================================================
// Client-side filtering and sorting
// =============================================================================

/// Sort orders for the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    PriceAsc,
    PriceDesc,
    NameAsc,
}

/// Filter and sort applied to an already-fetched product list.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Keep only products in this category.
    pub category: Option<String>,
    /// Keep only products whose name contains this text (case-insensitive).
    pub query: Option<String>,
    /// Sort order; `None` keeps the API order.
    pub order: Option<SortOrder>,
}

impl ProductFilter {
    /// Apply the filter to a product list, returning a new list.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut result: Vec<Product> = products
            .iter()
            .filter(|p| {
                self.category
                    .as_ref()
                    .is_none_or(|c| p.category.eq_ignore_ascii_case(c))
            })
            .filter(|p| {
                self.query
                    .as_ref()
                    .is_none_or(|q| p.name.to_lowercase().contains(&q.to_lowercase()))
            })
            .cloned()
            .collect();

        match self.order {
            Some(SortOrder::PriceAsc) => {
                result.sort_by_key(telar_core::Product::effective_price);
            }
            Some(SortOrder::PriceDesc) => {
                result.sort_by_key(|p| std::cmp::Reverse(p.effective_price()));
            }
            Some(SortOrder::NameAsc) => {
                result.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            }
            None => {}
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use telar_core::OptionList;

    fn product(id: i64, name: &str, category: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Decimal::new(price, 2),
            stock: 5,
            category: category.to_string(),
            sku: format!("SKU-{id:03}"),
            images: OptionList::new(),
            sizes: OptionList::new(),
            colors: OptionList::new(),
            discount_percent: None,
            discount_price: None,
            material: None,
            description: None,
        }
    }

    fn listing() -> Vec<Product> {
        vec![
            product(1, "Camisa lino", "camisas", 2990),
            product(2, "Pantalon corto", "pantalones", 1990),
            product(3, "Camisa oxford", "camisas", 3990),
        ]
    }

    #[test]
    fn test_filter_by_category() {
        let filter = ProductFilter {
            category: Some("camisas".to_string()),
            ..Default::default()
        };
        let result = filter.apply(&listing());
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|p| p.category == "camisas"));
    }

    #[test]
    fn test_filter_by_query_is_case_insensitive() {
        let filter = ProductFilter {
            query: Some("OXFORD".to_string()),
            ..Default::default()
        };
        let result = filter.apply(&listing());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Camisa oxford");
    }

    #[test]
    fn test_sort_by_price_descending() {
        let filter = ProductFilter {
            order: Some(SortOrder::PriceDesc),
            ..Default::default()
        };
        let result = filter.apply(&listing());
        let prices: Vec<_> = result.iter().map(|p| p.price).collect();
        assert_eq!(
            prices,
            vec![Decimal::new(3990, 2), Decimal::new(2990, 2), Decimal::new(1990, 2)]
        );
    }

    #[test]
    fn test_sort_uses_discounted_price() {
        let mut products = listing();
        if let Some(p) = products.get_mut(2) {
            p.discount_price = Some(Decimal::new(100, 2));
        }
        let filter = ProductFilter {
            order: Some(SortOrder::PriceAsc),
            ..Default::default()
        };
        let result = filter.apply(&products);
        assert_eq!(result[0].name, "Camisa oxford");
    }

    #[test]
    fn test_empty_filter_keeps_api_order() {
        let result = ProductFilter::default().apply(&listing());
        let ids: Vec<_> = result.iter().map(|p| p.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_view_state_settles_errors_to_failed() {
        let state: ViewState<Vec<Product>> =
            ViewState::settle(Err(CatalogError::NotFound("/api/products/9".to_string())));
        assert!(matches!(state, ViewState::Failed(_)));
        assert!(!state.is_ready());
    }

    #[test]
    fn test_home_view_starts_loading() {
        let view = HomeView::loading();
        assert!(matches!(view.products, ViewState::Loading));
        assert!(matches!(view.offers, ViewState::Loading));
        assert!(matches!(view.categories, ViewState::Loading));
    }

    #[tokio::test]
    async fn test_home_view_settles_failed_when_api_unreachable() {
        // Nothing listens on this port; all three regions settle to
        // Failed instead of leaving a rejection unhandled.
        let client = CatalogClient::new("http://127.0.0.1:9", Duration::from_secs(1))
            .expect("client");
        let view = HomeView::load(&client).await;
        assert!(matches!(view.products, ViewState::Failed(_)));
        assert!(matches!(view.offers, ViewState::Failed(_)));
        assert!(matches!(view.categories, ViewState::Failed(_)));
    }
}
