//! Product repository for database operations.

use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use telar_core::{OptionList, Product, ProductId};

use super::RepositoryError;

/// Raw product row; option columns arrive as stored text and are
/// normalized into [`OptionList`] when converting to [`Product`].
#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: Decimal,
    stock: i32,
    category: String,
    sku: String,
    images: Option<String>,
    sizes: Option<String>,
    colors: Option<String>,
    discount_percent: Option<Decimal>,
    discount_price: Option<Decimal>,
    material: Option<String>,
    description: Option<String>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let stock = u32::try_from(row.stock).map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "negative stock {} for product {}",
                row.stock, row.id
            ))
        })?;
        Ok(Self {
            id: ProductId::new(row.id),
            name: row.name,
            price: row.price,
            stock,
            category: row.category,
            sku: row.sku,
            images: row.images.as_deref().map(OptionList::from_raw).unwrap_or_default(),
            sizes: row.sizes.as_deref().map(OptionList::from_raw).unwrap_or_default(),
            colors: row.colors.as_deref().map(OptionList::from_raw).unwrap_or_default(),
            discount_percent: row.discount_percent,
            discount_price: row.discount_price,
            material: row.material,
            description: row.description,
        })
    }
}

const PRODUCT_COLUMNS: &str = "id, name, price, stock, category, sku, images, sizes, colors, \
                               discount_percent, discount_price, material, description";

/// Repository for product reads. The API never writes products.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `DataCorruption` if a row violates the data model.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> =
            sqlx::query_as(&format!("SELECT {PRODUCT_COLUMNS} FROM product ORDER BY id"))
                .fetch_all(self.pool)
                .await?;
        rows.into_iter().map(Product::try_from).collect()
    }

    /// Get a product by id, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `DataCorruption` if the row violates the data model.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> =
            sqlx::query_as(&format!("SELECT {PRODUCT_COLUMNS} FROM product WHERE id = $1"))
                .bind(id.as_i64())
                .fetch_optional(self.pool)
                .await?;
        row.map(Product::try_from).transpose()
    }

    /// List products carrying a discount.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `DataCorruption` if a row violates the data model.
    pub async fn discounted(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE discount_price IS NOT NULL ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;
        rows.into_iter().map(Product::try_from).collect()
    }

    /// Distinct category names, ordered.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn categories(&self) -> Result<Vec<String>, RepositoryError> {
        let categories: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT category FROM product ORDER BY category")
                .fetch_all(self.pool)
                .await?;
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(images: Option<&str>, sizes: Option<&str>) -> ProductRow {
        ProductRow {
            id: 7,
            name: "Camisa lino".to_string(),
            price: Decimal::new(2990, 2),
            stock: 3,
            category: "camisas".to_string(),
            sku: "CAM-007".to_string(),
            images: images.map(String::from),
            sizes: sizes.map(String::from),
            colors: None,
            discount_percent: None,
            discount_price: None,
            material: Some("lino".to_string()),
            description: None,
        }
    }

    #[test]
    fn test_row_decode_normalizes_delimited_options() {
        let product = Product::try_from(row(Some("a.jpg,b.jpg"), Some("S, M"))).expect("convert");
        assert_eq!(product.images.as_slice(), ["a.jpg", "b.jpg"]);
        assert_eq!(product.sizes.as_slice(), ["S", "M"]);
    }

    #[test]
    fn test_row_decode_normalizes_json_string_options() {
        let product =
            Product::try_from(row(None, Some(r#"["S","M","L"]"#))).expect("convert");
        assert!(product.images.is_empty());
        assert_eq!(product.sizes.as_slice(), ["S", "M", "L"]);
    }

    #[test]
    fn test_negative_stock_is_data_corruption() {
        let mut bad = row(None, None);
        bad.stock = -1;
        let result = Product::try_from(bad);
        assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));
    }
}
