//! # Product Repository
//!
//! Database operations for the product catalogue.
//!
//! Deleting a product keeps the sales that reference it: their lines lose
//! the product link (`ON DELETE SET NULL`) and analytics skips them.

use salestrack_core::input::ProductInput;
use salestrack_core::{Money, Product, ProductStatus};
use sqlx::SqlitePool;
use tracing::debug;

use super::{generate_id, now_timestamp};
use crate::error::{DbError, DbResult};

/// Raw `products` row.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    name: String,
    description: Option<String>,
    price_cents: i64,
    stock: i64,
    category: Option<String>,
    status: String,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            status: ProductStatus::from_token(&row.status).unwrap_or_default(),
            id: row.id,
            name: row.name,
            description: row.description,
            price: Money::from_cents(row.price_cents),
            stock: row.stock,
            category: row.category,
        }
    }
}

const SELECT_PRODUCTS: &str = r#"
    SELECT id, name, description, price_cents, stock, category, status
    FROM products
"#;

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
/// let all = repo.list().await?;
/// let one = repo.get_by_id("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists every product, ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let sql = format!("{SELECT_PRODUCTS} ORDER BY name, id");
        let rows: Vec<ProductRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        debug!(count = rows.len(), "Listed products");
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let sql = format!("{SELECT_PRODUCTS} WHERE id = ?1");
        let row: Option<ProductRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Product::from))
    }

    /// Inserts a new product with a generated ID.
    pub async fn create(&self, input: &ProductInput) -> DbResult<Product> {
        input.validate()?;

        let id = generate_id();
        let now = now_timestamp();
        debug!(id = %id, name = %input.name, "Creating product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, description, price_cents, stock, category, status,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
            "#,
        )
        .bind(&id)
        .bind(input.name.trim())
        .bind(&input.description)
        .bind(input.price.cents())
        .bind(input.stock)
        .bind(&input.category)
        .bind(input.status.as_str())
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id,
            name: input.name.trim().to_string(),
            description: input.description.clone(),
            price: input.price,
            stock: input.stock,
            category: input.category.clone(),
            status: input.status,
        })
    }

    /// Replaces a product's fields.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The updated product
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, id: &str, input: &ProductInput) -> DbResult<Product> {
        input.validate()?;
        debug!(id = %id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                price_cents = ?4,
                stock = ?5,
                category = ?6,
                status = ?7,
                updated_at = ?8
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(input.name.trim())
        .bind(&input.description)
        .bind(input.price.cents())
        .bind(input.stock)
        .bind(&input.category)
        .bind(input.status.as_str())
        .bind(now_timestamp())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Deletes a product.
    ///
    /// Returns `false` when no product had this ID.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use crate::DbError;
    use salestrack_core::input::ProductInput;
    use salestrack_core::{CoreError, Money, ProductStatus};

    fn input(name: &str, price_cents: i64) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            description: Some("Demo".to_string()),
            price: Money::from_cents(price_cents),
            stock: 10,
            category: Some("Electronics".to_string()),
            status: ProductStatus::Active,
        }
    }

    #[tokio::test]
    async fn test_create_get_list() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let laptop = repo.create(&input("Laptop", 250_000_00)).await.unwrap();
        repo.create(&input("Desk Lamp", 3_000_00)).await.unwrap();

        let fetched = repo.get_by_id(&laptop.id).await.unwrap().unwrap();
        assert_eq!(fetched, laptop);

        let names: Vec<_> = repo.list().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Desk Lamp", "Laptop"]);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();
        let chair = repo.create(&input("Office Chair", 35_000_00)).await.unwrap();

        let mut changed = input("Office Chair", 32_500_00);
        changed.status = ProductStatus::OutOfStock;
        changed.stock = 0;
        let updated = repo.update(&chair.id, &changed).await.unwrap();
        assert_eq!(updated.price.cents(), 32_500_00);
        assert_eq!(updated.status, ProductStatus::OutOfStock);

        assert!(repo.delete(&chair.id).await.unwrap());
        assert!(!repo.delete(&chair.id).await.unwrap());
        assert!(repo.get_by_id(&chair.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db
            .products()
            .update("missing", &input("Ghost", 100))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db.products().create(&input("  ", 100)).await.unwrap_err();
        assert!(matches!(err, DbError::Invalid(CoreError::Validation(_))));
        assert_eq!(db.products().count().await.unwrap(), 0);
    }
}
