//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Listing the whole catalog
//! - Lookup by id
//! - Insert from a validated [`NewProduct`]
//! - Deletes, used by test fixtures to clean up after themselves

use sqlx::error::ErrorKind;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{constraint_kind, DbError, DbResult};
use storefront_core::{NewProduct, Product};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let all = repo.list().await?;
/// let product = repo.get_by_id(1).await?;
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

    /// Lists every product, ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, category_id
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, category_id
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product and returns it with its generated id.
    ///
    /// ## Errors
    /// * `DbError::UnknownCategory` - the category does not exist
    /// * `DbError::ConstraintViolation` - name or price out of bounds
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        debug!(name = %product.name, category_id = product.category_id, "Inserting product");

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, price, category_id)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(product.category_id)
        .execute(&self.pool)
        .await
        .map_err(|e| match constraint_kind(&e) {
            Some(ErrorKind::ForeignKeyViolation) => DbError::UnknownCategory(product.category_id),
            _ => DbError::from(e),
        })?;

        Ok(Product {
            id: result.last_insert_rowid(),
            name: product.name.clone(),
            price: product.price,
            category_id: product.category_id,
        })
    }

    /// Deletes a product.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Deletes every product whose id is in `ids`. Missing ids are skipped.
    ///
    /// ## Returns
    /// Number of rows deleted.
    pub async fn delete_many(&self, ids: &[i64]) -> DbResult<u64> {
        let mut tx = self.pool.begin().await?;
        let mut deleted = 0;

        for id in ids {
            deleted += sqlx::query("DELETE FROM products WHERE id = ?1")
                .bind(id)
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }

        tx.commit().await?;
        debug!(requested = ids.len(), deleted, "Deleted products");
        Ok(deleted)
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
