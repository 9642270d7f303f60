//! # Category Repository
//!
//! Database operations for categories.

use sqlx::error::ErrorKind;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{constraint_kind, DbError, DbResult};
use storefront_core::Category;

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists every category, ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name
            FROM categories
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = categories.len(), "Listed categories");
        Ok(categories)
    }

    /// Gets a category by its id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(category)
    }

    /// Inserts a category.
    ///
    /// ## Errors
    /// * `DbError::DuplicateCategory` - a category with that name exists
    pub async fn insert(&self, name: &str) -> DbResult<Category> {
        debug!(name = %name, "Inserting category");

        let result = sqlx::query("INSERT INTO categories (name) VALUES (?1)")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| match constraint_kind(&e) {
                Some(ErrorKind::UniqueViolation) => DbError::DuplicateCategory(name.to_string()),
                _ => DbError::from(e),
            })?;

        Ok(Category {
            id: result.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    /// Deletes a category. Its products are removed with it.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting category");

        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(())
    }

    /// Deletes every category whose id is in `ids`. Missing ids are skipped.
    pub async fn delete_many(&self, ids: &[i64]) -> DbResult<u64> {
        let mut tx = self.pool.begin().await?;
        let mut deleted = 0;

        for id in ids {
            deleted += sqlx::query("DELETE FROM categories WHERE id = ?1")
                .bind(id)
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }

        tx.commit().await?;
        Ok(deleted)
    }

    /// Counts all categories.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbError};
    use storefront_core::NewProduct;

    #[tokio::test]
    async fn test_insert_and_list() {
        let db = Database::in_memory().await.unwrap();

        let bakery = db.categories().insert("Bakery").await.unwrap();
        let dairy = db.categories().insert("Dairy").await.unwrap();

        let all = db.categories().list().await.unwrap();
        assert_eq!(all, vec![bakery.clone(), dairy]);
        assert_eq!(db.categories().get_by_id(bakery.id).await.unwrap(), Some(bakery));
    }

    #[tokio::test]
    async fn test_duplicate_name_is_rejected() {
        let db = Database::in_memory().await.unwrap();
        db.categories().insert("Bakery").await.unwrap();

        let err = db.categories().insert("Bakery").await.unwrap_err();
        match err {
            DbError::DuplicateCategory(name) => assert_eq!(name, "Bakery"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_delete_cascades_to_products() {
        let db = Database::in_memory().await.unwrap();
        let bakery = db.categories().insert("Bakery").await.unwrap();
        db.products()
            .insert(&NewProduct {
                name: "Bread".to_string(),
                price: 3.0,
                category_id: bakery.id,
            })
            .await
            .unwrap();

        db.categories().delete(bakery.id).await.unwrap();

        assert_eq!(db.categories().count().await.unwrap(), 0);
        assert_eq!(db.products().count().await.unwrap(), 0);
        assert_eq!(db.categories().delete_many(&[bakery.id]).await.unwrap(), 0);
    }
}
