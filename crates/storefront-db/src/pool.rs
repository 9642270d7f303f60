//! # Catalog Database
//!
//! Opens the SQLite catalog and hands out repositories.
//!
//! ```text
//! Database::open(path)     file on disk, WAL journal, created if missing
//! Database::in_memory()    one private connection that lives as long as the pool
//!        │
//!        ├── foreign keys on (deleting a category deletes its products)
//!        ├── pending migrations applied
//!        ▼
//! db.products() / db.categories()
//! ```

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;
use crate::migrations;
use crate::repository::category::CategoryRepository;
use crate::repository::product::ProductRepository;

/// Connections kept for a file-backed catalog. The storefront issues at
/// most a handful of concurrent reads (categories and products on mount).
const FILE_CONNECTIONS: u32 = 4;

/// Handle to the catalog. Cloning shares the pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (or creates) the catalog file at `path`.
    pub async fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Opening catalog database");

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        Self::connect(options, FILE_CONNECTIONS).await
    }

    /// Opens an empty catalog that disappears with the handle.
    ///
    /// Each in-memory connection is a separate database, so the pool is
    /// pinned to one connection that is never recycled.
    pub async fn in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        Self::connect(options, 1).await
    }

    async fn connect(options: SqliteConnectOptions, connections: u32) -> DbResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(connections)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options.foreign_keys(true))
            .await?;

        migrations::run_migrations(&pool).await?;

        Ok(Database { pool })
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(self.pool.clone())
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        info!("Closing catalog database");
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DbError;

    #[tokio::test]
    async fn test_in_memory_catalogs_are_isolated() {
        let first = Database::in_memory().await.unwrap();
        let second = Database::in_memory().await.unwrap();

        first.categories().insert("Bakery").await.unwrap();

        assert_eq!(first.categories().count().await.unwrap(), 1);
        assert_eq!(second.categories().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_file_catalog_persists_across_opens() {
        let stamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir()
            .join(format!("storefront-{}-{}.db", std::process::id(), stamp));

        let db = Database::open(&path).await.unwrap();
        db.categories().insert("Bakery").await.unwrap();
        db.close().await;

        let reopened = Database::open(&path).await.unwrap();
        assert_eq!(reopened.categories().count().await.unwrap(), 1);
        reopened.close().await;

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_closed_database_rejects_queries() {
        let db = Database::in_memory().await.unwrap();
        db.close().await;

        assert!(matches!(db.categories().count().await, Err(DbError::Sqlx(_))));
    }
}
