//! # Database Error Types
//!
//! What can go wrong while reading or writing the catalog.
//!
//! ## Error Flow
//! ```text
//! sqlx::Error
//!      │
//!      ├── CHECK constraint  ──► ConstraintViolation   (name length, price)
//!      ├── UNIQUE on name    ──► DuplicateCategory     (mapped by CategoryRepository)
//!      ├── FOREIGN KEY       ──► UnknownCategory       (mapped by ProductRepository)
//!      └── anything else     ──► Sqlx
//!      │
//!      ▼
//! ApiError (storefront-app) ◄── never shows the SQLite message to a view
//! ```

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// A delete targeted a row that does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// A category with this name already exists.
    #[error("Category '{0}' already exists")]
    DuplicateCategory(String),

    /// A product references a category that does not exist.
    #[error("Category {0} does not exist")]
    UnknownCategory(i64),

    /// A row failed one of the schema's CHECK constraints.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Database error: {0}")]
    Sqlx(sqlx::Error),
}

impl DbError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        DbError::NotFound { entity, id }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match constraint_kind(&err) {
            Some(ErrorKind::CheckViolation) => DbError::ConstraintViolation(err.to_string()),
            _ => DbError::Sqlx(err),
        }
    }
}

/// Which constraint, if any, rejected the statement.
pub(crate) fn constraint_kind(err: &sqlx::Error) -> Option<ErrorKind> {
    match err {
        sqlx::Error::Database(db_err) => Some(db_err.kind()),
        _ => None,
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = DbError::not_found("Product", 42);
        assert_eq!(err.to_string(), "Product not found: 42");
    }

    #[test]
    fn test_non_constraint_errors_pass_through() {
        assert!(constraint_kind(&sqlx::Error::PoolClosed).is_none());

        let err: DbError = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, DbError::Sqlx(sqlx::Error::PoolClosed)));
    }
}
