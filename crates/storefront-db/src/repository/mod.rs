//! # Repository Module
//!
//! Database repository implementations for the catalog.
//!
//! ## Repository Pattern
//! ```text
//! LocalApi route
//!      │
//!      │  db.products().get_by_id(1)
//!      ▼
//! ProductRepository / CategoryRepository
//!      │
//!      │  SQL query
//!      ▼
//! SQLite database
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product reads, inserts, deletes
//! - [`CategoryRepository`](category::CategoryRepository) - Category reads, inserts, deletes

pub mod category;
pub mod product;
