//! # storefront-db: Fixture Database for the Storefront
//!
//! SQLite storage behind the local API. It plays the part of the backend
//! the views talk to: the catalog lives here, the API serves it, and tests
//! create and delete fixtures through the same repositories.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Data Flow                             │
//! │                                                                         │
//! │  View ──► ResourceFetcher ──► Api::get("/products")                     │
//! │                                     │                                   │
//! │                                     ▼ (LocalApi)                        │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 storefront-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ ProductRepo    │    │  (embedded)  │  │   │
//! │  │   │  SqlitePool   │    │ CategoryRepo   │    │ 001_init.sql │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   fixtures.rs ── factories for tests and the seed binary        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_db::Database;
//!
//! let db = Database::open("storefront.db").await?;
//! let products = db.products().list().await?;
//! ```

pub mod error;
pub mod fixtures;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::Database;

pub use repository::category::CategoryRepository;
pub use repository::product::ProductRepository;
