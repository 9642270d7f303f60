//! # storefront-core: Pure Logic for the Storefront
//!
//! This crate holds everything the storefront views decide without touching
//! the network or the database.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Frontend (browser / terminal)                  │   │
//! │  │      Browse page ──► Product detail ──► Product form            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ view models                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          storefront-app (fetcher, views, cart provider)         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌────────────┐ ┌──────────┐ ┌──────────────┐   │   │
//! │  │   │  types   │ │ validation │ │  fetch   │ │ selector /   │   │   │
//! │  │   │ Product  │ │ name/price │ │FetchState│ │ filter       │   │   │
//! │  │   │ Category │ │ category   │ │Generation│ │ OrderStatus  │   │   │
//! │  │   └──────────┘ └────────────┘ └──────────┘ └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, OrderStatus)
//! - [`error`] - Domain, validation and fetch error types
//! - [`validation`] - Product form and cart validation
//! - [`fetch`] - The tri-state fetch union and request generations
//! - [`selector`] - Single-choice option sets with change callbacks
//! - [`filter`] - Client-side category and name filtering
//! - [`search`] - The free-text search box
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::validation::{validate_product_form, ProductFormInput};
//!
//! let input = ProductFormInput {
//!     name: "Bread".to_string(),
//!     price: "10".to_string(),
//!     category_id: Some(1),
//! };
//!
//! let product = validate_product_form(&input).unwrap();
//! assert_eq!(product.price, 10.0);
//! ```

pub mod error;
pub mod fetch;
pub mod filter;
pub mod search;
pub mod selector;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, FetchError, ValidationError, GENERIC_ERROR_MESSAGE};
pub use fetch::{FetchState, Generation, RequestTicket};
pub use filter::CategoryFilter;
pub use search::SearchBox;
pub use selector::{SelectOption, Selector};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product name, in characters.
pub const MAX_NAME_LENGTH: usize = 255;

/// Lowest accepted product price.
pub const MIN_PRICE: i64 = 1;

/// Highest accepted product price.
pub const MAX_PRICE: i64 = 1000;

/// Maximum distinct products allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single product in the cart.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: u32 = 999;
