//! # Views Module
//!
//! View models for the storefront pages.
//!
//! Each view owns its fetchers and renders to a plain enum describing what
//! is on screen. Views take `&self` everywhere, so a view can be observed
//! while it is loading.
//!
//! ```text
//! ┌───────────────────────┬──────────────────────────────┬───────────────────┐
//! │ View                  │ Fetches                      │ Renders           │
//! ├───────────────────────┼──────────────────────────────┼───────────────────┤
//! │ BrowseProductsPage    │ /categories, /products       │ BrowseView        │
//! │   + SearchBox         │ (none, filters in memory)    │ BrowseView.search │
//! │ ProductDetail         │ /products/{id}               │ DetailView        │
//! │ ProductForm           │ /categories                  │ FormView          │
//! │ OrderStatusSelect     │ (static options)             │ labels            │
//! └───────────────────────┴──────────────────────────────┴───────────────────┘
//! ```

mod browse;
mod detail;
mod form;
mod order_status;

pub use browse::{
    BrowseProductsPage, BrowseView, CategorySlot, ProductRow, ProductTable, ProductsSlot,
    NO_MATCHES_MESSAGE, SEARCH_PLACEHOLDER,
};
pub use detail::{DetailView, ProductDetail};
pub use form::{FormField, FormFields, FormView, ProductForm, SubmitOutcome};
pub use order_status::OrderStatusSelect;
