//! # Category Filter
//!
//! Client-side projection of an already fetched product list, by category
//! and by the text typed into the search box.
//!
//! Filtering never issues a request: the browse page keeps the full list and
//! re-projects it whenever the selection changes, so switching back to
//! [`CategoryFilter::All`] always yields the original list in its original
//! order.

use serde::{Deserialize, Serialize};

use crate::types::{Category, Product};

/// Which products the browse table shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "categoryId")]
pub enum CategoryFilter {
    /// Every product.
    #[default]
    All,
    /// Only products whose `category_id` equals the id.
    Category(i64),
}

impl CategoryFilter {
    /// Whether `product` passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(id) => product.category_id == *id,
        }
    }

    /// Label shown in the category selector.
    pub fn label(&self, categories: &[Category]) -> String {
        match self {
            CategoryFilter::All => "All".to_string(),
            CategoryFilter::Category(id) => categories
                .iter()
                .find(|c| c.id == *id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| format!("Category {}", id)),
        }
    }
}

/// Whether `product`'s name contains `query`, ignoring case and the
/// query's surrounding whitespace. A blank query matches everything.
pub fn matches_search(product: &Product, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || product.name.to_lowercase().contains(&query.to_lowercase())
}

/// Returns the products passing both `filter` and `query`, preserving order.
pub fn filter_products<'a>(
    products: &'a [Product],
    filter: CategoryFilter,
    query: &str,
) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| filter.matches(p) && matches_search(p, query))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
