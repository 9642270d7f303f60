//! # Fixture Factories
//!
//! Creates catalog rows with generated but deterministic data. Tests use
//! these to set up the database the local API serves; the `seed` binary and
//! the storefront binary use [`seed_demo_catalog`] for a development catalog.
//!
//! ## Usage
//! ```rust,ignore
//! let category = fixtures::create_category(&db, None).await?;
//! let product = fixtures::create_product(&db, category.id).await?;
//! // ... exercise views ...
//! fixtures::delete_products(&db, &[product.id]).await?;
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::info;

use crate::error::DbResult;
use crate::pool::Database;
use storefront_core::{Category, NewProduct, Product};

/// Demo catalog: category name and its product names.
const DEMO_CATALOG: &[(&str, &[&str])] = &[
    (
        "Bakery",
        &["White Bread", "Sourdough", "Croissant", "Bagel", "Baguette"],
    ),
    (
        "Dairy",
        &["Whole Milk", "Greek Yogurt", "Cheddar", "Butter", "Cream Cheese"],
    ),
    (
        "Beverages",
        &["Orange Juice", "Sparkling Water", "Iced Tea", "Coffee Beans", "Lemonade"],
    ),
];

/// Base names for generated products.
const PRODUCT_NAMES: &[&str] = &[
    "Bread", "Milk", "Cheese", "Apples", "Coffee", "Tea", "Honey", "Rice", "Pasta", "Butter",
];

static SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_sequence() -> u64 {
    SEQUENCE.fetch_add(1, Ordering::Relaxed)
}

/// Price in [1, 1000] derived from a sequence number.
fn generated_price(seq: u64) -> f64 {
    1.0 + ((seq * 37) % 999) as f64
}

/// Creates a category. Without a name, a unique one is generated.
pub async fn create_category(db: &Database, name: Option<&str>) -> DbResult<Category> {
    let name = match name {
        Some(name) => name.to_string(),
        None => format!("Category {}", next_sequence()),
    };
    db.categories().insert(&name).await
}

/// Creates a product with a generated name and price in `category_id`.
pub async fn create_product(db: &Database, category_id: i64) -> DbResult<Product> {
    let seq = next_sequence();
    let base = PRODUCT_NAMES[(seq as usize) % PRODUCT_NAMES.len()];

    db.products()
        .insert(&NewProduct {
            name: format!("{} #{}", base, seq),
            price: generated_price(seq),
            category_id,
        })
        .await
}

/// Deletes the given products, ignoring ids that are already gone.
pub async fn delete_products(db: &Database, ids: &[i64]) -> DbResult<u64> {
    db.products().delete_many(ids).await
}

/// Deletes the given categories (and, by cascade, their products).
pub async fn delete_categories(db: &Database, ids: &[i64]) -> DbResult<u64> {
    db.categories().delete_many(ids).await
}

/// Fills an empty database with the demo catalog.
///
/// ## Returns
/// Number of products created; `0` when the catalog already had products.
pub async fn seed_demo_catalog(db: &Database) -> DbResult<usize> {
    let existing = db.products().count().await?;
    if existing > 0 {
        info!(existing, "Catalog already populated, skipping seed");
        return Ok(0);
    }

    let mut created = 0;
    for (index, (category_name, products)) in DEMO_CATALOG.iter().enumerate() {
        let category = db.categories().insert(category_name).await?;

        for (offset, product_name) in products.iter().enumerate() {
            let seq = (index * 10 + offset) as u64;
            db.products()
                .insert(&NewProduct {
                    name: product_name.to_string(),
                    price: generated_price(seq) / 10.0 + 1.0,
                    category_id: category.id,
                })
                .await?;
            created += 1;
        }
    }

    info!(created, "Seeded demo catalog");
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_price_in_range() {
        for seq in 0..5000 {
            let price = generated_price(seq);
            assert!((1.0..=1000.0).contains(&price), "{price}");
        }
    }

    #[tokio::test]
    async fn test_factories_create_unique_rows() {
        let db = Database::in_memory().await.unwrap();

        let first = create_category(&db, None).await.unwrap();
        let second = create_category(&db, None).await.unwrap();
        assert_ne!(first.name, second.name);

        let a = create_product(&db, first.id).await.unwrap();
        let b = create_product(&db, first.id).await.unwrap();
        assert_ne!(a.name, b.name);
        assert_eq!(a.category_id, first.id);

        assert_eq!(delete_products(&db, &[a.id, b.id]).await.unwrap(), 2);
        assert_eq!(delete_categories(&db, &[first.id, second.id]).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let db = Database::in_memory().await.unwrap();

        let created = seed_demo_catalog(&db).await.unwrap();
        assert_eq!(created, 15);
        assert_eq!(db.categories().count().await.unwrap(), 3);

        assert_eq!(seed_demo_catalog(&db).await.unwrap(), 0);
        assert_eq!(db.products().count().await.unwrap(), 15);
    }
}
