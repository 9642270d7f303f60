//! Shared fixtures for the app's unit tests.

use storefront_core::{Category, Product};
use storefront_db::{fixtures, Database};

use crate::api::LocalApi;

/// A local API over a fresh in-memory catalog.
pub(crate) struct CatalogFixture {
    pub api: LocalApi,
    /// Two categories, in id order
    pub categories: Vec<Category>,
    /// Two products per category, in id order
    pub products: Vec<Product>,
}

pub(crate) async fn catalog_api() -> CatalogFixture {
    let db = Database::in_memory().await.unwrap();

    let mut categories = Vec::new();
    let mut products = Vec::new();
    for _ in 0..2 {
        let category = fixtures::create_category(&db, None).await.unwrap();
        for _ in 0..2 {
            products.push(fixtures::create_product(&db, category.id).await.unwrap());
        }
        categories.push(category);
    }

    CatalogFixture {
        api: LocalApi::new(db),
        categories,
        products,
    }
}
