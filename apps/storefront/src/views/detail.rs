//! # Product Detail
//!
//! Shows one product, fetched by id.
//!
//! ```text
//! load(api, id)
//!    │
//!    ├── id <= 0 ──────────► Invalid   (no request)
//!    │
//!    └── GET /products/{id}
//!           ├── product ───► Product { name, price }
//!           ├── null ──────► NotFound
//!           └── failure ───► Error     (generic message)
//! ```

use std::fmt;
use std::sync::Mutex;

use storefront_core::validation::validate_product_id;
use storefront_core::{FetchError, FetchState, Product};

use crate::api::Api;
use crate::fetcher::ResourceFetcher;
use crate::state::AppConfig;

/// What the detail view shows.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Loading,
    Invalid(String),
    NotFound(String),
    Error(String),
    Product { name: String, price: f64 },
}

impl DetailView {
    pub fn to_text(&self, config: &AppConfig) -> String {
        match self {
            DetailView::Loading => "Loading...".to_string(),
            DetailView::Invalid(message)
            | DetailView::NotFound(message)
            | DetailView::Error(message) => message.clone(),
            DetailView::Product { name, price } => {
                format!("{}\nPrice: {}", name, config.format_price(*price))
            }
        }
    }
}

impl fmt::Display for DetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text(&AppConfig::default()))
    }
}

/// Detail view for a single product.
#[derive(Debug)]
pub struct ProductDetail {
    product: ResourceFetcher<Product>,
    product_id: Mutex<Option<i64>>,
}

impl ProductDetail {
    pub fn new() -> Self {
        ProductDetail {
            product: ResourceFetcher::new("product"),
            product_id: Mutex::new(None),
        }
    }

    /// Mounts the view for `id`, issuing exactly one request for a valid id.
    pub async fn load(&self, api: &dyn Api, id: i64) -> DetailView {
        *self.product_id.lock().expect("Detail mutex poisoned") = Some(id);

        if validate_product_id(id).is_err() {
            self.product.reject(FetchError::InvalidId {
                resource: "product".to_string(),
                id,
            });
            return self.render();
        }

        self.product.load(api, &format!("/products/{}", id)).await;
        self.render()
    }

    /// Switches to `id`, re-fetching only when it differs from the current one.
    pub async fn set_product_id(&self, api: &dyn Api, id: i64) -> DetailView {
        let current = *self.product_id.lock().expect("Detail mutex poisoned");
        if current == Some(id) {
            return self.render();
        }
        self.load(api, id).await
    }

    pub fn product_id(&self) -> Option<i64> {
        *self.product_id.lock().expect("Detail mutex poisoned")
    }

    /// Requests issued so far (invalid ids count as a rejected request).
    pub fn requests_issued(&self) -> u64 {
        self.product.requests_issued()
    }

    pub fn render(&self) -> DetailView {
        match self.product.state() {
            FetchState::Loading => DetailView::Loading,
            FetchState::Loaded(product) => DetailView::Product {
                name: product.name,
                price: product.price,
            },
            FetchState::Failed(err) => {
                let message = err.user_message();
                match err {
                    FetchError::InvalidId { .. } => DetailView::Invalid(message),
                    FetchError::NotFound { .. } => DetailView::NotFound(message),
                    FetchError::Network(_) => DetailView::Error(message),
                }
            }
        }
    }
}

impl Default for ProductDetail {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::catalog_api;
    use std::time::Duration;
    use storefront_core::GENERIC_ERROR_MESSAGE;

    #[tokio::test]
    async fn test_invalid_id_issues_no_request() {
        let fixture = catalog_api().await;
        let detail = ProductDetail::new();

        for id in [0, -1] {
            let view = detail.load(&fixture.api, id).await;
            assert!(matches!(&view, DetailView::Invalid(m) if m.to_lowercase().contains("invalid")));
        }

        assert!(fixture.api.requests().is_empty());
    }

    #[tokio::test]
    async fn test_null_payload_shows_not_found() {
        let fixture = catalog_api().await;
        let id = fixture.products[0].id;
        fixture.api.faults().respond_null(format!("/products/{}", id));

        let view = ProductDetail::new().load(&fixture.api, id).await;

        assert!(matches!(&view, DetailView::NotFound(m) if m.contains("not found")));
        assert!(!view.to_string().contains(GENERIC_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn test_failure_shows_generic_error() {
        let fixture = catalog_api().await;
        let id = fixture.products[0].id;
        fixture.api.faults().fail(format!("/products/{}", id));

        let view = ProductDetail::new().load(&fixture.api, id).await;

        assert_eq!(view, DetailView::Error(GENERIC_ERROR_MESSAGE.to_string()));
    }

    #[tokio::test]
    async fn test_renders_name_and_price() {
        let fixture = catalog_api().await;
        let product = &fixture.products[1];

        let view = ProductDetail::new().load(&fixture.api, product.id).await;

        assert_eq!(
            view,
            DetailView::Product {
                name: product.name.clone(),
                price: product.price,
            }
        );
        let text = view.to_string();
        assert!(text.contains(&product.name));
        assert!(text.contains(&format!("{:.2}", product.price)));
    }

    #[tokio::test]
    async fn test_loading_until_settled() {
        let fixture = catalog_api().await;
        let id = fixture.products[0].id;
        fixture
            .api
            .faults()
            .delay(format!("/products/{}", id), Duration::from_millis(50));
        let detail = ProductDetail::new();

        let observe = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            detail.render()
        };
        let (settled, during) = tokio::join!(detail.load(&fixture.api, id), observe);

        assert_eq!(during, DetailView::Loading);
        assert!(matches!(settled, DetailView::Product { .. }));
    }

    #[tokio::test]
    async fn test_same_id_does_not_refetch() {
        let fixture = catalog_api().await;
        let first = fixture.products[0].id;
        let second = fixture.products[1].id;
        let detail = ProductDetail::new();

        detail.load(&fixture.api, first).await;
        detail.set_product_id(&fixture.api, first).await;
        assert_eq!(fixture.api.requests().len(), 1);

        detail.set_product_id(&fixture.api, second).await;
        assert_eq!(fixture.api.requests().len(), 2);
        assert_eq!(detail.product_id(), Some(second));
    }

    #[tokio::test]
    async fn test_superseded_response_is_dropped() {
        let fixture = catalog_api().await;
        let slow = &fixture.products[0];
        let fast = &fixture.products[1];
        fixture
            .api
            .faults()
            .delay(format!("/products/{}", slow.id), Duration::from_millis(50));
        let detail = ProductDetail::new();

        // The slow request starts first but settles last.
        let (_, latest) = tokio::join!(
            detail.load(&fixture.api, slow.id),
            detail.load(&fixture.api, fast.id)
        );

        let expected = DetailView::Product {
            name: fast.name.clone(),
            price: fast.price,
        };
        assert_eq!(latest, expected);
        assert_eq!(detail.render(), expected);
    }
}
