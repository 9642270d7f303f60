//! # Browse Products Page
//!
//! Product table with a category filter and a name search, composed from
//! two independent fetches.
//!
//! ## Composition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       BrowseProductsPage<'cart>                         │
//! │                                                                         │
//! │   GET /categories ──► categories fetcher ──► CategorySlot               │
//! │                             Loading  ──► Skeleton("categories")         │
//! │                             Failed   ──► Hidden (no error shown)        │
//! │                             Loaded   ──► Selector [All, c1, c2, ...]    │
//! │                                              │ select                   │
//! │                                              ▼                          │
//! │   SearchBox ──► search text ──────────► CategoryFilter + text           │
//! │                                              │                          │
//! │   GET /products   ──► products fetcher ──────┼──► ProductsSlot          │
//! │                             Loading  ──► Skeleton("products")           │
//! │                             Failed   ──► Error(generic message)         │
//! │                             Loaded   ──► filter ──► Table | Empty       │
//! │                                                                         │
//! │   CartContext<'cart> ──► quantity column, add / remove                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both requests are issued together and settle independently. Changing the
//! filter or the search text re-projects the list already in memory and
//! never re-fetches.

use std::fmt;
use std::sync::{Arc, Mutex};

use storefront_core::filter::filter_products;
use storefront_core::validation::ValidationResult;
use storefront_core::{
    Category, CategoryFilter, CoreResult, FetchState, Product, SearchBox, Selector,
    ValidationError,
};
use tracing::debug;

use crate::api::Api;
use crate::fetcher::ResourceFetcher;
use crate::state::{AppConfig, CartContext};

/// Message shown when the filter leaves no rows.
pub const NO_MATCHES_MESSAGE: &str = "No products match the selected category.";

/// Placeholder of the name search box.
pub const SEARCH_PLACEHOLDER: &str = "Search products";

/// The category area of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum CategorySlot {
    /// Categories are loading.
    Skeleton,
    /// Categories failed; the selector is omitted.
    Hidden,
    Selector {
        options: Vec<String>,
        selected: String,
    },
}

/// The product area of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductsSlot {
    /// Products are loading.
    Skeleton,
    Error(String),
    /// Products loaded but none match the filter.
    Empty,
    Table(ProductTable),
}

/// One data row of the product table.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub price: f64,
    /// Quantity of this product in the cart
    pub in_cart: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductTable {
    pub header: [&'static str; 3],
    pub rows: Vec<ProductRow>,
}

/// Everything the page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseView {
    pub categories: CategorySlot,
    /// Text in the search box
    pub search: String,
    pub products: ProductsSlot,
}

impl BrowseView {
    /// Number of table data rows, header excluded.
    pub fn data_row_count(&self) -> usize {
        match &self.products {
            ProductsSlot::Table(table) => table.rows.len(),
            _ => 0,
        }
    }

    pub fn to_text(&self, config: &AppConfig) -> String {
        let mut out = format!("{}\n\n", config.store_name);

        match &self.categories {
            CategorySlot::Skeleton => out.push_str("[loading categories]\n"),
            CategorySlot::Hidden => {}
            CategorySlot::Selector { options, selected } => {
                out.push_str(&format!("Category: {}  ({})\n", selected, options.join(" | ")));
            }
        }
        if self.search.is_empty() {
            out.push_str(&format!("Search: [{}]\n", SEARCH_PLACEHOLDER));
        } else {
            out.push_str(&format!("Search: {}\n", self.search));
        }
        out.push('\n');

        match &self.products {
            ProductsSlot::Skeleton => out.push_str("[loading products]\n"),
            ProductsSlot::Error(message) => out.push_str(&format!("{}\n", message)),
            ProductsSlot::Empty => out.push_str(&format!("{}\n", NO_MATCHES_MESSAGE)),
            ProductsSlot::Table(table) => {
                out.push_str(&format!(
                    "{:<32} {:>12} {:>8}\n",
                    table.header[0], table.header[1], table.header[2]
                ));
                for row in &table.rows {
                    out.push_str(&format!(
                        "{:<32} {:>12} {:>8}\n",
                        row.name,
                        config.format_price(row.price),
                        row.in_cart
                    ));
                }
            }
        }

        out
    }
}

impl fmt::Display for BrowseView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text(&AppConfig::default()))
    }
}

/// The browse page, bound to the cart of an enclosing [`CartProvider`].
///
/// [`CartProvider`]: crate::state::CartProvider
pub struct BrowseProductsPage<'cart> {
    categories: ResourceFetcher<Vec<Category>>,
    products: ResourceFetcher<Vec<Product>>,
    filter: Arc<Mutex<CategoryFilter>>,
    selector: Mutex<Option<Selector<CategoryFilter>>>,
    search: Arc<Mutex<String>>,
    search_box: Mutex<SearchBox>,
    cart: CartContext<'cart>,
}

impl<'cart> BrowseProductsPage<'cart> {
    pub fn new(cart: CartContext<'cart>) -> Self {
        let search = Arc::new(Mutex::new(String::new()));
        let sink = Arc::clone(&search);
        let search_box = SearchBox::new(SEARCH_PLACEHOLDER, move |text| {
            *sink.lock().expect("Search mutex poisoned") = text.to_string();
        });

        BrowseProductsPage {
            categories: ResourceFetcher::new("categories"),
            products: ResourceFetcher::new("products"),
            filter: Arc::new(Mutex::new(CategoryFilter::All)),
            selector: Mutex::new(None),
            search,
            search_box: Mutex::new(search_box),
            cart,
        }
    }

    /// Mounts the page: fetches categories and products concurrently.
    pub async fn load(&self, api: &dyn Api) -> BrowseView {
        let categories = async {
            let state = self.categories.load(api, "/categories").await;
            self.install_selector(&state);
        };
        let products = self.products.load(api, "/products");

        tokio::join!(categories, products);
        self.render()
    }

    fn install_selector(&self, state: &FetchState<Vec<Category>>) {
        let Some(categories) = state.data() else {
            return;
        };

        let current = self.filter();
        let filter = Arc::clone(&self.filter);
        let selector = Selector::category_filter(categories, move |value| {
            *filter.lock().expect("Filter mutex poisoned") = *value;
        })
        .with_default(current);

        *self.selector.lock().expect("Selector mutex poisoned") = Some(selector);
    }

    pub fn filter(&self) -> CategoryFilter {
        *self.filter.lock().expect("Filter mutex poisoned")
    }

    /// Selects a category filter through the selector.
    ///
    /// Fails with `NotAllowed` when the selector is not shown or `filter`
    /// is not one of its options.
    pub fn select_category(&self, filter: CategoryFilter) -> ValidationResult<()> {
        let mut selector = self.selector.lock().expect("Selector mutex poisoned");
        let selector = selector.as_mut().ok_or_else(|| ValidationError::NotAllowed {
            field: "category".to_string(),
            allowed: Vec::new(),
        })?;

        selector.select(filter)?;
        debug!(?filter, "Category filter changed");
        Ok(())
    }

    /// Selects a category filter by its option label.
    pub fn select_category_label(&self, label: &str) -> ValidationResult<()> {
        let mut selector = self.selector.lock().expect("Selector mutex poisoned");
        let selector = selector.as_mut().ok_or_else(|| ValidationError::NotAllowed {
            field: "category".to_string(),
            allowed: Vec::new(),
        })?;
        selector.select_label(label)
    }

    /// Types `text` into the search box. Shown even while loading.
    pub fn search(&self, text: &str) {
        if self.search_box.lock().expect("Search box mutex poisoned").set_text(text) {
            debug!(text, "Search text changed");
        }
    }

    /// The search text the table is currently filtered by.
    pub fn search_text(&self) -> String {
        self.search.lock().expect("Search mutex poisoned").clone()
    }

    pub fn add_to_cart(&self, product_id: i64) -> CoreResult<()> {
        self.cart.add(product_id, 1)
    }

    /// Takes one unit of a product out of the cart.
    pub fn remove_from_cart(&self, product_id: i64) -> CoreResult<()> {
        let quantity = self.cart.quantity_of(product_id);
        self.cart.update(product_id, quantity.saturating_sub(1))
    }

    pub fn render(&self) -> BrowseView {
        BrowseView {
            categories: self.render_categories(),
            search: self.search_text(),
            products: self.render_products(),
        }
    }

    fn render_categories(&self) -> CategorySlot {
        match self.categories.state() {
            FetchState::Loading => CategorySlot::Skeleton,
            FetchState::Failed(_) => CategorySlot::Hidden,
            FetchState::Loaded(_) => {
                let selector = self.selector.lock().expect("Selector mutex poisoned");
                match selector.as_ref() {
                    Some(selector) => CategorySlot::Selector {
                        options: selector.labels().into_iter().map(String::from).collect(),
                        selected: selector.selected_label().unwrap_or("All").to_string(),
                    },
                    None => CategorySlot::Skeleton,
                }
            }
        }
    }

    fn render_products(&self) -> ProductsSlot {
        match self.products.state() {
            FetchState::Loading => ProductsSlot::Skeleton,
            FetchState::Failed(err) => ProductsSlot::Error(err.user_message()),
            FetchState::Loaded(products) => {
                let search = self.search_text();
                let rows: Vec<ProductRow> = filter_products(&products, self.filter(), &search)
                    .into_iter()
                    .map(|p| ProductRow {
                        id: p.id,
                        name: p.name.clone(),
                        price: p.price,
                        in_cart: self.cart.quantity_of(p.id),
                    })
                    .collect();

                if rows.is_empty() {
                    ProductsSlot::Empty
                } else {
                    ProductsSlot::Table(ProductTable {
                        header: ["Name", "Price", "In cart"],
                        rows,
                    })
                }
            }
        }
    }
}

impl fmt::Debug for BrowseProductsPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowseProductsPage")
            .field("categories", &self.categories)
            .field("products", &self.products)
            .field("filter", &self.filter())
            .field("search", &self.search_text())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CartProvider;
    use crate::test_support::catalog_api;
    use std::time::Duration;
    use storefront_core::GENERIC_ERROR_MESSAGE;

    /// Ids of the products whose name contains `query`, ignoring case.
    fn matching_ids(products: &[Product], query: &str, category_id: Option<i64>) -> Vec<i64> {
        products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&query.to_lowercase()))
            .filter(|p| category_id.map_or(true, |id| p.category_id == id))
            .map(|p| p.id)
            .collect()
    }

    #[tokio::test]
    async fn test_filters_by_category_and_back_to_all() {
        let fixture = catalog_api().await;
        let provider = CartProvider::new();
        let page = BrowseProductsPage::new(provider.context());

        let view = page.load(&fixture.api).await;
        assert_eq!(view.data_row_count(), 4);

        let first = fixture.categories[0].id;
        page.select_category(CategoryFilter::Category(first)).unwrap();
        let view = page.render();
        assert_eq!(view.data_row_count(), 2);
        match &view.products {
            ProductsSlot::Table(table) => {
                let expected: Vec<i64> = fixture
                    .products
                    .iter()
                    .filter(|p| p.category_id == first)
                    .map(|p| p.id)
                    .collect();
                let shown: Vec<i64> = table.rows.iter().map(|r| r.id).collect();
                assert_eq!(shown, expected);
            }
            other => panic!("expected a table, got {:?}", other),
        }

        page.select_category_label("All").unwrap();
        assert_eq!(page.render().data_row_count(), 4);

        // Filtering never re-fetches.
        assert_eq!(fixture.api.request_count("/products"), 1);
    }

    #[tokio::test]
    async fn test_selector_lists_all_then_categories() {
        let fixture = catalog_api().await;
        let provider = CartProvider::new();
        let page = BrowseProductsPage::new(provider.context());

        let view = page.load(&fixture.api).await;

        let mut expected = vec!["All".to_string()];
        expected.extend(fixture.categories.iter().map(|c| c.name.clone()));
        assert_eq!(
            view.categories,
            CategorySlot::Selector {
                options: expected,
                selected: "All".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_skeletons_while_loading() {
        let fixture = catalog_api().await;
        fixture
            .api
            .faults()
            .delay("/categories", Duration::from_millis(50));
        fixture.api.faults().delay("/products", Duration::from_millis(50));
        let provider = CartProvider::new();
        let page = BrowseProductsPage::new(provider.context());

        let observe = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            page.render()
        };
        let (_, during) = tokio::join!(page.load(&fixture.api), observe);

        assert_eq!(during.categories, CategorySlot::Skeleton);
        assert_eq!(during.products, ProductsSlot::Skeleton);
        assert!(during.to_string().contains("[loading categories]"));
        assert!(during.to_string().contains("[loading products]"));
    }

    #[tokio::test]
    async fn test_loading_states_are_independent() {
        let fixture = catalog_api().await;
        fixture.api.faults().hang("/categories");
        let provider = CartProvider::new();
        let page = BrowseProductsPage::new(provider.context());

        let load = tokio::time::timeout(Duration::from_millis(50), page.load(&fixture.api)).await;
        assert!(load.is_err());

        let view = page.render();
        assert_eq!(view.categories, CategorySlot::Skeleton);
        assert_eq!(view.data_row_count(), 4);
    }

    #[tokio::test]
    async fn test_categories_failure_hides_selector_without_error() {
        let fixture = catalog_api().await;
        fixture.api.faults().fail("/categories");
        let provider = CartProvider::new();
        let page = BrowseProductsPage::new(provider.context());

        let view = page.load(&fixture.api).await;

        assert_eq!(view.categories, CategorySlot::Hidden);
        assert_eq!(view.data_row_count(), 4);
        assert!(!view.to_string().contains(GENERIC_ERROR_MESSAGE));
        assert!(page.select_category(CategoryFilter::All).is_err());
    }

    #[tokio::test]
    async fn test_products_failure_shows_error() {
        let fixture = catalog_api().await;
        fixture.api.faults().fail("/products");
        let provider = CartProvider::new();
        let page = BrowseProductsPage::new(provider.context());

        let view = page.load(&fixture.api).await;

        assert_eq!(
            view.products,
            ProductsSlot::Error(GENERIC_ERROR_MESSAGE.to_string())
        );
        assert!(view.to_string().contains("error"));
        assert!(!view.to_string().contains(NO_MATCHES_MESSAGE));
    }

    #[tokio::test]
    async fn test_empty_category_is_not_an_error() {
        let fixture = catalog_api().await;
        let empty = storefront_db::fixtures::create_category(fixture.api.db(), Some("Empty"))
            .await
            .unwrap();
        let provider = CartProvider::new();
        let page = BrowseProductsPage::new(provider.context());
        page.load(&fixture.api).await;

        page.select_category(CategoryFilter::Category(empty.id)).unwrap();

        let view = page.render();
        assert_eq!(view.products, ProductsSlot::Empty);
        assert!(view.to_string().contains(NO_MATCHES_MESSAGE));
    }

    #[tokio::test]
    async fn test_unknown_category_is_rejected() {
        let fixture = catalog_api().await;
        let provider = CartProvider::new();
        let page = BrowseProductsPage::new(provider.context());
        page.load(&fixture.api).await;

        let err = page
            .select_category(CategoryFilter::Category(9999))
            .unwrap_err();

        assert!(matches!(err, ValidationError::NotAllowed { .. }));
        assert_eq!(page.filter(), CategoryFilter::All);
    }

    #[tokio::test]
    async fn test_search_narrows_rows_by_name() {
        let fixture = catalog_api().await;
        let provider = CartProvider::new();
        let page = BrowseProductsPage::new(provider.context());
        page.load(&fixture.api).await;
        let target = &fixture.products[3];

        page.search(&target.name.to_uppercase());

        let view = page.render();
        assert_eq!(view.search, target.name.to_uppercase());
        match &view.products {
            ProductsSlot::Table(table) => {
                let shown: Vec<i64> = table.rows.iter().map(|r| r.id).collect();
                assert_eq!(shown, matching_ids(&fixture.products, &target.name, None));
                assert!(shown.contains(&target.id));
                assert!(shown.len() < fixture.products.len());
            }
            other => panic!("expected a table, got {:?}", other),
        }
        assert!(view.to_string().contains(&format!("Search: {}", target.name.to_uppercase())));

        page.search("");
        let view = page.render();
        assert_eq!(view.data_row_count(), 4);
        assert!(view.to_string().contains(SEARCH_PLACEHOLDER));
        assert_eq!(fixture.api.request_count("/products"), 1);
    }

    #[tokio::test]
    async fn test_search_combines_with_category() {
        let fixture = catalog_api().await;
        let provider = CartProvider::new();
        let page = BrowseProductsPage::new(provider.context());
        page.load(&fixture.api).await;
        let in_first = &fixture.products[0];
        let other_category = fixture
            .categories
            .iter()
            .find(|c| c.id != in_first.category_id)
            .unwrap();

        page.search(&in_first.name);
        page.select_category(CategoryFilter::Category(other_category.id))
            .unwrap();
        assert_eq!(
            page.render().data_row_count(),
            matching_ids(&fixture.products, &in_first.name, Some(other_category.id)).len()
        );

        page.select_category(CategoryFilter::Category(in_first.category_id))
            .unwrap();
        let view = page.render();
        assert_eq!(
            view.data_row_count(),
            matching_ids(&fixture.products, &in_first.name, Some(in_first.category_id)).len()
        );
        assert!(view.data_row_count() >= 1);
    }

    #[tokio::test]
    async fn test_search_without_matches_shows_empty() {
        let fixture = catalog_api().await;
        let provider = CartProvider::new();
        let page = BrowseProductsPage::new(provider.context());
        page.load(&fixture.api).await;

        page.search("no such product");

        assert_eq!(page.render().products, ProductsSlot::Empty);
    }

    #[tokio::test]
    async fn test_search_before_products_settle() {
        let fixture = catalog_api().await;
        fixture.api.faults().delay("/products", Duration::from_millis(50));
        let provider = CartProvider::new();
        let page = BrowseProductsPage::new(provider.context());
        let name = fixture.products[1].name.clone();

        let typing = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            page.search(&name);
            page.render().products
        };
        let (view, during) = tokio::join!(page.load(&fixture.api), typing);

        assert_eq!(during, ProductsSlot::Skeleton);
        assert_eq!(
            view.data_row_count(),
            matching_ids(&fixture.products, &name, None).len()
        );
    }

    #[tokio::test]
    async fn test_rows_show_cart_quantities() {
        let fixture = catalog_api().await;
        let provider = CartProvider::new();
        let page = BrowseProductsPage::new(provider.context());
        page.load(&fixture.api).await;
        let id = fixture.products[0].id;

        page.add_to_cart(id).unwrap();
        page.add_to_cart(id).unwrap();
        page.remove_from_cart(id).unwrap();

        let view = page.render();
        match &view.products {
            ProductsSlot::Table(table) => {
                let row = table.rows.iter().find(|r| r.id == id).unwrap();
                assert_eq!(row.in_cart, 1);
            }
            other => panic!("expected a table, got {:?}", other),
        }
        assert_eq!(provider.context().quantity_of(id), 1);

        page.remove_from_cart(id).unwrap();
        assert_eq!(provider.context().totals().item_count, 0);
    }
}
