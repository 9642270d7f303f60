//! # Storefront Library
//!
//! Views, resource fetching and tree-scoped state for the storefront.
//!
//! ## Module Organization
//! ```text
//! storefront_app/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── api/
//! │   ├── mod.rs      ◄─── Api trait (the HTTP-like seam)
//! │   ├── local.rs    ◄─── LocalApi over the fixture database
//! │   └── fault.rs    ◄─── Per-path fault injection
//! ├── fetcher.rs      ◄─── ResourceFetcher (FetchState + stale guard)
//! ├── state/
//! │   ├── cart.rs     ◄─── Cart, CartProvider, CartContext
//! │   ├── toast.rs    ◄─── Toaster
//! │   └── config.rs   ◄─── AppConfig
//! ├── views/
//! │   ├── browse.rs   ◄─── BrowseProductsPage
//! │   ├── detail.rs   ◄─── ProductDetail
//! │   ├── form.rs     ◄─── ProductForm
//! │   └── order_status.rs
//! └── error.rs        ◄─── ApiError, AppError
//! ```

pub mod api;
pub mod error;
pub mod fetcher;
pub mod state;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support;

use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use api::LocalApi;
use error::AppError;
use state::{AppConfig, CartProvider};
use storefront_db::{fixtures, Database};
use views::{BrowseProductsPage, ProductDetail};

/// Runs the storefront binary.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Storefront Startup                                │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter                                │
/// │     • Default: info,storefront=debug,sqlx=warn (override: RUST_LOG)     │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • STOREFRONT_* environment variables over defaults                  │
/// │                                                                         │
/// │  3. Connect to Database ──────────────────────────────────────────────► │
/// │     • SQLite with WAL mode, pending migrations applied                  │
/// │     • Demo catalog seeded when empty                                    │
/// │                                                                         │
/// │  4. Mount the Page ───────────────────────────────────────────────────► │
/// │     • LocalApi with configured faults                                   │
/// │     • CartProvider at the root                                          │
/// │     • `storefront`       → browse page                                  │
/// │     • `storefront <id>`  → product detail                               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), AppError> {
    init_tracing();

    info!("Starting storefront");

    let config = AppConfig::from_env();
    let product_id = match std::env::args().nth(1) {
        Some(arg) => Some(arg.parse::<i64>().map_err(|_| AppError::InvalidArgument(arg))?),
        None => None,
    };

    let db_path = database_path(&config)?;
    info!(?db_path, "Database path determined");

    let db = Database::open(&db_path).await?;
    fixtures::seed_demo_catalog(&db).await?;

    let api = LocalApi::new(db.clone());
    configure_faults(&api, &config, product_id);

    println!("{}", render_page(&api, &config, product_id).await);

    db.close().await;
    Ok(())
}

/// Loads the requested page and renders it as text.
pub async fn render_page(api: &LocalApi, config: &AppConfig, product_id: Option<i64>) -> String {
    match product_id {
        Some(id) => {
            let detail = ProductDetail::new();
            detail.load(api, id).await.to_text(config)
        }
        None => {
            let provider = CartProvider::new();
            let page = BrowseProductsPage::new(provider.context());
            page.load(api).await.to_text(config)
        }
    }
}

/// Installs the simulated delay and failures from `config`.
///
/// Failures win over the delay for the same path.
pub fn configure_faults(api: &LocalApi, config: &AppConfig, product_id: Option<i64>) {
    if let Some(delay) = config.simulate_delay() {
        let mut paths = vec!["/products".to_string(), "/categories".to_string()];
        if let Some(id) = product_id {
            paths.push(format!("/products/{}", id));
        }
        for path in paths {
            api.faults().delay(path, delay);
        }
    }

    for path in &config.simulate_error {
        api.faults().fail(path.as_str());
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_app=trace` - Trace the app crate only
/// - Default: `info,storefront=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug,sqlx=warn"));

    // Ignore the error when a subscriber is already installed.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Determines the database file path.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.storefront.storefront/storefront.db`
/// - **Windows**: `%APPDATA%\storefront\storefront\storefront.db`
/// - **Linux**: `~/.local/share/storefront/storefront.db`
///
/// `STOREFRONT_DB_PATH` overrides the platform directory.
pub fn database_path(config: &AppConfig) -> Result<PathBuf, AppError> {
    if let Some(path) = &config.db_path {
        return Ok(path.clone());
    }

    let proj_dirs =
        ProjectDirs::from("com", "storefront", "storefront").ok_or(AppError::NoDataDir)?;
    let data_dir = proj_dirs.data_dir();

    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join("storefront.db"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::catalog_api;
    use std::time::Duration;
    use storefront_core::GENERIC_ERROR_MESSAGE;

    #[test]
    fn test_database_path_override() {
        let config = AppConfig {
            db_path: Some(PathBuf::from("/tmp/custom.db")),
            ..AppConfig::default()
        };
        assert_eq!(database_path(&config).unwrap(), PathBuf::from("/tmp/custom.db"));
    }

    #[tokio::test]
    async fn test_render_browse_page() {
        let fixture = catalog_api().await;
        let config = AppConfig {
            store_name: "Corner Shop".to_string(),
            ..AppConfig::default()
        };

        let text = render_page(&fixture.api, &config, None).await;

        assert!(text.starts_with("Corner Shop"));
        for product in &fixture.products {
            assert!(text.contains(&product.name));
        }
    }

    #[tokio::test]
    async fn test_render_detail_page() {
        let fixture = catalog_api().await;
        let config = AppConfig::default();
        let product = &fixture.products[2];

        let text = render_page(&fixture.api, &config, Some(product.id)).await;
        assert!(text.contains(&product.name));

        let text = render_page(&fixture.api, &config, Some(0)).await;
        assert!(text.to_lowercase().contains("invalid"));
    }

    #[tokio::test]
    async fn test_configured_faults() {
        let fixture = catalog_api().await;
        let config = AppConfig {
            simulate_error: vec!["/products".to_string()],
            simulate_delay_ms: Some(5),
            ..AppConfig::default()
        };

        configure_faults(&fixture.api, &config, Some(1));

        assert_eq!(
            fixture.api.faults().fault_for("/categories"),
            Some(api::Fault::Delay(Duration::from_millis(5)))
        );
        assert_eq!(
            fixture.api.faults().fault_for("/products/1"),
            Some(api::Fault::Delay(Duration::from_millis(5)))
        );
        assert_eq!(fixture.api.faults().fault_for("/products"), Some(api::Fault::Fail));

        let text = render_page(&fixture.api, &config, None).await;
        assert!(text.contains(GENERIC_ERROR_MESSAGE));
    }
}
