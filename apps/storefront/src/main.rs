//! # Storefront Entry Point
//!
//! ```text
//! storefront          print the browse page
//! storefront <id>     print the detail view for product <id>
//! ```
//!
//! The setup lives in lib.rs so it can be tested.

#[tokio::main]
async fn main() {
    if let Err(e) = storefront_app::run().await {
        eprintln!("storefront: {}", e);
        std::process::exit(1);
    }
}
