//! # Seed Data Generator
//!
//! Populates a database file with the demo catalog and, optionally, extra
//! generated products.
//!
//! ## Usage
//! ```bash
//! # Demo catalog only
//! cargo run -p storefront-db --bin seed
//!
//! # Demo catalog plus 200 generated products
//! cargo run -p storefront-db --bin seed -- --extra 200
//!
//! # Specify database path
//! cargo run -p storefront-db --bin seed -- --db ./data/storefront.db
//! ```

use std::env;

use storefront_db::{fixtures, Database};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut extra: usize = 0;
    let mut db_path = String::from("./storefront_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--extra" | "-e" => {
                if i + 1 < args.len() {
                    extra = args[i + 1].parse().unwrap_or(0);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Storefront Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -e, --extra <N>    Generated products on top of the demo catalog (default: 0)");
                println!("  -d, --db <PATH>    Database file path (default: ./storefront_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Storefront Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::open(&db_path).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let created = fixtures::seed_demo_catalog(&db).await?;
    if created == 0 {
        println!("⚠ Database already has products, demo catalog skipped");
    } else {
        println!("✓ Demo catalog: {} products", created);
    }

    if extra > 0 {
        let category = fixtures::create_category(&db, None).await?;
        for n in 0..extra {
            if let Err(e) = fixtures::create_product(&db, category.id).await {
                eprintln!("Failed to insert product {}: {}", n, e);
            }
        }
        println!("✓ Generated {} products in '{}'", extra, category.name);
    }

    println!();
    println!(
        "Catalog: {} categories, {} products",
        db.categories().count().await?,
        db.products().count().await?
    );

    Ok(())
}
