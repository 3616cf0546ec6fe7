//! # Seed Data Loader
//!
//! Writes the default categories and products into a database file.
//!
//! ## Usage
//! ```bash
//! # Seed ./shopfront_dev.db (skips tables that already have rows)
//! cargo run -p shopfront-db --bin seed
//!
//! # Specify database path
//! cargo run -p shopfront-db --bin seed -- --db ./data/shopfront.db
//!
//! # Insert the defaults even if rows already exist
//! cargo run -p shopfront-db --bin seed -- --force
//! ```

use std::env;

use shopfront_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./shopfront_dev.db");
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--force" | "-f" => force = true,
            "--help" | "-h" => {
                println!("Shopfront Seed Data Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./shopfront_dev.db)");
                println!("  -f, --force        Insert defaults even when tables are not empty");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    println!("🌱 Shopfront Seed Data Loader");
    println!("=============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let categories = db.categories();
    if force || categories.count().await? == 0 {
        let ids = categories.insert_defaults().await?;
        println!("✓ Inserted {} categories", ids.len());
    } else {
        println!("⚠ Categories already present, skipping");
    }

    let products = db.products();
    if force || products.count().await? == 0 {
        let ids = products.insert_defaults().await?;
        println!("✓ Inserted {} products", ids.len());
    } else {
        println!("⚠ Products already present, skipping");
    }

    println!();
    println!("Current contents:");
    for row in products.get_all_with_category_name().await? {
        println!(
            "  #{:<3} {:<26} {:<12} {}",
            row.id, row.name, row.category_name, row.price
        );
    }

    println!();
    println!(
        "✓ Seed complete: {} categories, {} products",
        categories.count().await?,
        products.count().await?
    );

    db.close().await;
    Ok(())
}
