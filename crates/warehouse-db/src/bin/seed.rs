//! # Seed Loader
//!
//! Loads inventory and product JSON files into a database for development.
//!
//! ## Usage
//! ```bash
//! # Load both files into the default database
//! cargo run -p warehouse-db --bin seed -- --inventory inventory.json --products products.json
//!
//! # Specify database path
//! cargo run -p warehouse-db --bin seed -- --db ./data/warehouse.db --inventory inventory.json
//! ```
//!
//! ## File Formats
//! ```text
//! inventory.json  {"inventory": [{"art_id": "1", "name": "leg", "stock": "12"}]}
//! products.json   {"products": [{"name": "Dining Chair",
//!                                "contain_articles": [{"art_id": "1", "amount_of": "4"}]}]}
//! ```
//!
//! Inventory is loaded before products. Each file is one transaction: a bad
//! row leaves that file's data out entirely.

use std::env;
use std::path::Path;
use std::time::Duration;

use warehouse_core::{Inventory, Products};
use warehouse_db::migrations::migration_status;
use warehouse_db::{Database, DbConfig, InventoryEngine, RequestContext, SqliteInventory};

/// Seed loads can be large; give each upload plenty of time.
const SEED_TIMEOUT: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./warehouse.db");
    let mut inventory_path: Option<String> = None;
    let mut products_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--inventory" | "-i" => {
                if i + 1 < args.len() {
                    inventory_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--products" | "-p" => {
                if i + 1 < args.len() {
                    products_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_help();
                return Ok(());
            }
        }
        i += 1;
    }

    if inventory_path.is_none() && products_path.is_none() {
        eprintln!("Nothing to load: pass --inventory and/or --products");
        print_help();
        return Ok(());
    }

    println!("Warehouse Seed Loader");
    println!("=====================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let (total, applied) = migration_status(db.pool()).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied ({}/{})", applied, total);

    let engine = SqliteInventory::new(db.clone());

    if let Some(path) = inventory_path {
        let inventory: Inventory = read_json(Path::new(&path))?;
        let ctx = RequestContext::new("seed-inventory", SEED_TIMEOUT);
        let inserted = engine.upload_inventory(&ctx, &inventory).await?;
        println!("✓ {} item inserted from {}", inserted, path);
    }

    if let Some(path) = products_path {
        let products: Products = read_json(Path::new(&path))?;
        let ctx = RequestContext::new("seed-products", SEED_TIMEOUT);
        let inserted = engine.upload_products(&ctx, &products).await?;
        println!("✓ {} product inserted from {}", inserted, path);
    }

    let ctx = RequestContext::new("seed-summary", SEED_TIMEOUT);
    let sellable = engine.get_product_stock(&ctx).await?;
    println!();
    println!("Products in stock: {}", sellable.len());
    for product in &sellable {
        println!("  {:<30} {}", product.name, product.available_product_no);
    }

    db.close().await;
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    let value = serde_json::from_str(&raw)
        .map_err(|e| format!("cannot parse {}: {}", path.display(), e))?;
    Ok(value)
}

fn print_help() {
    println!("Warehouse Seed Loader");
    println!();
    println!("Usage: seed [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -d, --db <PATH>          Database file path (default: ./warehouse.db)");
    println!("  -i, --inventory <PATH>   Inventory JSON file to load");
    println!("  -p, --products <PATH>    Products JSON file to load");
    println!("  -h, --help               Show this help message");
}
