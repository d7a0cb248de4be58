//! # Catalog Seed Tool
//!
//! Resets the admin catalog in a storefront database to the six seed products.
//!
//! ## Usage
//! ```bash
//! # Reset ./autoparts.db
//! cargo run -p autoparts-db --bin seed
//!
//! # Another database, and sign out whoever was signed in
//! cargo run -p autoparts-db --bin seed -- --db ./data/autoparts.db --reset-session
//! ```

use std::env;

use autoparts_core::Money;
use autoparts_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./autoparts.db");
    let mut reset_session = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--reset-session" => reset_session = true,
            "--help" | "-h" => {
                println!("AutoParts catalog seed tool");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>      Database file path (default: ./autoparts.db)");
                println!("      --reset-session  Also remove the persisted user");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    println!("AutoParts catalog seed");
    println!("======================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected, migrations applied");

    let previous = db.products().load().await?.map(|products| products.len());
    match previous {
        Some(count) => println!("  Replacing {} stored products", count),
        None => println!("  No stored catalog yet"),
    }

    let products = db.products().reset().await?;
    println!("✓ Wrote {} products:", products.len());
    for product in &products {
        let price = product.effective_price();
        let list = Money::from_rubles(product.price);
        if price == list {
            println!("  {:>2}  {:<40} {}", product.id, product.name, price);
        } else {
            println!(
                "  {:>2}  {:<40} {} (было {})",
                product.id, product.name, price, list
            );
        }
    }

    if reset_session {
        db.sessions().clear().await?;
        println!("✓ Persisted session removed");
    }

    db.close().await;
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
