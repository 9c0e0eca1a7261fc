//! # Seed Data Generator
//!
//! Fills a SQLite store with sample products and suppliers for development.
//!
//! ## Usage
//! ```bash
//! # Generate 60 products (default)
//! cargo run -p stockroom-store --bin seed
//!
//! # Generate custom amount
//! cargo run -p stockroom-store --bin seed -- --count 200
//!
//! # Specify database path
//! cargo run -p stockroom-store --bin seed -- --db ./data/stockroom.db
//! ```
//!
//! ## Generated Data
//! - Products spread over the default categories, every seventh one
//!   uncategorized, stock cycling 0..=30 so every stock status shows up
//! - Food products get an expiry date
//! - A fixed list of suppliers, individuals and companies

use chrono::{Days, NaiveDate};
use std::env;
use stockroom_core::{CategoryList, DocumentType, Product, Settings, Supplier};
use stockroom_store::{Inventory, InventoryRepository, SqliteStore, StoreConfig};
use uuid::Uuid;

/// Product names per default category
const PRODUCTS: &[(&str, &[&str])] = &[
    (
        "Electronics",
        &[
            "Phone Charger",
            "USB Cable",
            "Wireless Mouse",
            "Keyboard",
            "Headphones",
            "Power Bank",
            "HDMI Cable",
            "LED Bulb",
        ],
    ),
    (
        "Food",
        &[
            "Whole Milk",
            "Rice 5kg",
            "Black Beans",
            "Coffee 500g",
            "Olive Oil",
            "Pasta Penne",
            "Sugar 1kg",
            "Corn Flour",
        ],
    ),
    (
        "Cleaning",
        &[
            "Bleach 1L",
            "Dish Soap",
            "Laundry Powder",
            "Glass Cleaner",
            "Sponge Pack",
            "Floor Cloth",
        ],
    ),
    (
        "Clothing",
        &[
            "T-Shirt",
            "Work Gloves",
            "Socks Pack",
            "Apron",
            "Cap",
            "Rain Jacket",
        ],
    ),
];

/// (legal name, trade name, document, type, phone)
const SUPPLIERS: &[(&str, Option<&str>, &str, DocumentType, &str)] = &[
    ("Acme Comercio Ltda", Some("Acme"), "12.345.678/0001-90", DocumentType::Company, "(11) 3333-0101"),
    ("Distribuidora Sul SA", Some("Sul Foods"), "98.765.432/0001-10", DocumentType::Company, "(51) 3222-0202"),
    ("Limpa Tudo Ltda", None, "11.222.333/0001-44", DocumentType::Company, "(21) 2555-0303"),
    ("Maria Souza", None, "123.456.789-00", DocumentType::Individual, "(11) 99999-0404"),
    ("Joao Pereira", Some("JP Tecidos"), "987.654.321-00", DocumentType::Individual, "(31) 98888-0505"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 60;
    let mut db_path = String::from("./stockroom_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(60);
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
                println!("Stockroom Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 60)");
                println!("  -d, --db <PATH>    Database file path (default: ./stockroom_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Stockroom Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    let store = SqliteStore::new(StoreConfig::new(&db_path)).await?;
    let repo = InventoryRepository::new(store);

    println!("✓ Connected to store");
    println!("✓ Migrations applied");

    let existing = repo.load_products().await?;
    if !existing.is_empty() {
        println!("⚠ Store already has {} products", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let inventory = Inventory {
        products: (0..count).map(generate_product).collect(),
        suppliers: SUPPLIERS.iter().map(generate_supplier).collect(),
        categories: CategoryList::seeded(),
        settings: Settings::default(),
    };

    repo.save_all(&inventory).await?;

    let summary = stockroom_core::compute_dashboard(
        &inventory.products,
        &inventory.suppliers,
        &inventory.settings,
    );

    println!();
    println!("✓ Generated {} products", summary.total_products);
    println!("✓ Generated {} suppliers", summary.total_suppliers);
    println!("  Low stock: {}", summary.low_stock_count);
    println!(
        "  Stock value: {}",
        inventory.settings.format_money(summary.total_stock_value)
    );

    repo.store().close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds the `index`-th sample product.
fn generate_product(index: usize) -> Product {
    let (category, names) = PRODUCTS[index % PRODUCTS.len()];
    let name = names[(index / PRODUCTS.len()) % names.len()];
    let batch = index / (PRODUCTS.len() * names.len()) + 1;

    let category = (index % 7 != 6).then(|| category.to_string());

    // Food expires 30..120 days after a fixed date so reruns match
    let expiry = match category.as_deref() {
        Some("Food") => NaiveDate::from_ymd_opt(2026, 1, 1)
            .and_then(|d| d.checked_add_days(Days::new(30 + (index as u64 * 13) % 90))),
        _ => None,
    };

    let prefix: String = name
        .chars()
        .filter(char::is_ascii_alphabetic)
        .take(2)
        .collect();

    Product {
        id: Uuid::new_v4().to_string(),
        name: if batch > 1 {
            format!("{} #{}", name, batch)
        } else {
            name.to_string()
        },
        code: format!("{}-{:04}", prefix.to_uppercase(), index + 1),
        category,
        price_cents: 199 + ((index as i64 * 37) % 4800),
        stock: (index as i64 * 7) % 31,
        expiry,
    }
}

fn generate_supplier(
    (legal_name, trade_name, document, document_type, phone): &(
        &str,
        Option<&str>,
        &str,
        DocumentType,
        &str,
    ),
) -> Supplier {
    Supplier {
        id: Uuid::new_v4().to_string(),
        legal_name: legal_name.to_string(),
        trade_name: trade_name.map(str::to_string),
        document: document.to_string(),
        document_type: *document_type,
        phone: phone.to_string(),
    }
}
