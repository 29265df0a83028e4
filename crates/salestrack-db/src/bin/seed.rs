//! # Seed Data Generator
//!
//! Populates the database with a small demo store for development.
//!
//! ## Usage
//! ```bash
//! # Seed with 60 sales spread over the last 30 days (default)
//! cargo run -p salestrack-db --bin seed
//!
//! # Generate a custom number of sales
//! cargo run -p salestrack-db --bin seed -- --sales 200
//!
//! # Specify database path
//! cargo run -p salestrack-db --bin seed -- --db ./data/salestrack.db
//! ```
//!
//! ## Generated Data
//! - Business settings (NGN, 7.5% tax)
//! - 3 customers, 4 products
//! - Sales dated back from now, one to three lines each, every payment
//!   method and a few walk-in sales with no customer
//!
//! Output is deterministic for a given `--sales` count apart from dates,
//! which are relative to the time of the run.

use chrono::{Duration, Utc};
use salestrack_core::input::{CustomerInput, NewSale, NewSaleItem, ProductInput};
use salestrack_core::{
    BusinessSettings, CustomerStatus, Money, PaymentMethod, Product, ProductStatus,
};
use salestrack_db::{Database, DbConfig};
use std::env;

/// Demo customers: (name, email, phone)
const CUSTOMERS: &[(&str, &str, &str)] = &[
    ("John Doe", "john@example.com", "08011111111"),
    ("Jane Smith", "jane@example.com", "08022222222"),
    ("Michael Johnson", "michael@example.com", "08033333333"),
];

/// Demo products: (name, category, price in kobo, stock)
const PRODUCTS: &[(&str, &str, i64, i64)] = &[
    ("Laptop", "Electronics", 250_000_00, 15),
    ("Headphones", "Electronics", 15_000_00, 40),
    ("Office Chair", "Furniture", 35_000_00, 12),
    ("Desk Lamp", "Furniture", 3_000_00, 60),
];

const METHODS: &[PaymentMethod] = &[
    PaymentMethod::Cash,
    PaymentMethod::Card,
    PaymentMethod::Transfer,
    PaymentMethod::MobileMoney,
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut sales: usize = 60;
    let mut db_path = String::from("./salestrack.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--sales" | "-s" => {
                if i + 1 < args.len() {
                    sales = args[i + 1].parse().unwrap_or(60);
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
                println!("SalesTrack Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -s, --sales <N>    Number of sales to generate (default: 60)");
                println!("  -d, --db <PATH>    Database file path (default: ./salestrack.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 SalesTrack Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!("Sales:    {}", sales);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Schema applied");

    let existing = db.sales().count().await? + db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has data");
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    db.settings()
        .upsert(&BusinessSettings {
            business_name: "SalesTrack Demo Store".to_string(),
            address: "12 Marina Road, Lagos".to_string(),
            phone: "08000000000".to_string(),
            email: "hello@salestrack.example".to_string(),
            ..BusinessSettings::default()
        })
        .await?;
    println!("✓ Business settings saved");

    let mut customer_ids = Vec::with_capacity(CUSTOMERS.len());
    for (name, email, phone) in CUSTOMERS {
        let customer = db
            .customers()
            .create(&CustomerInput {
                name: name.to_string(),
                email: Some(email.to_string()),
                phone: Some(phone.to_string()),
                address: None,
                status: CustomerStatus::Active,
            })
            .await?;
        customer_ids.push(customer.id);
    }
    println!("✓ Created {} customers", customer_ids.len());

    let mut products = Vec::with_capacity(PRODUCTS.len());
    for (name, category, price_cents, stock) in PRODUCTS {
        let product = db
            .products()
            .create(&ProductInput {
                name: name.to_string(),
                description: None,
                price: Money::from_cents(*price_cents),
                stock: *stock,
                category: Some(category.to_string()),
                status: ProductStatus::Active,
            })
            .await?;
        products.push(product);
    }
    println!("✓ Created {} products", products.len());

    println!();
    println!("Generating sales...");

    let start = std::time::Instant::now();
    let mut generated = 0;

    for seed in 0..sales {
        let sale = generate_sale(seed, &products, &customer_ids);
        if let Err(e) = db.sales().create(&sale).await {
            eprintln!("Failed to insert sale {}: {}", seed, e);
            continue;
        }

        generated += 1;
        if generated % 25 == 0 {
            println!("  Generated {} sales...", generated);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} sales in {:?}", generated, elapsed);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds one sale from a seed index.
fn generate_sale(seed: usize, products: &[Product], customer_ids: &[String]) -> NewSale {
    // Spread over the last 30 days, hours varying through the working day
    let days_back = (seed * 7) % 30;
    let hours_back = (seed * 5) % 9;
    let date = Utc::now() - Duration::days(days_back as i64) - Duration::hours(hours_back as i64);

    let mut sale = NewSale::new(date).with_payment_method(METHODS[seed % METHODS.len()]);

    // Every fourth sale is a walk-in
    if seed % 4 != 3 {
        sale = sale.with_customer(&customer_ids[seed % customer_ids.len()]);
    }

    let lines = 1 + seed % 3;
    for line in 0..lines {
        let product = &products[(seed + line * 3) % products.len()];
        let quantity = 1 + ((seed + line) % 4) as i64;
        sale = sale.with_item(NewSaleItem::new(&product.id, product.price, quantity));
    }

    sale
}
