//! # Seed Data Generator
//!
//! Populates the database with orders for development and demos.
//!
//! ## Usage
//! ```bash
//! # 30 days of orders, 12 per day (default)
//! cargo run -p titan-db --bin seed
//!
//! # Custom volume
//! cargo run -p titan-db --bin seed -- --days 90 --orders-per-day 40
//!
//! # Specify database path and tenant
//! cargo run -p titan-db --bin seed -- --db ./data/titan.db --tenant pho-24.example.vn
//! ```
//!
//! ## Generated Orders
//! Orders are spread over the last `--days` days, ending today (UTC). The
//! data is deterministic for a given day count so reports are reproducible:
//! - Mostly paid orders, plus some still open, cancelled or left unpaid
//! - Payment methods cycled across cash, cards and e-wallets
//! - One order in seven carries a discount
//! - One order in five is priced tax-inclusive
//! - 1 to 4 items per order from a Vietnamese menu

use chrono::{Duration, Utc};
use clap::Parser;
use titan_core::{BusinessType, RawOrder, RawOrderItem, StoreSettings, TenantContext};
use titan_db::{Database, DbConfig};
use tracing_subscriber::EnvFilter;

/// Menu items: (name, unit price in đồng).
const MENU: &[(&str, i64)] = &[
    ("Phở bò tái", 55_000),
    ("Phở gà", 50_000),
    ("Bún chả Hà Nội", 60_000),
    ("Bún bò Huế", 65_000),
    ("Cơm tấm sườn bì", 58_000),
    ("Bánh mì thịt", 30_000),
    ("Gỏi cuốn", 35_000),
    ("Chả giò", 40_000),
    ("Cà phê sữa đá", 29_000),
    ("Cà phê đen", 25_000),
    ("Trà đá", 5_000),
    ("Nước mía", 15_000),
    ("Sinh tố bơ", 45_000),
    ("Chè ba màu", 25_000),
];

/// Status codes weighted by repetition.
const STATUSES: &[&str] = &[
    "paid", "paid", "paid", "paid", "paid", "completed", "completed", "served",
    "preparing", "pending", "cancelled", "unpaid",
];

const PAYMENT_METHODS: &[&str] = &[
    "cash", "cash", "cash", "momo", "creditCard", "zalopay", "card", "vnpay", "qrCode",
    "debitCard", "shopeepay", "grabpay",
];

/// VAT in basis points.
const TAX_RATE_BPS: i64 = 800;

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Titan Reports seed data generator")]
struct Args {
    /// Database file path
    #[arg(short, long, default_value = "./titan_dev.db")]
    db: String,

    /// Tenant domain the orders belong to
    #[arg(short, long, default_value = titan_core::DEFAULT_TENANT_DOMAIN)]
    tenant: String,

    /// Number of days of history to generate
    #[arg(long, default_value_t = 30)]
    days: u32,

    /// Orders generated per day
    #[arg(long, default_value_t = 12)]
    orders_per_day: u32,

    /// Store business type saved in the store settings
    #[arg(long, default_value = "restaurant")]
    business_type: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,titan_db=info")),
        )
        .init();

    let args = Args::parse();
    let tenant = TenantContext::new(&args.tenant);

    println!("🌱 Titan Reports Seed Data Generator");
    println!("====================================");
    println!("Database: {}", args.db);
    println!("Tenant:   {}", tenant.domain());
    println!("Days:     {}", args.days);
    println!("Per day:  {}", args.orders_per_day);
    println!();

    let db = Database::new(DbConfig::new(&args.db)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.orders().count(&tenant).await?;
    if existing > 0 {
        println!("⚠ Tenant already has {} orders", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    db.store_settings()
        .upsert(
            &tenant,
            &StoreSettings {
                store_name: "Quán Phở Titan".to_string(),
                business_type: BusinessType::from_code(&args.business_type),
            },
        )
        .await?;

    println!();
    println!("Generating orders...");

    let start = std::time::Instant::now();
    let today = Utc::now().date_naive();
    let mut generated: u64 = 0;
    let mut failed: u64 = 0;

    for day in 0..args.days {
        let date = today - Duration::days(i64::from(args.days - 1 - day));

        for slot in 0..args.orders_per_day {
            let seed = (day * args.orders_per_day + slot) as usize;
            let (order, items) = generate_order(&date.format("%Y-%m-%d").to_string(), slot, seed);

            if let Err(e) = db.orders().insert_with_items(&tenant, &order, &items).await {
                eprintln!("Failed to insert {:?}: {}", order.order_number, e);
                failed += 1;
                continue;
            }

            generated += 1;
            if generated % 500 == 0 {
                println!("  Generated {} orders...", generated);
            }
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} orders in {:?}", generated, elapsed);
    if failed > 0 {
        println!("⚠ {} orders failed to insert", failed);
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates one order and its items.
///
/// Opening hours run 07:00 to 21:00; `slot` spreads orders across them.
fn generate_order(date: &str, slot: u32, seed: usize) -> (RawOrder, Vec<RawOrderItem>) {
    let item_count = 1 + seed % 4;
    let items: Vec<RawOrderItem> = (0..item_count)
        .map(|i| {
            let (name, price) = MENU[(seed * 7 + i * 3) % MENU.len()];
            RawOrderItem {
                product_id: Some(((seed * 7 + i * 3) % MENU.len()) as i64 + 1),
                product_name: Some(name.to_string()),
                quantity: Some(1 + ((seed + i) % 3) as i64),
                unit_price: Some(price.to_string()),
                ..RawOrderItem::default()
            }
        })
        .collect();

    let subtotal: i64 = items
        .iter()
        .map(|item| {
            let price: i64 = item
                .unit_price
                .as_deref()
                .and_then(|p| p.parse().ok())
                .unwrap_or(0);
            price * item.quantity.unwrap_or(0)
        })
        .sum();

    let discount = if seed % 7 == 3 {
        // 10% off, rounded down to the thousand
        subtotal / 10 / 1_000 * 1_000
    } else {
        0
    };

    let price_include_tax = seed % 5 == 0;
    let taxable = subtotal - discount;
    let (tax, total) = if price_include_tax {
        let tax = taxable * TAX_RATE_BPS / (10_000 + TAX_RATE_BPS);
        (tax, taxable)
    } else {
        let tax = taxable * TAX_RATE_BPS / 10_000;
        (tax, taxable + tax)
    };

    let minutes = 7 * 60 + (u64::from(slot) * 53 + seed as u64 * 11) % (14 * 60);
    let ordered_at = format!("{} {:02}:{:02}:00", date, minutes / 60, minutes % 60);

    let order = RawOrder {
        order_number: Some(format!("ORD-{}-{:04}", date.replace('-', ""), slot + 1)),
        status: Some(STATUSES[seed % STATUSES.len()].to_string()),
        total: Some(format!("{}.00", total)),
        subtotal: Some(format!("{}.00", subtotal)),
        tax: Some(format!("{}.00", tax)),
        discount: Some(format!("{}.00", discount)),
        price_include_tax: Some(price_include_tax),
        payment_method: Some(PAYMENT_METHODS[(seed / 2) % PAYMENT_METHODS.len()].to_string()),
        ordered_at: Some(ordered_at),
        customer_count: Some(1 + (seed % 4) as i64),
        table_id: Some(1 + (seed % 12) as i64),
        ..RawOrder::default()
    };

    (order, items)
}
