//! # titan-report
//!
//! Prints the sales summary of one store for one date window.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          titan-report                                   │
//! │                                                                         │
//! │  1. Initialize tracing (stderr, RUST_LOG)                              │
//! │  2. Load ReportConfig (file → env), then apply flags                   │
//! │  3. Resolve the window: --start/--end, else --preset, else config      │
//! │  4. Open the order store and fetch, scoped to the tenant:              │
//! │       • every order and every order item                               │
//! │       • the orders placed inside the window                            │
//! │       • store settings (name, business type)                           │
//! │  5. Normalise + compute the snapshot (titan-core)                      │
//! │  6. Print as text, or as JSON with --json                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```bash
//! titan-report --preset last_week
//! titan-report --start 2026-10-01 --end 2026-10-19 --json
//! TITAN_TENANT_DOMAIN=pho-24.example.vn titan-report --today 2026-10-19
//! ```

mod config;
mod error;
mod render;

use chrono::{NaiveDate, Utc};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use titan_core::normalize::{normalize_order_items, normalize_orders};
use titan_core::{compute, DatePreset, DateRange, ReportInput, TenantContext};
use titan_db::{Database, DbConfig};

use config::ReportConfig;
use error::ReportResult;
use render::TextReport;

#[derive(Debug, Parser)]
#[command(name = "titan-report", version, about = "Sales summary for one store and date window")]
struct Args {
    /// Config file (default: platform config dir / report.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite order store, overrides [database] path
    #[arg(long)]
    db: Option<PathBuf>,

    /// Store domain, overrides [tenant] domain
    #[arg(short, long)]
    tenant: Option<String>,

    /// Named window: today, yesterday, day_before_yesterday, last_week,
    /// this_month, last_month, this_year
    #[arg(short, long, conflicts_with_all = ["start", "end"])]
    preset: Option<DatePreset>,

    /// First day of a custom window (YYYY-MM-DD)
    #[arg(long, requires = "end")]
    start: Option<String>,

    /// Last day of a custom window (YYYY-MM-DD)
    #[arg(long, requires = "start")]
    end: Option<String>,

    /// Anchor for presets and labels (YYYY-MM-DD, default: today in UTC)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Print the snapshot as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Report failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> ReportResult<()> {
    let mut config = ReportConfig::load(args.config.as_deref())?;
    if let Some(path) = args.db {
        config.database.path = path;
    }
    if let Some(domain) = args.tenant {
        config.tenant.domain = domain;
    }
    config.validate()?;

    let today = args.today.unwrap_or_else(|| Utc::now().date_naive());
    let range = match (args.start.as_deref(), args.end.as_deref()) {
        (Some(start), Some(end)) => DateRange::parse(start, end)?,
        _ => args
            .preset
            .unwrap_or(config.report.default_preset)
            .range(today),
    };
    let tenant = TenantContext::new(&config.tenant.domain);

    info!(
        tenant = %tenant.domain(),
        range = %range,
        db = %config.database.path.display(),
        "Building sales report"
    );

    let db = Database::new(DbConfig::new(&config.database.path)).await?;

    let orders = db.orders().fetch_all(&tenant).await?;
    let range_orders = db.orders().fetch_by_date_range(&tenant, &range).await?;
    let items = db.order_items().fetch_all(&tenant).await?;
    let settings = db.store_settings().get(&tenant).await?.unwrap_or_default();

    db.close().await;

    let orders = normalize_orders(&orders);
    let range_orders = normalize_orders(&range_orders);
    let items = normalize_order_items(&items);

    let snapshot = compute(&ReportInput {
        orders: &orders,
        order_items: &items,
        date_range_orders: &range_orders,
        date_range: range,
        today,
    });

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!(
            "{}",
            TextReport {
                snapshot: &snapshot,
                settings: &settings,
                top_products: config.report.top_products,
            }
        );
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so `--json` output stays machine readable.
/// Override with `RUST_LOG`, e.g. `RUST_LOG=titan_core=debug`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,titan=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_preset_conflicts_with_custom_range() {
        let result = Args::try_parse_from([
            "titan-report",
            "--preset",
            "today",
            "--start",
            "2026-10-01",
            "--end",
            "2026-10-02",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_start_requires_end() {
        assert!(Args::try_parse_from(["titan-report", "--start", "2026-10-01"]).is_err());
    }

    #[test]
    fn test_parse_preset_and_today() {
        let args =
            Args::try_parse_from(["titan-report", "-p", "last-week", "--today", "2026-10-19", "--json"])
                .unwrap();
        assert_eq!(args.preset, Some(DatePreset::LastWeek));
        assert_eq!(args.today, NaiveDate::from_ymd_opt(2026, 10, 19));
        assert!(args.json);
    }
}
