//! # titan-core: Sales Statistics Engine for Titan Reports
//!
//! This crate turns already-fetched orders and order items into the numbers
//! on the reports dashboard. It is pure computation with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Titan Reports Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 titan-report (CLI / dashboard)                  │   │
//! │  │      config ──► fetch records ──► compute ──► print / JSON      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ titan-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ normalize │  │  status   │  │  revenue  │  │ discount  │  │   │
//! │  │   │ RawOrder  │  │ classify  │  │ net / tax │  │ pro rata  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  ranking  │  │ payments  │  │date_range │  │  summary  │  │   │
//! │  │   │  top 5    │  │ by method │  │  presets  │  │ snapshot  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │                    titan-db (Record Store)                      │   │
//! │  │          SQLite orders / order items, scoped per tenant         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Orders, items, statuses, payment methods, tenant context
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Write-path validation
//! - [`normalize`] - Raw record coercion
//! - [`status`], [`revenue`], [`discount`], [`ranking`], [`payments`] - The aggregations
//! - [`date_range`] - Report windows and presets
//! - [`summary`] - The composer
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same records and window in, same snapshot out
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are whole đồng (i64)
//! 4. **Forgiving Reads**: dirty records degrade to zeros, never to errors
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use titan_core::summary::compute_raw;
//! use titan_core::RawOrder;
//!
//! let orders = vec![RawOrder {
//!     id: 1,
//!     status: Some("paid".into()),
//!     total: Some("1000.00".into()),
//!     tax: Some("100.00".into()),
//!     price_include_tax: Some(true),
//!     ordered_at: Some("2026-10-19T08:30:00Z".into()),
//!     ..RawOrder::default()
//! }];
//! let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
//!
//! let snapshot = compute_raw(&orders, &[], &orders, "2026-10-19", "2026-10-19", today).unwrap();
//! assert_eq!(snapshot.total_sales_revenue.units(), 900);
//! assert_eq!(snapshot.date_range_label, "Today");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod date_range;
pub mod discount;
pub mod error;
pub mod money;
pub mod normalize;
pub mod payments;
pub mod ranking;
pub mod revenue;
pub mod status;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use titan_core::Money` instead of
// `use titan_core::money::Money`

pub use date_range::{DatePreset, DateRange, RangeLabel};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use payments::PaymentMethodTotal;
pub use ranking::TopProduct;
pub use summary::{compute, compute_raw, ReportInput, StatisticsSnapshot};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Tenant domain used when nothing else is configured.
///
/// The store is single-tenant per install today, but every query is keyed
/// by tenant so one database can hold several stores.
pub const DEFAULT_TENANT_DOMAIN: &str = "default.titan.local";

/// How many products the best-sellers table shows.
pub const TOP_PRODUCTS_LIMIT: usize = 5;

/// Maximum quantity of a single order item
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10)
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Largest amount, in đồng, a single stored field may carry.
///
/// Anything beyond this when reading rows back is treated as malformed.
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000;

/// Maximum length of a product name, in characters.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;
