//! # Repository Module
//!
//! Database repository implementations for the order store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  titan-report                                                          │
//! │       │                                                                 │
//! │       │  db.orders().fetch_by_date_range(&tenant, &range)              │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  OrderRepository                                                       │
//! │  ├── fetch_by_date_range(&self, tenant, range)                         │
//! │  ├── fetch_all(&self, tenant)                                          │
//! │  ├── insert(&self, tenant, order)                                      │
//! │  └── insert_with_items(&self, tenant, order, items)                    │
//! │       │                                                                 │
//! │       │  SQL Query (always filtered by tenant_domain)                  │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Rows come back as RawOrder / RawOrderItem: strings and options,       │
//! │  untouched. Normalising them is titan-core's job.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`OrderRepository`](order::OrderRepository) - Orders by tenant and date
//! - [`OrderItemRepository`](order_item::OrderItemRepository) - Line items by tenant and order
//! - [`StoreSettingsRepository`](settings::StoreSettingsRepository) - Store name and business type

pub mod order;
pub mod order_item;
pub mod settings;
