//! # Summary Composer
//!
//! Reduces one window's records into a [`StatisticsSnapshot`].
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  date_range_orders ──► classify ──┬──► RevenueBreakdown                │
//! │                                   │                                     │
//! │                                   ├──► completed ──► aggregate_payments │
//! │                                   │        │                            │
//! │  order_items ─────────────────────┼────────┴──► allocate_orders         │
//! │                                   │                   │                 │
//! │                                   │                   ▼                 │
//! │                                   │             rank_products           │
//! │                                   ▼                                     │
//! │                           status counts                                 │
//! │                                                                         │
//! │  date_range + today ──► resolve_label                                   │
//! │                                                                         │
//! │  all of the above ──► StatisticsSnapshot                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`compute`] is a pure function: same input, same snapshot. It logs, but
//! it never fails; bad records were already coerced by the normaliser.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;
use ts_rs::TS;

use crate::date_range::{resolve_label, DatePreset, DateRange};
use crate::discount::allocate_orders;
use crate::error::CoreResult;
use crate::money::Money;
use crate::normalize::{normalize_order_items, normalize_orders};
use crate::payments::{aggregate_payments, PaymentMethodTotal};
use crate::ranking::{rank_products, TopProduct};
use crate::revenue::RevenueBreakdown;
use crate::status::classify;
use crate::types::{Order, OrderItem, RawOrder, RawOrderItem};
use crate::TOP_PRODUCTS_LIMIT;

// =============================================================================
// Input
// =============================================================================

/// Everything one report needs, already fetched.
#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    /// Every order the caller fetched.
    pub orders: &'a [Order],
    /// Line items; may include items of orders outside the window.
    pub order_items: &'a [OrderItem],
    /// The orders placed inside `date_range`.
    pub date_range_orders: &'a [Order],
    pub date_range: DateRange,
    /// Anchor for preset labels.
    pub today: NaiveDate,
}

// =============================================================================
// Snapshot
// =============================================================================

/// Financial summary of one date window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSnapshot {
    /// Net revenue of completed orders.
    pub total_sales_revenue: Money,
    /// Same figure as `total_sales_revenue`; the dashboard shows both.
    pub subtotal_revenue: Money,
    pub estimated_revenue: Money,
    pub serving_revenue: Money,
    pub cancelled_revenue: Money,
    /// Completed orders in the window.
    pub period_order_count: u32,
    /// Guests across every order in the window.
    pub period_customer_count: u32,
    /// Completed revenue ÷ days in the window, rounded half up to the
    /// whole đồng, so it is not an exact quotient.
    pub daily_average_revenue: Money,
    pub active_orders: u32,
    pub completed_orders_count: u32,
    pub processing_orders_count: u32,
    pub cancelled_orders_count: u32,
    pub unpaid_orders_count: u32,
    pub total_orders_in_range: u32,
    pub date_range: DateRange,
    pub date_range_label: String,
    pub date_range_preset: Option<DatePreset>,
    pub payment_methods: Vec<PaymentMethodTotal>,
    pub top_products: Vec<TopProduct>,
}

// =============================================================================
// Composer
// =============================================================================

/// Computes the snapshot for `input`.
pub fn compute(input: &ReportInput<'_>) -> StatisticsSnapshot {
    let partition = classify(input.date_range_orders);
    let revenue = RevenueBreakdown::from_partition(&partition);

    debug!(
        range = %input.date_range,
        total = partition.total,
        completed = partition.completed.len(),
        serving = partition.serving.len(),
        cancelled = partition.cancelled.len(),
        unpaid = partition.unpaid.len(),
        "Classified orders in range"
    );

    let known_orders: HashSet<i64> = input.orders.iter().map(|o| o.id).collect();
    let orphans = input
        .order_items
        .iter()
        .filter(|item| !known_orders.contains(&item.order_id))
        .count();
    if orphans > 0 {
        debug!(orphans, "Skipping order items with no matching order");
    }

    let allocations = allocate_orders(&partition.completed, input.order_items);
    let top_products = rank_products(&allocations, TOP_PRODUCTS_LIMIT);
    let payment_methods = aggregate_payments(partition.completed.iter().copied());

    let period_customer_count = input
        .date_range_orders
        .iter()
        .fold(0u32, |sum, order| sum.saturating_add(order.customer_count));

    let label = resolve_label(&input.date_range, input.today);

    StatisticsSnapshot {
        total_sales_revenue: revenue.completed,
        subtotal_revenue: revenue.completed,
        estimated_revenue: revenue.estimated,
        serving_revenue: revenue.serving,
        cancelled_revenue: revenue.cancelled,
        period_order_count: count(partition.completed.len()),
        period_customer_count,
        daily_average_revenue: revenue.completed.div_round(input.date_range.day_count()),
        active_orders: count(partition.serving.len()),
        completed_orders_count: count(partition.completed.len()),
        processing_orders_count: count(partition.serving.len()),
        cancelled_orders_count: count(partition.cancelled.len()),
        unpaid_orders_count: count(partition.unpaid.len()),
        total_orders_in_range: count(partition.total),
        date_range: input.date_range,
        date_range_label: label.to_string(),
        date_range_preset: label.preset(),
        payment_methods,
        top_products,
    }
}

/// Normalises raw records, parses the window and computes the snapshot.
///
/// Fails only when `start`/`end` are unparseable or reversed.
pub fn compute_raw(
    orders: &[RawOrder],
    order_items: &[RawOrderItem],
    date_range_orders: &[RawOrder],
    start: &str,
    end: &str,
    today: NaiveDate,
) -> CoreResult<StatisticsSnapshot> {
    let date_range = DateRange::parse(start, end)?;

    let orders = normalize_orders(orders);
    let order_items = normalize_order_items(order_items);
    let date_range_orders = normalize_orders(date_range_orders);

    Ok(compute(&ReportInput {
        orders: &orders,
        order_items: &order_items,
        date_range_orders: &date_range_orders,
        date_range,
        today,
    }))
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

// =============================================================================
// Unit Tests
// =============================================================================
