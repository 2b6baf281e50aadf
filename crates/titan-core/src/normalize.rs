//! # Record Normalizer
//!
//! Turns raw store records into typed [`Order`] / [`OrderItem`] values.
//!
//! ## Coercion Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Field               Raw value              Normalised                  │
//! │  ─────────────────   ────────────────────   ─────────────────────────   │
//! │  total/tax/…         "1000.00"              Money(1000)                 │
//! │                      "abc", "", missing     Money(0)                    │
//! │                      beyond ±10^12          Money(0)                    │
//! │  discount            "-50"                  Money(0)  (never negative)  │
//! │  status              "refunded"             OrderStatus::Other          │
//! │  paymentMethod       "bitcoin", missing     PaymentMethod::Cash         │
//! │  priceIncludeTax     missing                false                       │
//! │  customerCount       missing, 0, -3         1                           │
//! │  orderedAt           unparseable            None                        │
//! │  quantity            missing, ≤ 0, > 999    0  (item contributes 0)     │
//! │  productName         missing                ""                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here returns an error. Every coercion that throws data away is
//! logged at `debug` with the record id so dirty rows can be traced.

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::debug;

use crate::money::Money;
use crate::types::{Order, OrderItem, OrderStatus, PaymentMethod, RawOrder, RawOrderItem};
use crate::{MAX_AMOUNT_UNITS, MAX_ITEM_QUANTITY};

/// Parses an amount field, treating missing, malformed or out-of-range
/// values as zero.
pub fn parse_amount(record_id: i64, field: &str, raw: Option<&str>) -> Money {
    let Some(raw) = raw else {
        return Money::zero();
    };

    match Money::parse_decimal(raw) {
        Some(amount) if amount.units().unsigned_abs() <= MAX_AMOUNT_UNITS.unsigned_abs() => amount,
        Some(amount) => {
            debug!(record_id, field, %amount, "Amount out of range, using zero");
            Money::zero()
        }
        None => {
            debug!(record_id, field, raw, "Malformed amount, using zero");
            Money::zero()
        }
    }
}

/// Parses an order timestamp.
///
/// Accepts RFC 3339 (`2026-10-19T08:30:00Z`, with offset or fraction) and
/// the SQL form `2026-10-19 08:30:00`, which is read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Normalises one raw order.
pub fn normalize_order(raw: &RawOrder) -> Order {
    let id = raw.id;

    let mut discount = parse_amount(id, "discount", raw.discount.as_deref());
    if discount.is_negative() {
        debug!(order_id = id, %discount, "Negative discount, using zero");
        discount = Money::zero();
    }

    let status = match raw.status.as_deref() {
        Some(code) => OrderStatus::from_code(code),
        None => OrderStatus::Other,
    };
    if status == OrderStatus::Other {
        debug!(order_id = id, status = ?raw.status, "Unrecognised order status");
    }

    let ordered_at = raw.ordered_at.as_deref().and_then(|value| {
        let parsed = parse_timestamp(value);
        if parsed.is_none() {
            debug!(order_id = id, value, "Unparseable order timestamp");
        }
        parsed
    });

    let customer_count = raw
        .customer_count
        .filter(|count| *count >= 1)
        .and_then(|count| u32::try_from(count).ok())
        .unwrap_or(1);

    Order {
        id,
        order_number: raw.order_number.clone().unwrap_or_else(|| id.to_string()),
        status,
        total: parse_amount(id, "total", raw.total.as_deref()),
        subtotal: parse_amount(id, "subtotal", raw.subtotal.as_deref()),
        tax: parse_amount(id, "tax", raw.tax.as_deref()),
        discount,
        price_include_tax: raw.price_include_tax.unwrap_or(false),
        payment_method: raw
            .payment_method
            .as_deref()
            .map(PaymentMethod::from_code)
            .unwrap_or_default(),
        ordered_at,
        customer_count,
        table_id: raw.table_id,
    }
}

/// Normalises one raw order item.
pub fn normalize_order_item(raw: &RawOrderItem) -> OrderItem {
    let quantity = match raw.quantity {
        Some(qty) if (1..=MAX_ITEM_QUANTITY).contains(&qty) => qty,
        other => {
            debug!(item_id = raw.id, quantity = ?other, "Missing or out-of-range quantity, using zero");
            0
        }
    };

    OrderItem {
        id: raw.id,
        order_id: raw.order_id,
        product_id: raw.product_id,
        product_name: raw.product_name.clone().unwrap_or_default(),
        unit_price: parse_amount(raw.id, "unit_price", raw.unit_price.as_deref()),
        quantity,
    }
}

/// Normalises a batch of raw orders, preserving order.
pub fn normalize_orders(raw: &[RawOrder]) -> Vec<Order> {
    raw.iter().map(normalize_order).collect()
}

/// Normalises a batch of raw order items, preserving order.
pub fn normalize_order_items(raw: &[RawOrderItem]) -> Vec<OrderItem> {
    raw.iter().map(normalize_order_item).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
