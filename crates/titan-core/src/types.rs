//! # Domain Types
//!
//! Record types the statistics engine reads.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  As delivered by the order store        After normalisation            │
//! │  ───────────────────────────────        ───────────────────            │
//! │  ┌─────────────────┐                    ┌─────────────────┐            │
//! │  │    RawOrder     │ ── normalize ───►  │     Order       │            │
//! │  │  total: "1000"  │                    │  total: Money   │            │
//! │  │  status: "paid" │                    │  status: enum   │            │
//! │  └─────────────────┘                    └─────────────────┘            │
//! │  ┌─────────────────┐                    ┌─────────────────┐            │
//! │  │  RawOrderItem   │ ── normalize ───►  │   OrderItem     │            │
//! │  │  unitPrice: "…" │                    │  unit_price     │            │
//! │  └─────────────────┘                    └─────────────────┘            │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  OrderStatus    │   │ PaymentMethod   │   │ TenantContext   │       │
//! │  │  pending … paid │   │ cash, momo, …   │   │ domain          │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The raw types mirror the order API: camelCase JSON with amounts sent as
//! decimal strings (numbers are tolerated too). Nothing in a raw record is
//! trusted until it has been through [`crate::normalize`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed, kitchen has not started.
    #[default]
    Pending,
    /// Being prepared.
    Preparing,
    /// Delivered to the table, not yet paid.
    Served,
    /// Closed out.
    Completed,
    /// Paid in full.
    Paid,
    /// Cancelled before completion.
    Cancelled,
    /// Closed without payment.
    Unpaid,
    /// Any status this engine does not know about.
    #[serde(other)]
    Other,
}

impl OrderStatus {
    /// Every known status code, in lifecycle order.
    pub const KNOWN: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Served,
        OrderStatus::Completed,
        OrderStatus::Paid,
        OrderStatus::Cancelled,
        OrderStatus::Unpaid,
    ];

    /// Maps a raw status string; unknown values become [`OrderStatus::Other`].
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "pending" => OrderStatus::Pending,
            "preparing" => OrderStatus::Preparing,
            "served" => OrderStatus::Served,
            "completed" => OrderStatus::Completed,
            "paid" => OrderStatus::Paid,
            "cancelled" => OrderStatus::Cancelled,
            "unpaid" => OrderStatus::Unpaid,
            _ => OrderStatus::Other,
        }
    }

    /// The wire code for this status.
    pub const fn code(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Served => "served",
            OrderStatus::Completed => "completed",
            OrderStatus::Paid => "paid",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Unpaid => "unpaid",
            OrderStatus::Other => "other",
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// Canonical payment method.
///
/// ## Raw Codes
/// ```text
/// cash        → Cash          momo       → Momo
/// creditCard  → CreditCard    zalopay    → ZaloPay
/// debitCard   → DebitCard     vnpay      → VnPay
/// card        → Transfer      qrCode     → QrCode
/// shopeepay   → ShopeePay     grabpay    → GrabPay
/// anything else (or empty)    → Cash
/// ```
/// `card` is what the POS sends for a bank transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "cash")]
    Cash,
    #[serde(rename = "creditCard")]
    CreditCard,
    #[serde(rename = "debitCard")]
    DebitCard,
    #[serde(rename = "card")]
    Transfer,
    #[serde(rename = "momo")]
    Momo,
    #[serde(rename = "zalopay")]
    ZaloPay,
    #[serde(rename = "vnpay")]
    VnPay,
    #[serde(rename = "qrCode")]
    QrCode,
    #[serde(rename = "shopeepay")]
    ShopeePay,
    #[serde(rename = "grabpay")]
    GrabPay,
}

impl PaymentMethod {
    /// Every method, in the order the POS lists them.
    pub const ALL: [PaymentMethod; 10] = [
        PaymentMethod::Cash,
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::Transfer,
        PaymentMethod::Momo,
        PaymentMethod::ZaloPay,
        PaymentMethod::VnPay,
        PaymentMethod::QrCode,
        PaymentMethod::ShopeePay,
        PaymentMethod::GrabPay,
    ];

    /// Maps a raw payment code. Codes are case sensitive, like the POS
    /// sends them; unknown or empty codes fall back to cash.
    pub fn from_code(code: &str) -> Self {
        PaymentMethod::recognize(code).unwrap_or(PaymentMethod::Cash)
    }

    /// Maps a raw payment code, returning `None` for unknown codes.
    pub fn recognize(code: &str) -> Option<Self> {
        let code = code.trim();
        PaymentMethod::ALL.into_iter().find(|m| m.code() == code)
    }

    /// The raw code the POS uses for this method.
    pub const fn code(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::CreditCard => "creditCard",
            PaymentMethod::DebitCard => "debitCard",
            PaymentMethod::Transfer => "card",
            PaymentMethod::Momo => "momo",
            PaymentMethod::ZaloPay => "zalopay",
            PaymentMethod::VnPay => "vnpay",
            PaymentMethod::QrCode => "qrCode",
            PaymentMethod::ShopeePay => "shopeepay",
            PaymentMethod::GrabPay => "grabpay",
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A normalised order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub order_number: String,
    pub status: OrderStatus,
    /// Gross amount charged to the customer.
    pub total: Money,
    pub subtotal: Money,
    /// Tax component of `total` (or on top of it, see `price_include_tax`).
    pub tax: Money,
    /// Order-level discount, never negative.
    pub discount: Money,
    /// True when `total` already contains `tax`.
    pub price_include_tax: bool,
    pub payment_method: PaymentMethod,
    #[ts(as = "Option<String>")]
    pub ordered_at: Option<DateTime<Utc>>,
    /// Guests served, at least 1.
    pub customer_count: u32,
    pub table_id: Option<i64>,
}

impl Order {
    /// Net revenue recognised for this order. See [`crate::revenue::revenue`].
    #[inline]
    pub fn revenue(&self) -> Money {
        crate::revenue::revenue(self)
    }

    /// Amount actually collected. See [`crate::revenue::customer_payment`].
    #[inline]
    pub fn customer_payment(&self) -> Money {
        crate::revenue::customer_payment(self)
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A normalised order line item.
///
/// `product_name` is the grouping key for product rankings; the POS freezes
/// it on the item at order time, so renamed products show up separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: Option<i64>,
    pub product_name: String,
    pub unit_price: Money,
    pub quantity: i64,
}

impl OrderItem {
    /// Line total before discount (unit_price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Raw Records
// =============================================================================

/// An order exactly as the order store returns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct RawOrder {
    pub id: i64,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub total: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub subtotal: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tax: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub discount: Option<String>,
    #[serde(default)]
    pub price_include_tax: Option<bool>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub ordered_at: Option<String>,
    #[serde(default)]
    pub customer_count: Option<i64>,
    #[serde(default)]
    pub table_id: Option<i64>,
}

/// An order item exactly as the order store returns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct RawOrderItem {
    pub id: i64,
    pub order_id: i64,
    #[serde(default)]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub unit_price: Option<String>,
}

/// Accepts `"1000.00"`, `1000`, `1000.5` or `null` for an amount field.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

// =============================================================================
// Tenant & Store Settings
// =============================================================================

/// Identifies which store's records a fetch is for.
///
/// Passed explicitly to every order store call. Nothing in the workspace
/// reads the tenant from global state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantContext {
    domain: String,
}

impl TenantContext {
    /// Creates a tenant context for the given store domain.
    pub fn new(domain: impl Into<String>) -> Self {
        TenantContext {
            domain: domain.into().trim().to_lowercase(),
        }
    }

    /// The store domain, lower-cased.
    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl Default for TenantContext {
    fn default() -> Self {
        TenantContext::new(crate::DEFAULT_TENANT_DOMAIN)
    }
}

/// Kind of business a store runs.
///
/// The engine computes the same figures for all of them; consumers pick
/// which ones to show (a laundry shows "unpaid" money where a restaurant
/// shows orders "processing").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum BusinessType {
    #[default]
    Restaurant,
    Laundry,
    Retail,
    #[serde(other)]
    Other,
}

impl BusinessType {
    /// Maps a stored business type; unknown values become `Other`.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "restaurant" => BusinessType::Restaurant,
            "laundry" => BusinessType::Laundry,
            "retail" => BusinessType::Retail,
            _ => BusinessType::Other,
        }
    }

    /// The stored code for this business type.
    pub const fn code(&self) -> &'static str {
        match self {
            BusinessType::Restaurant => "restaurant",
            BusinessType::Laundry => "laundry",
            BusinessType::Retail => "retail",
            BusinessType::Other => "other",
        }
    }

    /// Whether the "in progress" figure should be shown as unpaid money
    /// rather than an order count.
    pub const fn shows_unpaid_amount(&self) -> bool {
        matches!(self, BusinessType::Laundry)
    }
}

/// Per-store settings the report front end needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    pub store_name: String,
    pub business_type: BusinessType,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            store_name: "Titan Store".to_string(),
            business_type: BusinessType::default(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_codes() {
        for status in OrderStatus::KNOWN {
            assert_eq!(OrderStatus::from_code(status.code()), status);
        }
        assert_eq!(OrderStatus::from_code(" PAID "), OrderStatus::Paid);
        assert_eq!(OrderStatus::from_code("refunded"), OrderStatus::Other);
        assert_eq!(OrderStatus::from_code(""), OrderStatus::Other);
    }

    #[test]
    fn test_payment_method_codes() {
        for method in PaymentMethod::ALL {
            assert_eq!(PaymentMethod::from_code(method.code()), method);
        }
        assert_eq!(PaymentMethod::from_code("card"), PaymentMethod::Transfer);
        assert_eq!(PaymentMethod::from_code(""), PaymentMethod::Cash);
        assert_eq!(PaymentMethod::from_code("bitcoin"), PaymentMethod::Cash);
        assert_eq!(PaymentMethod::recognize("bitcoin"), None);
    }

    #[test]
    fn test_payment_method_serde_uses_codes() {
        let json = serde_json::to_string(&PaymentMethod::QrCode).unwrap();
        assert_eq!(json, "\"qrCode\"");
        let parsed: PaymentMethod = serde_json::from_str("\"card\"").unwrap();
        assert_eq!(parsed, PaymentMethod::Transfer);
    }

    #[test]
    fn test_raw_order_accepts_strings_and_numbers() {
        let json = r#"{
            "id": 7,
            "orderNumber": "ORD-7",
            "status": "paid",
            "total": "1000.00",
            "tax": 100,
            "discount": null,
            "priceIncludeTax": true,
            "paymentMethod": "momo",
            "orderedAt": "2026-10-19T08:30:00Z"
        }"#;
        let raw: RawOrder = serde_json::from_str(json).unwrap();
        assert_eq!(raw.total.as_deref(), Some("1000.00"));
        assert_eq!(raw.tax.as_deref(), Some("100"));
        assert_eq!(raw.discount, None);
        assert_eq!(raw.subtotal, None);
        assert_eq!(raw.customer_count, None);
        assert_eq!(raw.price_include_tax, Some(true));
    }

    #[test]
    fn test_order_item_line_total() {
        let item = OrderItem {
            id: 1,
            order_id: 1,
            product_id: None,
            product_name: "Phở bò".to_string(),
            unit_price: Money::from_units(45_000),
            quantity: 3,
        };
        assert_eq!(item.line_total(), Money::from_units(135_000));
    }

    #[test]
    fn test_tenant_context_is_normalised() {
        let tenant = TenantContext::new("  Store-01.Example.VN ");
        assert_eq!(tenant.domain(), "store-01.example.vn");
    }

    #[test]
    fn test_business_type() {
        assert_eq!(BusinessType::from_code("Laundry"), BusinessType::Laundry);
        assert_eq!(BusinessType::from_code("spa"), BusinessType::Other);
        assert!(BusinessType::Laundry.shows_unpaid_amount());
        assert!(!BusinessType::Restaurant.shows_unpaid_amount());
    }
}
