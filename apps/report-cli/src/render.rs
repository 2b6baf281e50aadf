//! Plain-text rendering of a [`StatisticsSnapshot`].
//!
//! Laundries show the money still owed on open orders where every other
//! business shows how many orders are still processing.

use std::fmt;

use titan_core::{StatisticsSnapshot, StoreSettings};

/// Renders a snapshot as a terminal report.
pub struct TextReport<'a> {
    pub snapshot: &'a StatisticsSnapshot,
    pub settings: &'a StoreSettings,
    /// Ranked products to print, at most the snapshot holds.
    pub top_products: usize,
}

const RULE: &str = "────────────────────────────────────────────────────────";

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.snapshot;

        writeln!(f, "{}", self.settings.store_name)?;
        if s.date_range_preset.is_some() {
            writeln!(f, "{} ({})", s.date_range_label, s.date_range)?;
        } else {
            writeln!(f, "{}", s.date_range_label)?;
        }
        writeln!(f, "{RULE}")?;

        writeln!(f, "Revenue")?;
        row(f, "Net sales", &s.total_sales_revenue)?;
        row(f, "Estimated", &s.estimated_revenue)?;
        row(f, "In service", &s.serving_revenue)?;
        row(f, "Cancelled", &s.cancelled_revenue)?;
        row(f, "Daily average", &s.daily_average_revenue)?;
        writeln!(f)?;

        writeln!(f, "Orders")?;
        row(f, "Completed", &s.completed_orders_count)?;
        if self.settings.business_type.shows_unpaid_amount() {
            row(f, "Unpaid", &s.serving_revenue)?;
        } else {
            row(f, "Processing", &s.processing_orders_count)?;
        }
        row(f, "Cancelled", &s.cancelled_orders_count)?;
        row(f, "Awaiting payment", &s.unpaid_orders_count)?;
        row(f, "Total in range", &s.total_orders_in_range)?;
        row(f, "Customers", &s.period_customer_count)?;
        writeln!(f)?;

        writeln!(f, "Payment methods")?;
        if s.payment_methods.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for payment in &s.payment_methods {
            writeln!(
                f,
                "  {:<18} {:>5} orders {:>18}",
                payment.label,
                payment.count,
                payment.total.to_string()
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Top products")?;
        if s.top_products.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for (rank, product) in s.top_products.iter().take(self.top_products).enumerate() {
            writeln!(
                f,
                "  {}. {:<24} x{:<5} {:>16} {:>4}%",
                rank + 1,
                product.name,
                product.quantity,
                product.revenue.to_string(),
                product.percentage
            )?;
        }

        Ok(())
    }
}

fn row(f: &mut fmt::Formatter<'_>, label: &str, value: &dyn fmt::Display) -> fmt::Result {
    writeln!(f, "  {:<20} {:>20}", label, value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use titan_core::{compute_raw, BusinessType, RawOrder, RawOrderItem};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn snapshot() -> StatisticsSnapshot {
        let orders = vec![
            RawOrder {
                id: 1,
                status: Some("paid".to_string()),
                total: Some("100000".to_string()),
                payment_method: Some("momo".to_string()),
                ordered_at: Some("2026-10-19T09:00:00Z".to_string()),
                customer_count: Some(2),
                ..RawOrder::default()
            },
            RawOrder {
                id: 2,
                status: Some("served".to_string()),
                total: Some("40000".to_string()),
                ordered_at: Some("2026-10-19T10:00:00Z".to_string()),
                ..RawOrder::default()
            },
        ];
        let items = vec![RawOrderItem {
            id: 1,
            order_id: 1,
            product_name: Some("Phở bò".to_string()),
            quantity: Some(2),
            unit_price: Some("50000".to_string()),
            ..RawOrderItem::default()
        }];
        compute_raw(&orders, &items, &orders, "2026-10-19", "2026-10-19", today()).unwrap()
    }

    #[test]
    fn test_restaurant_report() {
        let snapshot = snapshot();
        let settings = StoreSettings::default();
        let text = TextReport {
            snapshot: &snapshot,
            settings: &settings,
            top_products: 5,
        }
        .to_string();

        assert!(text.starts_with("Titan Store\n"));
        assert!(text.contains("Today (19/10/2026 - 19/10/2026)"));
        assert!(text.contains("Processing"));
        assert!(!text.contains("Unpaid "));
        assert!(text.contains("MoMo"));
        assert!(text.contains("1. Phở bò"));
        assert!(text.contains("100%"));
    }

    #[test]
    fn test_laundry_shows_unpaid_amount() {
        let snapshot = snapshot();
        let settings = StoreSettings {
            store_name: "Giặt Ủi Sạch".to_string(),
            business_type: BusinessType::Laundry,
        };
        let text = TextReport {
            snapshot: &snapshot,
            settings: &settings,
            top_products: 5,
        }
        .to_string();

        assert!(text.contains("Unpaid"));
        assert!(!text.contains("Processing"));
        assert!(text.contains("40.000 ₫"));
    }

    #[test]
    fn test_custom_range_and_empty_sections() {
        let snapshot = compute_raw(&[], &[], &[], "2026-09-02", "2026-09-05", today()).unwrap();
        let settings = StoreSettings::default();
        let text = TextReport {
            snapshot: &snapshot,
            settings: &settings,
            top_products: 5,
        }
        .to_string();

        assert!(text.contains("\n02/09/2026 - 05/09/2026\n"));
        assert_eq!(text.matches("(none)").count(), 2);
        assert!(text.contains("0 ₫"));
    }

    #[test]
    fn test_top_products_limit() {
        let snapshot = snapshot();
        let settings = StoreSettings::default();
        let text = TextReport {
            snapshot: &snapshot,
            settings: &settings,
            top_products: 0,
        }
        .to_string();
        assert!(!text.contains("1. Phở bò"));
    }
}
