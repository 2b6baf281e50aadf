//! # Payment Aggregator
//!
//! Groups completed orders by payment method.
//!
//! Totals are customer payments (revenue + tax), since this table answers
//! "how much came in through each channel". Groups appear in the order their
//! method was first seen.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Order, PaymentMethod};

impl PaymentMethod {
    /// Display name.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::Transfer => "Bank Transfer",
            PaymentMethod::Momo => "MoMo",
            PaymentMethod::ZaloPay => "ZaloPay",
            PaymentMethod::VnPay => "VNPay",
            PaymentMethod::QrCode => "QR Code",
            PaymentMethod::ShopeePay => "ShopeePay",
            PaymentMethod::GrabPay => "GrabPay",
        }
    }
}

/// Orders and money collected through one payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodTotal {
    pub method: PaymentMethod,
    pub label: String,
    pub count: u32,
    pub total: Money,
}

/// Aggregates customer payments by method.
pub fn aggregate_payments<'a, I>(orders: I) -> Vec<PaymentMethodTotal>
where
    I: IntoIterator<Item = &'a Order>,
{
    let mut groups: Vec<PaymentMethodTotal> = Vec::new();

    for order in orders {
        let method = order.payment_method;
        let position = match groups.iter().position(|g| g.method == method) {
            Some(position) => position,
            None => {
                groups.push(PaymentMethodTotal {
                    method,
                    label: method.label().to_string(),
                    count: 0,
                    total: Money::zero(),
                });
                groups.len() - 1
            }
        };

        let group = &mut groups[position];
        group.count += 1;
        group.total += order.customer_payment();
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderStatus;

    fn order(method: PaymentMethod, total: i64, tax: i64, include_tax: bool) -> Order {
        Order {
            id: 1,
            order_number: "ORD-1".to_string(),
            status: OrderStatus::Paid,
            total: Money::from_units(total),
            subtotal: Money::from_units(total),
            tax: Money::from_units(tax),
            discount: Money::zero(),
            price_include_tax: include_tax,
            payment_method: method,
            ordered_at: None,
            customer_count: 1,
            table_id: None,
        }
    }

    #[test]
    fn test_two_cash_orders() {
        let orders = [
            order(PaymentMethod::Cash, 500, 0, false),
            order(PaymentMethod::Cash, 300, 0, false),
        ];

        let groups = aggregate_payments(&orders);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].method, PaymentMethod::Cash);
        assert_eq!(groups[0].count, 2);
        assert_eq!(groups[0].total, Money::from_units(800));
    }

    #[test]
    fn test_first_seen_order_and_customer_payment() {
        let orders = [
            order(PaymentMethod::Momo, 1000, 100, true),
            order(PaymentMethod::Cash, 1000, 100, false),
            order(PaymentMethod::Momo, 200, 0, false),
        ];

        let groups = aggregate_payments(&orders);
        let summary: Vec<(&str, u32, i64)> = groups
            .iter()
            .map(|g| (g.label.as_str(), g.count, g.total.units()))
            .collect();
        assert_eq!(summary, vec![("MoMo", 2, 1200), ("Cash", 1, 1100)]);
    }

    #[test]
    fn test_labels() {
        assert_eq!(PaymentMethod::Transfer.label(), "Bank Transfer");
        assert!(PaymentMethod::ALL.iter().all(|m| !m.label().is_empty()));
    }

    #[test]
    fn test_empty() {
        let orders: Vec<Order> = Vec::new();
        assert!(aggregate_payments(&orders).is_empty());
    }
}
