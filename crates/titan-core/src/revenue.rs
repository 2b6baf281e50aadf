//! # Revenue Calculator
//!
//! Net revenue is what the store keeps; customer payment is what it
//! collected. They differ by the tax:
//!
//! ```text
//!   price_include_tax = true      price_include_tax = false
//!   ────────────────────────      ─────────────────────────
//!   revenue = total − tax         revenue = total
//!
//!   customer_payment = revenue + tax   (both cases)
//! ```

use crate::money::Money;
use crate::status::StatusPartition;
use crate::types::Order;

/// Net revenue recognised for an order.
pub fn revenue(order: &Order) -> Money {
    if order.price_include_tax {
        order.total - order.tax
    } else {
        order.total
    }
}

/// Amount the customer actually paid for an order.
pub fn customer_payment(order: &Order) -> Money {
    revenue(order) + order.tax
}

/// Sums [`revenue`] over a set of orders.
pub fn sum_revenue<'a, I>(orders: I) -> Money
where
    I: IntoIterator<Item = &'a Order>,
{
    orders.into_iter().map(revenue).sum()
}

/// Revenue per status view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RevenueBreakdown {
    pub completed: Money,
    pub serving: Money,
    pub cancelled: Money,
    /// Completed plus serving: what the period will bring in once the
    /// open orders close.
    pub estimated: Money,
}

impl RevenueBreakdown {
    pub fn from_partition(partition: &StatusPartition<'_>) -> Self {
        let completed = sum_revenue(partition.completed.iter().copied());
        let serving = sum_revenue(partition.serving.iter().copied());
        let cancelled = sum_revenue(partition.cancelled.iter().copied());

        RevenueBreakdown {
            completed,
            serving,
            cancelled,
            estimated: completed + serving,
        }
    }
}
