//! # Product Ranker
//!
//! Rolls allocated items up by product name and keeps the best sellers.
//!
//! ```text
//!   allocations ──► group by product_name ──► sort by revenue ↓ ──► top N
//!                   (first-seen order)        (stable)              + share %
//! ```
//!
//! Ties keep the order in which products were first seen. Percentages are
//! shares of the top-N revenue, not of the whole period, and stay 0 unless
//! that revenue is positive.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::discount::ItemAllocation;
use crate::money::Money;

/// One row of the best-sellers table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub name: String,
    pub quantity: i64,
    /// Revenue after allocated discounts.
    pub revenue: Money,
    /// Unit price of the last item seen for this product.
    pub unit_price: Money,
    /// Share of the ranked products' revenue, 0–100.
    pub percentage: i64,
}

/// Ranks products by discounted revenue and keeps the first `limit`.
pub fn rank_products(allocations: &[ItemAllocation<'_>], limit: usize) -> Vec<TopProduct> {
    let mut products: Vec<TopProduct> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for allocation in allocations {
        let item = allocation.item;
        let slot = *index.entry(item.product_name.as_str()).or_insert_with(|| {
            products.push(TopProduct {
                name: item.product_name.clone(),
                quantity: 0,
                revenue: Money::zero(),
                unit_price: item.unit_price,
                percentage: 0,
            });
            products.len() - 1
        });

        let product = &mut products[slot];
        product.quantity += item.quantity;
        product.revenue += allocation.revenue;
        product.unit_price = item.unit_price;
    }

    products.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    products.truncate(limit);

    let ranked_total: Money = products.iter().map(|p| p.revenue).sum();
    if ranked_total.is_positive() {
        for product in &mut products {
            product.percentage = product.revenue.percentage_of(ranked_total);
        }
    }

    products
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderItem;

    fn item(id: i64, name: &str, price: i64, qty: i64) -> OrderItem {
        OrderItem {
            id,
            order_id: 1,
            product_id: None,
            product_name: name.to_string(),
            unit_price: Money::from_units(price),
            quantity: qty,
        }
    }

    fn undiscounted(items: &[OrderItem]) -> Vec<ItemAllocation<'_>> {
        items
            .iter()
            .map(|item| ItemAllocation {
                item,
                line_total: item.line_total(),
                discount: Money::zero(),
                revenue: item.line_total(),
            })
            .collect()
    }

    #[test]
    fn test_rank_and_percentages() {
        let items = vec![
            item(1, "Trà đá", 100, 1),
            item(2, "Bún chả", 300, 1),
            item(3, "Phở bò", 600, 1),
        ];

        let top = rank_products(&undiscounted(&items), 5);
        let rows: Vec<(&str, i64, i64)> = top
            .iter()
            .map(|p| (p.name.as_str(), p.revenue.units(), p.percentage))
            .collect();
        assert_eq!(
            rows,
            vec![("Phở bò", 600, 60), ("Bún chả", 300, 30), ("Trà đá", 100, 10)]
        );
    }

    #[test]
    fn test_groups_by_name_and_keeps_last_unit_price() {
        let items = vec![
            item(1, "Cà phê", 20_000, 2),
            item(2, "Bánh mì", 15_000, 1),
            item(3, "Cà phê", 25_000, 1),
        ];

        let top = rank_products(&undiscounted(&items), 5);
        assert_eq!(top[0].name, "Cà phê");
        assert_eq!(top[0].quantity, 3);
        assert_eq!(top[0].revenue, Money::from_units(65_000));
        assert_eq!(top[0].unit_price, Money::from_units(25_000));
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn test_limit_and_stable_ties() {
        let items: Vec<OrderItem> = (1..=7)
            .map(|id| item(id, &format!("P{id}"), 100, 1))
            .collect();

        let top = rank_products(&undiscounted(&items), 5);
        let names: Vec<&str> = top.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["P1", "P2", "P3", "P4", "P5"]);
        assert!(top.iter().all(|p| p.percentage == 20));
    }

    #[test]
    fn test_uses_discounted_revenue() {
        let items = vec![item(1, "A", 300, 1), item(2, "B", 700, 1)];
        let allocations = vec![
            ItemAllocation {
                item: &items[0],
                line_total: Money::from_units(300),
                discount: Money::from_units(27),
                revenue: Money::from_units(273),
            },
            ItemAllocation {
                item: &items[1],
                line_total: Money::from_units(700),
                discount: Money::from_units(63),
                revenue: Money::from_units(637),
            },
        ];

        let top = rank_products(&allocations, 5);
        assert_eq!(top[0].revenue, Money::from_units(637));
        assert_eq!(top[1].revenue, Money::from_units(273));
    }

    #[test]
    fn test_zero_revenue_gives_zero_percentages() {
        let items = vec![item(1, "Free water", 0, 3)];
        let top = rank_products(&undiscounted(&items), 5);
        assert_eq!(top[0].percentage, 0);
        assert!(rank_products(&[], 5).is_empty());
    }

    #[test]
    fn test_negative_ranked_total_gives_zero_percentages() {
        let items = vec![item(1, "Refund line", 0, 1)];
        let allocations = vec![ItemAllocation {
            item: &items[0],
            line_total: Money::zero(),
            discount: Money::from_units(100),
            revenue: Money::from_units(-100),
        }];

        let top = rank_products(&allocations, 5);
        assert_eq!(top[0].revenue, Money::from_units(-100));
        assert_eq!(top[0].percentage, 0);
    }
}
