//! # Discount Allocator
//!
//! Spreads an order-level discount over the order's line items.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  discount = 90, items = [300 × 1, 700 × 1], subtotal = 1000            │
//! │                                                                         │
//! │  item 1 (not last):  round_half_up(90 × 300 / 1000) = 27               │
//! │  item 2 (last):      90 − 27                         = 63               │
//! │                                                     ────                │
//! │                                                       90  ✓ exact       │
//! │                                                                         │
//! │  item revenue = line_total − item discount  →  273, 637                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every item but the last gets its rounded proportional share; the last
//! item absorbs the rounding leftover. The allocated discounts therefore sum
//! to exactly the order discount whenever the order has a positive subtotal.
//!
//! A subtotal ≤ 0 or a discount ≤ 0 allocates nothing.

use std::collections::HashMap;

use crate::money::Money;
use crate::types::{Order, OrderItem};

/// One item's share of its order's discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemAllocation<'a> {
    pub item: &'a OrderItem,
    /// unit_price × quantity, before discount.
    pub line_total: Money,
    /// Allocated share of the order discount.
    pub discount: Money,
    /// line_total − discount.
    pub revenue: Money,
}

/// Allocates `discount` over `items`, in the order given.
///
/// ## Example
/// ```rust
/// use titan_core::discount::allocate_discount;
/// use titan_core::money::Money;
/// use titan_core::types::OrderItem;
///
/// let item = |id, price| OrderItem {
///     id,
///     order_id: 1,
///     product_id: None,
///     product_name: format!("item {id}"),
///     unit_price: Money::from_units(price),
///     quantity: 1,
/// };
/// let items = [item(1, 300), item(2, 700)];
/// let refs: Vec<&OrderItem> = items.iter().collect();
///
/// let shares = allocate_discount(Money::from_units(90), &refs);
/// assert_eq!(shares[0].discount.units(), 27);
/// assert_eq!(shares[1].discount.units(), 63);
/// ```
pub fn allocate_discount<'a>(discount: Money, items: &[&'a OrderItem]) -> Vec<ItemAllocation<'a>> {
    let subtotal: Money = items.iter().map(|item| item.line_total()).sum();
    let allocate = discount.is_positive() && subtotal.is_positive();

    let mut allocated = Money::zero();
    let last = items.len().saturating_sub(1);

    items
        .iter()
        .enumerate()
        .map(|(index, &item)| {
            let line_total = item.line_total();
            let share = if !allocate {
                Money::zero()
            } else if index == last {
                discount - allocated
            } else {
                discount.pro_rata(line_total, subtotal)
            };
            allocated += share;

            ItemAllocation {
                item,
                line_total,
                discount: share,
                revenue: line_total - share,
            }
        })
        .collect()
}

/// Allocates the discounts of every order in `orders` over their items.
///
/// Items are grouped by `order_id`. The result keeps the order of `items`
/// and leaves out items whose order is not in `orders`.
pub fn allocate_orders<'a>(orders: &[&Order], items: &'a [OrderItem]) -> Vec<ItemAllocation<'a>> {
    let discounts: HashMap<i64, Money> = orders.iter().map(|o| (o.id, o.discount)).collect();

    let mut groups: HashMap<i64, Vec<usize>> = HashMap::new();
    for (index, item) in items.iter().enumerate() {
        if discounts.contains_key(&item.order_id) {
            groups.entry(item.order_id).or_default().push(index);
        }
    }

    let mut slots: Vec<Option<ItemAllocation<'a>>> = vec![None; items.len()];
    for (order_id, indices) in &groups {
        let discount = discounts.get(order_id).copied().unwrap_or_default();
        let group: Vec<&OrderItem> = indices.iter().map(|&i| &items[i]).collect();

        for (&index, allocation) in indices.iter().zip(allocate_discount(discount, &group)) {
            slots[index] = Some(allocation);
        }
    }

    slots.into_iter().flatten().collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
