//! # Status Classifier
//!
//! Partitions orders into the four views the report needs.
//!
//! ```text
//! ┌──────────────┬───────────┬─────────┬───────────┬────────┐
//! │ status       │ completed │ serving │ cancelled │ unpaid │
//! ├──────────────┼───────────┼─────────┼───────────┼────────┤
//! │ pending      │           │    ✓    │           │   ✓    │
//! │ preparing    │           │    ✓    │           │   ✓    │
//! │ served       │           │    ✓    │           │   ✓    │
//! │ completed    │     ✓     │         │           │        │
//! │ paid         │     ✓     │         │           │        │
//! │ cancelled    │           │         │     ✓     │        │
//! │ unpaid       │           │         │           │   ✓    │
//! │ other        │           │         │           │        │
//! └──────────────┴───────────┴─────────┴───────────┴────────┘
//! ```
//!
//! The views are not exclusive. "Serving" answers "is the kitchen still on
//! it?" and "unpaid" answers "has the money been collected?", so an order
//! can be in both.

use crate::types::{Order, OrderStatus};

impl OrderStatus {
    /// Completed or paid.
    #[inline]
    pub const fn is_completed(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Paid)
    }

    /// Still being fulfilled.
    #[inline]
    pub const fn is_serving(&self) -> bool {
        matches!(
            self,
            OrderStatus::Served | OrderStatus::Preparing | OrderStatus::Pending
        )
    }

    #[inline]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, OrderStatus::Cancelled)
    }

    /// Money not yet collected.
    #[inline]
    pub const fn is_unpaid(&self) -> bool {
        matches!(
            self,
            OrderStatus::Pending
                | OrderStatus::Unpaid
                | OrderStatus::Served
                | OrderStatus::Preparing
        )
    }
}

/// The four status views over one set of orders.
///
/// Each view keeps the input order.
#[derive(Debug, Clone, Default)]
pub struct StatusPartition<'a> {
    pub completed: Vec<&'a Order>,
    pub serving: Vec<&'a Order>,
    pub cancelled: Vec<&'a Order>,
    pub unpaid: Vec<&'a Order>,
    /// Every order classified, including `Other`.
    pub total: usize,
}

/// Classifies `orders` into a [`StatusPartition`].
pub fn classify(orders: &[Order]) -> StatusPartition<'_> {
    let mut partition = StatusPartition {
        total: orders.len(),
        ..StatusPartition::default()
    };

    for order in orders {
        let status = order.status;
        if status.is_completed() {
            partition.completed.push(order);
        }
        if status.is_serving() {
            partition.serving.push(order);
        }
        if status.is_cancelled() {
            partition.cancelled.push(order);
        }
        if status.is_unpaid() {
            partition.unpaid.push(order);
        }
    }

    partition
}
