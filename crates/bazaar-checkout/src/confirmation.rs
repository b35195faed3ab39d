// SPDX-License-Identifier: BUSL-1.1
//! Post-commit confirmation events.
//!
//! Emitted once per created order *after* the transactional write commits.
//! Delivery (email, analytics) is fire-and-forget: a failed dispatch is
//! logged by the dispatcher and never affects the already-returned
//! placement response.

use bazaar_core::{CustomerId, Order, OrderId, StoreId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// The facts a confirmation channel needs about one created order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub store_id: StoreId,
    pub total: Decimal,
    pub line_count: usize,
    pub placed_at: DateTime<Utc>,
}

impl From<&Order> for OrderConfirmation {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id,
            customer_id: order.customer_id,
            store_id: order.store_id,
            total: order.total,
            line_count: order.lines.len(),
            placed_at: order.placed_at,
        }
    }
}
