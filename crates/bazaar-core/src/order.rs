// SPDX-License-Identifier: BUSL-1.1
//! # Orders
//!
//! The order record produced by checkout, its frozen order lines, payment
//! methods, and the order status state machine.
//!
//! ## Status machine
//!
//! ```text
//! Placed → Processing → Shipped → Delivered
//!    \         \           \
//!     `────────`───────────`──→ Cancelled
//! ```
//!
//! `Cancelled` is reachable from every state except `Delivered` (and
//! itself). Checkout only ever produces `Placed`; fulfillment drives the
//! rest via [`Order::transition`], which rejects illegal moves with a
//! structured [`OrderError`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coupon::CouponSnapshot;
use crate::identity::{AddressId, CustomerId, OrderId, ProductId, StoreId};
use crate::primitives::Quantity;

/// Errors arising from order lifecycle operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// The requested status transition is not legal from the current state.
    #[error("invalid transition: {from:?} → {to:?}")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },
}

/// How the customer pays for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Pay the courier on delivery.
    CashOnDelivery,
    /// Card payment.
    Card,
}

impl PaymentMethod {
    /// Whether an order is considered paid the moment it is placed.
    ///
    /// Card orders are marked paid at placement. This mirrors the upstream
    /// behavior this service replaced; a payment-processor confirmation
    /// callback would change this one rule rather than the order writer.
    pub fn paid_at_placement(&self) -> bool {
        matches!(self, Self::Card)
    }
}

/// Order fulfillment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Placed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether moving from `self` to `to` is a legal transition.
    pub fn can_transition_to(&self, to: OrderStatus) -> bool {
        use OrderStatus::*;
        match (self, to) {
            (Placed, Processing) | (Processing, Shipped) | (Shipped, Delivered) => true,
            (Placed | Processing | Shipped, Cancelled) => true,
            _ => false,
        }
    }
}

/// One line of an order.
///
/// `unit_price` is the price at the moment of purchase — the financial
/// record of what the customer agreed to pay. It is never recomputed from
/// the catalog, no matter how the product's price changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    /// Product display name at purchase time.
    pub product_name: String,
    pub quantity: Quantity,
    pub unit_price: Decimal,
}

impl OrderLine {
    /// Line subtotal: quantity × frozen unit price.
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity.get())
    }
}

/// A placed order. One order belongs to exactly one store; a cart spanning
/// several stores fans out into several orders created atomically together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub store_id: StoreId,
    pub address_id: AddressId,
    /// Grand total after the order's discount share, floored at zero.
    pub total: Decimal,
    pub payment: PaymentMethod,
    pub paid: bool,
    pub status: OrderStatus,
    /// Coupon frozen by value at placement, if one applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon: Option<CouponSnapshot>,
    pub lines: Vec<OrderLine>,
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Advance the order to a new status, rejecting illegal transitions.
    pub fn transition(&mut self, to: OrderStatus) -> Result<(), OrderError> {
        if !self.status.can_transition_to(to) {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(status: OrderStatus) -> Order {
        Order {
            id: OrderId::new(),
            customer_id: CustomerId::new(),
            store_id: StoreId::new(),
            address_id: AddressId::new(),
            total: Decimal::from(40),
            payment: PaymentMethod::CashOnDelivery,
            paid: false,
            status,
            coupon: None,
            lines: vec![OrderLine {
                product_id: ProductId::new(),
                product_name: "Clay Teapot".into(),
                quantity: Quantity::new(2).unwrap(),
                unit_price: Decimal::from(20),
            }],
            placed_at: Utc::now(),
        }
    }

    #[test]
    fn happy_path_transitions() {
        let mut o = order(OrderStatus::Placed);
        o.transition(OrderStatus::Processing).unwrap();
        o.transition(OrderStatus::Shipped).unwrap();
        o.transition(OrderStatus::Delivered).unwrap();
        assert_eq!(o.status, OrderStatus::Delivered);
    }

    #[test]
    fn cancel_reachable_before_delivery_only() {
        for from in [OrderStatus::Placed, OrderStatus::Processing, OrderStatus::Shipped] {
            let mut o = order(from);
            o.transition(OrderStatus::Cancelled).unwrap();
            assert_eq!(o.status, OrderStatus::Cancelled);
        }

        let mut delivered = order(OrderStatus::Delivered);
        assert_eq!(
            delivered.transition(OrderStatus::Cancelled),
            Err(OrderError::InvalidTransition {
                from: OrderStatus::Delivered,
                to: OrderStatus::Cancelled,
            })
        );
    }

    #[test]
    fn cannot_skip_states() {
        let mut o = order(OrderStatus::Placed);
        assert!(o.transition(OrderStatus::Shipped).is_err());
        assert!(o.transition(OrderStatus::Delivered).is_err());
        // Status unchanged after rejected transitions.
        assert_eq!(o.status, OrderStatus::Placed);
    }

    #[test]
    fn cancelled_is_terminal() {
        let mut o = order(OrderStatus::Cancelled);
        assert!(o.transition(OrderStatus::Processing).is_err());
        assert!(o.transition(OrderStatus::Cancelled).is_err());
    }

    #[test]
    fn card_is_paid_at_placement_cod_is_not() {
        assert!(PaymentMethod::Card.paid_at_placement());
        assert!(!PaymentMethod::CashOnDelivery.paid_at_placement());
    }

    #[test]
    fn line_subtotal_multiplies_frozen_price() {
        let line = OrderLine {
            product_id: ProductId::new(),
            product_name: "Kilim Rug".into(),
            quantity: Quantity::new(3).unwrap(),
            unit_price: Decimal::new(1250, 2), // 12.50
        };
        assert_eq!(line.subtotal(), Decimal::new(3750, 2));
    }
}
