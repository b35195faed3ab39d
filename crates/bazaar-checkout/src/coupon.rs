// SPDX-License-Identifier: BUSL-1.1
//! # Coupon Evaluation
//!
//! A pure decision over explicit inputs: the looked-up coupon record (if
//! any), the customer's prior order count, and the caller-supplied clock.
//! No ambient time, no hidden table reads — the same inputs always produce
//! the same decision.
//!
//! An absent, unknown, or expired code is a *soft* miss: checkout proceeds
//! with no discount and no error. A mistyped promo code must never block
//! a paying customer.
//!
//! ## Discount distribution
//!
//! When an order fans out across several stores, the absolute discount
//! (percentage × combined subtotal) divides **evenly by store count** —
//! not proportionally to each store's subtotal. That is the documented
//! upstream behavior, preserved here for parity; see DESIGN.md before
//! "fixing" it. Each store's total floors at zero, so a small group never
//! goes negative.

use bazaar_core::{Coupon, CouponSnapshot};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// The outcome of evaluating a coupon code for one placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponDecision {
    /// Snapshot to embed into each created order, when the coupon applies.
    pub snapshot: Option<CouponSnapshot>,
}

impl CouponDecision {
    /// The no-discount decision.
    pub fn none() -> Self {
        Self { snapshot: None }
    }

    /// Absolute discount for the given combined subtotal, rounded to
    /// cents. Zero when the coupon did not apply.
    pub fn absolute_discount(&self, combined_subtotal: Decimal) -> Decimal {
        match &self.snapshot {
            Some(snap) => {
                (combined_subtotal * Decimal::from(snap.discount.get()) / Decimal::from(100))
                    .round_dp(2)
            }
            None => Decimal::ZERO,
        }
    }
}

/// Decide whether a looked-up coupon applies.
///
/// `coupon` is `None` when no code was supplied or the code matched no
/// record — both degrade silently. A found coupon applies iff it is
/// unexpired at `now`, publicly redeemable, and either unrestricted or the
/// customer has placed no prior orders.
pub fn evaluate_coupon(
    coupon: Option<&Coupon>,
    prior_order_count: u64,
    now: DateTime<Utc>,
) -> CouponDecision {
    let Some(coupon) = coupon else {
        return CouponDecision::none();
    };

    if coupon.is_expired(now) {
        tracing::debug!(code = %coupon.code, "coupon expired, degrading to no discount");
        return CouponDecision::none();
    }
    if !coupon.public {
        return CouponDecision::none();
    }
    if coupon.new_customers_only && prior_order_count > 0 {
        tracing::debug!(
            code = %coupon.code,
            prior_order_count,
            "new-customer coupon on returning customer, degrading to no discount"
        );
        return CouponDecision::none();
    }

    CouponDecision {
        snapshot: Some(coupon.snapshot()),
    }
}

/// Divide an absolute discount evenly across `store_count` stores,
/// rounded to cents. Returns zero for a zero store count.
pub fn split_discount(absolute_discount: Decimal, store_count: usize) -> Decimal {
    if store_count == 0 || absolute_discount.is_zero() {
        return Decimal::ZERO;
    }
    (absolute_discount / Decimal::from(store_count as u64)).round_dp(2)
}
