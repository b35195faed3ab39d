// SPDX-License-Identifier: BUSL-1.1
//! # Order Plan
//!
//! The fully-assembled set of orders a placement will create, built from
//! the store groups, the coupon decision, and the delivery details. The
//! plan is pure data: assembling it has no side effects, and handing it to
//! [`crate::MarketStore::place_orders`] is the single transactional step.

use bazaar_core::{
    AddressId, CouponSnapshot, CustomerId, Order, OrderId, OrderLine, OrderStatus, PaymentMethod,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::coupon::{split_discount, CouponDecision};
use crate::grouping::StoreGroup;

/// Everything the transactional writer needs: the orders to create (one
/// per store group) and the customer whose cart clears on commit.
#[derive(Debug, Clone)]
pub struct OrderPlan {
    pub customer_id: CustomerId,
    pub orders: Vec<Order>,
}

impl OrderPlan {
    /// Assemble a plan from grouped lines and the coupon decision.
    ///
    /// Per store: `total = max(0, subtotal − discount share)` where the
    /// share is the absolute discount divided evenly across stores. The
    /// coupon snapshot is embedded into every order it discounted.
    pub fn assemble(
        customer_id: CustomerId,
        address_id: AddressId,
        payment: PaymentMethod,
        groups: Vec<StoreGroup>,
        decision: &CouponDecision,
        placed_at: DateTime<Utc>,
    ) -> Self {
        let combined: Decimal = groups.iter().map(|g| g.subtotal).sum();
        let share = split_discount(decision.absolute_discount(combined), groups.len());
        let snapshot: Option<CouponSnapshot> = decision.snapshot.clone();

        let orders = groups
            .into_iter()
            .map(|group| {
                let total = (group.subtotal - share).max(Decimal::ZERO);
                Order {
                    id: OrderId::new(),
                    customer_id,
                    store_id: group.store_id,
                    address_id,
                    total,
                    payment,
                    paid: payment.paid_at_placement(),
                    status: OrderStatus::Placed,
                    coupon: snapshot.clone(),
                    lines: group
                        .lines
                        .into_iter()
                        .map(|line| OrderLine {
                            product_id: line.product_id,
                            product_name: line.product_name,
                            quantity: line.quantity,
                            unit_price: line.unit_price,
                        })
                        .collect(),
                    placed_at,
                }
            })
            .collect();

        Self {
            customer_id,
            orders,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::PricedLine;
    use bazaar_core::{Coupon, CouponCode, CouponId, DiscountPercent, ProductId, Quantity, StoreId};
    use chrono::Duration;

    fn group(store_id: StoreId, price: i64) -> StoreGroup {
        StoreGroup {
            store_id,
            subtotal: Decimal::from(price),
            lines: vec![PricedLine {
                product_id: ProductId::new(),
                product_name: "item".into(),
                store_id,
                quantity: Quantity::ONE,
                unit_price: Decimal::from(price),
            }],
        }
    }

    fn ten_percent() -> CouponDecision {
        let coupon = Coupon {
            id: CouponId::new(),
            code: CouponCode::new("SUMMER10").unwrap(),
            discount: DiscountPercent::new(10).unwrap(),
            expires_at: Utc::now() + Duration::days(1),
            new_customers_only: false,
            members_only: false,
            public: true,
            created_at: Utc::now(),
        };
        CouponDecision {
            snapshot: Some(coupon.snapshot()),
        }
    }

    #[test]
    fn one_order_per_store_group() {
        let plan = OrderPlan::assemble(
            CustomerId::new(),
            AddressId::new(),
            PaymentMethod::CashOnDelivery,
            vec![group(StoreId::new(), 70), group(StoreId::new(), 30)],
            &CouponDecision::none(),
            Utc::now(),
        );
        assert_eq!(plan.orders.len(), 2);
        assert!(plan.orders.iter().all(|o| o.status == OrderStatus::Placed));
        assert!(plan.orders.iter().all(|o| !o.paid));
        assert!(plan.orders.iter().all(|o| o.coupon.is_none()));
    }

    #[test]
    fn even_split_not_proportional() {
        // $100 combined, 10% coupon → $10 discount → $5 per store,
        // even though the stores split $70 / $30.
        let (a, b) = (StoreId::new(), StoreId::new());
        let plan = OrderPlan::assemble(
            CustomerId::new(),
            AddressId::new(),
            PaymentMethod::Card,
            vec![group(a, 70), group(b, 30)],
            &ten_percent(),
            Utc::now(),
        );
        let by_store = |s: StoreId| plan.orders.iter().find(|o| o.store_id == s).unwrap();
        assert_eq!(by_store(a).total, Decimal::from(65));
        assert_eq!(by_store(b).total, Decimal::from(25));
        assert!(plan.orders.iter().all(|o| o.coupon.is_some()));
    }

    #[test]
    fn totals_floor_at_zero() {
        // Subtotals 5 and 95: combined 100, 40% coupon → $40 discount,
        // $20 per store. The $5 store floors at zero instead of going
        // negative; the other pays 95 − 20 = 75.
        let coupon = Coupon {
            id: CouponId::new(),
            code: CouponCode::new("BIG40").unwrap(),
            discount: DiscountPercent::new(40).unwrap(),
            expires_at: Utc::now() + Duration::days(1),
            new_customers_only: false,
            members_only: false,
            public: true,
            created_at: Utc::now(),
        };
        let decision = CouponDecision {
            snapshot: Some(coupon.snapshot()),
        };
        let (small, large) = (StoreId::new(), StoreId::new());
        let plan = OrderPlan::assemble(
            CustomerId::new(),
            AddressId::new(),
            PaymentMethod::CashOnDelivery,
            vec![group(small, 5), group(large, 95)],
            &decision,
            Utc::now(),
        );
        let by_store = |s: StoreId| plan.orders.iter().find(|o| o.store_id == s).unwrap();
        assert_eq!(by_store(small).total, Decimal::ZERO);
        assert_eq!(by_store(large).total, Decimal::from(75));
    }

    #[test]
    fn card_orders_marked_paid_at_placement() {
        let plan = OrderPlan::assemble(
            CustomerId::new(),
            AddressId::new(),
            PaymentMethod::Card,
            vec![group(StoreId::new(), 10)],
            &CouponDecision::none(),
            Utc::now(),
        );
        assert!(plan.orders[0].paid);
    }
}
