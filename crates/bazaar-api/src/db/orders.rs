// SPDX-License-Identifier: BUSL-1.1
//! Order persistence operations.
//!
//! A placement's orders, their lines, and the cart clear are written in a
//! single SQL transaction so the mirror keeps the same all-or-nothing shape
//! as the in-memory commit.

use bazaar_core::{CustomerId, Order, OrderStatus, PaymentMethod};
use sqlx::PgPool;

/// Persist every order of one placement and clear the customer's mirrored
/// cart, all inside one transaction.
pub async fn persist_placement(
    pool: &PgPool,
    customer_id: CustomerId,
    orders: &[Order],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    for order in orders {
        let coupon_json = match &order.coupon {
            Some(snapshot) => Some(serde_json::to_value(snapshot).map_err(|e| {
                sqlx::Error::Protocol(format!("failed to serialize coupon snapshot: {e}"))
            })?),
            None => None,
        };

        sqlx::query(
            "INSERT INTO orders (order_id, customer_id, store_id, address_id, total, payment, paid, status, coupon, placed_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             ON CONFLICT (order_id) DO NOTHING",
        )
        .bind(order.id.as_uuid())
        .bind(order.customer_id.as_uuid())
        .bind(order.store_id.as_uuid())
        .bind(order.address_id.as_uuid())
        .bind(order.total)
        .bind(payment_str(order.payment))
        .bind(order.paid)
        .bind(status_str(order.status))
        .bind(coupon_json)
        .bind(order.placed_at)
        .execute(&mut *tx)
        .await?;

        for line in &order.lines {
            sqlx::query(
                "INSERT INTO order_lines (order_id, product_id, product_name, quantity, unit_price)
                 VALUES ($1, $2, $3, $4, $5)
                 ON CONFLICT (order_id, product_id) DO NOTHING",
            )
            .bind(order.id.as_uuid())
            .bind(line.product_id.as_uuid())
            .bind(&line.product_name)
            .bind(line.quantity.get() as i32)
            .bind(line.unit_price)
            .execute(&mut *tx)
            .await?;
        }
    }

    sqlx::query("DELETE FROM cart_lines WHERE customer_id = $1")
        .bind(customer_id.as_uuid())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

fn payment_str(payment: PaymentMethod) -> &'static str {
    match payment {
        PaymentMethod::CashOnDelivery => "cash_on_delivery",
        PaymentMethod::Card => "card",
    }
}

fn status_str(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Placed => "placed",
        OrderStatus::Processing => "processing",
        OrderStatus::Shipped => "shipped",
        OrderStatus::Delivered => "delivered",
        OrderStatus::Cancelled => "cancelled",
    }
}
