// SPDX-License-Identifier: BUSL-1.1
//! Cart line persistence operations.

use bazaar_core::{CustomerId, ProductId, Quantity};
use sqlx::PgPool;

/// Upsert one mirrored cart line; `None` removes it.
pub async fn save_cart_line(
    pool: &PgPool,
    customer_id: CustomerId,
    product_id: ProductId,
    quantity: Option<Quantity>,
) -> Result<(), sqlx::Error> {
    match quantity {
        Some(q) => {
            sqlx::query(
                "INSERT INTO cart_lines (customer_id, product_id, quantity, updated_at)
                 VALUES ($1, $2, $3, NOW())
                 ON CONFLICT (customer_id, product_id) DO UPDATE SET
                    quantity = EXCLUDED.quantity,
                    updated_at = EXCLUDED.updated_at",
            )
            .bind(customer_id.as_uuid())
            .bind(product_id.as_uuid())
            .bind(q.get() as i32)
            .execute(pool)
            .await?;
        }
        None => {
            sqlx::query("DELETE FROM cart_lines WHERE customer_id = $1 AND product_id = $2")
                .bind(customer_id.as_uuid())
                .bind(product_id.as_uuid())
                .execute(pool)
                .await?;
        }
    }
    Ok(())
}
