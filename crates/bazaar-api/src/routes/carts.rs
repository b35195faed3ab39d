// SPDX-License-Identifier: BUSL-1.1
//! # Cart Endpoints
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `GET` | `/v1/cart` | `get_cart` |
//! | `PUT` | `/v1/cart/items` | `set_cart_line` |
//!
//! Cart-add enforces store eligibility: a product whose store is not
//! approved cannot enter the cart. (Checkout re-checks the same gate at
//! placement, since approval can be withdrawn in between.)

use axum::extract::State;
use axum::routing::{get, put};
use axum::{Json, Router};
use bazaar_core::{Cart, ProductId, Quantity};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::db;
use crate::error::AppError;
use crate::extractors::CustomerIdentity;
use crate::state::AppState;

/// Request to set one cart line. Quantity `0` removes the line.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct SetCartLineRequest {
    #[schema(value_type = String)]
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Build the cart router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/cart", get(get_cart))
        .route("/v1/cart/items", put(set_cart_line))
}

/// GET /v1/cart — the authenticated customer's cart.
#[utoipa::path(
    get,
    path = "/v1/cart",
    responses(
        (status = 200, description = "The customer's cart"),
        (status = 401, description = "No authenticated customer", body = crate::error::ErrorBody),
    ),
    tag = "cart"
)]
pub(crate) async fn get_cart(
    State(state): State<AppState>,
    CustomerIdentity(customer_id): CustomerIdentity,
) -> Json<Cart> {
    Json(state.market.cart_of(customer_id))
}

/// PUT /v1/cart/items — set one line of the cart.
#[utoipa::path(
    put,
    path = "/v1/cart/items",
    request_body = SetCartLineRequest,
    responses(
        (status = 200, description = "Updated cart"),
        (status = 404, description = "Product does not exist", body = crate::error::ErrorBody),
        (status = 409, description = "Store is not accepting orders", body = crate::error::ErrorBody),
    ),
    tag = "cart"
)]
pub(crate) async fn set_cart_line(
    State(state): State<AppState>,
    CustomerIdentity(customer_id): CustomerIdentity,
    Json(request): Json<SetCartLineRequest>,
) -> Result<Json<Cart>, AppError> {
    if request.quantity == 0 {
        state.market.set_cart_line(customer_id, request.product_id, None);
        mirror_cart_line(&state, customer_id, request.product_id, None);
        return Ok(Json(state.market.cart_of(customer_id)));
    }

    let product = state
        .market
        .get_product(request.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product: {}", request.product_id)))?;
    let store_orderable = state
        .market
        .get_store(product.store_id)
        .map(|s| s.is_orderable())
        .unwrap_or(false);
    if !store_orderable {
        return Err(AppError::Conflict(format!(
            "store is not accepting orders: {}",
            product.store_id
        )));
    }

    let quantity = Quantity::new(request.quantity)?;
    state
        .market
        .set_cart_line(customer_id, request.product_id, Some(quantity));
    mirror_cart_line(&state, customer_id, request.product_id, Some(quantity));
    Ok(Json(state.market.cart_of(customer_id)))
}

/// Fire-and-forget Postgres mirror of one cart line.
fn mirror_cart_line(
    state: &AppState,
    customer_id: bazaar_core::CustomerId,
    product_id: ProductId,
    quantity: Option<Quantity>,
) {
    if let Some(pool) = state.db.clone() {
        tokio::spawn(async move {
            if let Err(err) = db::carts::save_cart_line(&pool, customer_id, product_id, quantity).await
            {
                tracing::error!(error = %err, customer = %customer_id, "cart write-through failed");
            }
        });
    }
}
