// SPDX-License-Identifier: BUSL-1.1
//! # Order Endpoints
//!
//! The order placement workflow and read access to placed orders.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `POST` | `/v1/orders` | `place_order` |
//! | `GET` | `/v1/orders` | `list_orders` |
//! | `GET` | `/v1/orders/:order_id` | `get_order` |
//!
//! Placement validates before it writes; the write itself is the
//! all-or-nothing step in the market store. Confirmations and the optional
//! Postgres mirror run strictly after commit, off the request path.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use bazaar_checkout::PlaceOrderRequest;
use bazaar_core::{Order, OrderId};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::db;
use crate::error::AppError;
use crate::extractors::CustomerIdentity;
use crate::notifications;
use crate::state::AppState;

/// Response envelope for a successful placement: one order per store the
/// request's items spanned.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlaceOrderResponse {
    #[schema(value_type = Vec<Object>)]
    pub orders: Vec<Order>,
}

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/orders", post(place_order).get(list_orders))
        .route("/v1/orders/:order_id", get(get_order))
}

/// POST /v1/orders — place an order from the selected items.
#[utoipa::path(
    post,
    path = "/v1/orders",
    responses(
        (status = 201, description = "Orders created, one per store", body = PlaceOrderResponse),
        (status = 401, description = "No authenticated customer", body = crate::error::ErrorBody),
        (status = 409, description = "A product is not purchasable", body = crate::error::ErrorBody),
        (status = 422, description = "Validation failure", body = crate::error::ErrorBody),
        (status = 503, description = "Transient failure, safe to retry", body = crate::error::ErrorBody),
    ),
    tag = "orders"
)]
pub(crate) async fn place_order(
    State(state): State<AppState>,
    CustomerIdentity(customer_id): CustomerIdentity,
    Json(request): Json<PlaceOrderRequest>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = state.checkout.place_order(customer_id, &request, Utc::now())?;

    // Both post-commit effects are fire-and-forget: the placement is
    // already durable in the authoritative store.
    if let Some(pool) = state.db.clone() {
        let orders = outcome.orders.clone();
        tokio::spawn(async move {
            if let Err(err) = db::orders::persist_placement(&pool, customer_id, &orders).await {
                tracing::error!(error = %err, customer = %customer_id, "postgres write-through failed");
            }
        });
    }
    notifications::dispatch(outcome.confirmations);

    Ok((
        StatusCode::CREATED,
        Json(PlaceOrderResponse {
            orders: outcome.orders,
        }),
    ))
}

/// GET /v1/orders — the authenticated customer's orders, newest first.
#[utoipa::path(
    get,
    path = "/v1/orders",
    responses(
        (status = 200, description = "Orders for the authenticated customer"),
        (status = 401, description = "No authenticated customer", body = crate::error::ErrorBody),
    ),
    tag = "orders"
)]
pub(crate) async fn list_orders(
    State(state): State<AppState>,
    CustomerIdentity(customer_id): CustomerIdentity,
) -> Json<Vec<Order>> {
    Json(state.market.orders_for(customer_id))
}

/// GET /v1/orders/:order_id — one order, visible only to its owner.
#[utoipa::path(
    get,
    path = "/v1/orders/{order_id}",
    params(("order_id" = String, Path, description = "Order identifier")),
    responses(
        (status = 200, description = "The order"),
        (status = 404, description = "No such order for this customer", body = crate::error::ErrorBody),
    ),
    tag = "orders"
)]
pub(crate) async fn get_order(
    State(state): State<AppState>,
    CustomerIdentity(customer_id): CustomerIdentity,
    Path(order_id): Path<OrderId>,
) -> Result<Json<Order>, AppError> {
    state
        .market
        .get_order(order_id)
        .filter(|order| order.customer_id == customer_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("order: {order_id}")))
}
