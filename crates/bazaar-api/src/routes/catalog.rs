// SPDX-License-Identifier: BUSL-1.1
//! # Catalog Endpoints — Vendor Stores and Products
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `POST` | `/v1/stores` | `create_store` |
//! | `GET` | `/v1/stores` | `list_stores` |
//! | `GET` | `/v1/stores/:store_id` | `get_store` |
//! | `POST` | `/v1/stores/:store_id/approve` | `approve_store` |
//! | `POST` | `/v1/stores/:store_id/suspend` | `suspend_store` |
//! | `POST` | `/v1/products` | `create_product` |
//! | `GET` | `/v1/products` | `list_products` |
//! | `GET` | `/v1/products/:product_id` | `get_product` |
//!
//! Stores register as `pending`; an administrator approves or suspends
//! them. Only an approved store's products can be carted or ordered.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use bazaar_core::{Product, ProductId, Store, StoreId, StoreStatus};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::state::AppState;

/// Request to register a vendor store.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateStoreRequest {
    pub name: String,
}

/// Request to create a catalog product.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateProductRequest {
    #[schema(value_type = String)]
    pub store_id: StoreId,
    pub name: String,
    #[schema(value_type = String)]
    pub unit_price: Decimal,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

/// Build the catalog router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/stores", post(create_store).get(list_stores))
        .route("/v1/stores/:store_id", get(get_store))
        .route("/v1/stores/:store_id/approve", post(approve_store))
        .route("/v1/stores/:store_id/suspend", post(suspend_store))
        .route("/v1/products", post(create_product).get(list_products))
        .route("/v1/products/:product_id", get(get_product))
}

/// POST /v1/stores — register a store in the pending state.
#[utoipa::path(
    post,
    path = "/v1/stores",
    request_body = CreateStoreRequest,
    responses(
        (status = 201, description = "Store registered"),
        (status = 422, description = "Validation failure", body = crate::error::ErrorBody),
    ),
    tag = "catalog"
)]
pub(crate) async fn create_store(
    State(state): State<AppState>,
    Json(request): Json<CreateStoreRequest>,
) -> Result<impl IntoResponse, AppError> {
    let store = Store::register(request.name)?;
    state.market.insert_store(store.clone());
    Ok((StatusCode::CREATED, Json(store)))
}

/// GET /v1/stores — every registered store.
#[utoipa::path(
    get,
    path = "/v1/stores",
    responses((status = 200, description = "All stores")),
    tag = "catalog"
)]
pub(crate) async fn list_stores(State(state): State<AppState>) -> Json<Vec<Store>> {
    Json(state.market.list_stores())
}

/// GET /v1/stores/:store_id — one store.
#[utoipa::path(
    get,
    path = "/v1/stores/{store_id}",
    params(("store_id" = String, Path, description = "Store identifier")),
    responses(
        (status = 200, description = "The store"),
        (status = 404, description = "No such store", body = crate::error::ErrorBody),
    ),
    tag = "catalog"
)]
pub(crate) async fn get_store(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
) -> Result<Json<Store>, AppError> {
    state
        .market
        .get_store(store_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("store: {store_id}")))
}

/// POST /v1/stores/:store_id/approve — admin approval.
#[utoipa::path(
    post,
    path = "/v1/stores/{store_id}/approve",
    params(("store_id" = String, Path, description = "Store identifier")),
    responses(
        (status = 200, description = "Store approved"),
        (status = 404, description = "No such store", body = crate::error::ErrorBody),
    ),
    tag = "catalog"
)]
pub(crate) async fn approve_store(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
) -> Result<Json<Store>, AppError> {
    set_status(&state, store_id, StoreStatus::Approved)
}

/// POST /v1/stores/:store_id/suspend — admin suspension.
#[utoipa::path(
    post,
    path = "/v1/stores/{store_id}/suspend",
    params(("store_id" = String, Path, description = "Store identifier")),
    responses(
        (status = 200, description = "Store suspended"),
        (status = 404, description = "No such store", body = crate::error::ErrorBody),
    ),
    tag = "catalog"
)]
pub(crate) async fn suspend_store(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
) -> Result<Json<Store>, AppError> {
    set_status(&state, store_id, StoreStatus::Suspended)
}

fn set_status(
    state: &AppState,
    store_id: StoreId,
    status: StoreStatus,
) -> Result<Json<Store>, AppError> {
    state
        .market
        .set_store_status(store_id, status)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("store: {store_id}")))
}

/// POST /v1/products — create a product under an existing store.
#[utoipa::path(
    post,
    path = "/v1/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created"),
        (status = 404, description = "Owning store does not exist", body = crate::error::ErrorBody),
        (status = 422, description = "Validation failure", body = crate::error::ErrorBody),
    ),
    tag = "catalog"
)]
pub(crate) async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, AppError> {
    if state.market.get_store(request.store_id).is_none() {
        return Err(AppError::NotFound(format!("store: {}", request.store_id)));
    }
    let product = Product::new(
        request.store_id,
        request.name,
        request.unit_price,
        request.in_stock,
    )?;
    state.market.upsert_product(product.clone());
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /v1/products — the whole catalog.
#[utoipa::path(
    get,
    path = "/v1/products",
    responses((status = 200, description = "All products")),
    tag = "catalog"
)]
pub(crate) async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.market.list_products())
}

/// GET /v1/products/:product_id — one product.
#[utoipa::path(
    get,
    path = "/v1/products/{product_id}",
    params(("product_id" = String, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "The product"),
        (status = 404, description = "No such product", body = crate::error::ErrorBody),
    ),
    tag = "catalog"
)]
pub(crate) async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
) -> Result<Json<Product>, AppError> {
    state
        .market
        .get_product(product_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product: {product_id}")))
}
