// SPDX-License-Identifier: BUSL-1.1
//! # Address Book Endpoints
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `POST` | `/v1/addresses` | `create_address` |
//! | `GET` | `/v1/addresses` | `list_addresses` |
//!
//! Addresses belong to the authenticated customer; placement rejects an
//! address id that resolves to another customer's record.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use bazaar_core::{Address, AddressId};
use chrono::Utc;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::CustomerIdentity;
use crate::state::AppState;

/// Request to save a delivery address.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateAddressRequest {
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    #[serde(default)]
    pub region: Option<String>,
    pub postal_code: String,
    pub country: String,
}

/// Build the addresses router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/addresses", post(create_address).get(list_addresses))
}

/// POST /v1/addresses — save an address for the authenticated customer.
#[utoipa::path(
    post,
    path = "/v1/addresses",
    request_body = CreateAddressRequest,
    responses(
        (status = 201, description = "Address saved"),
        (status = 401, description = "No authenticated customer", body = crate::error::ErrorBody),
        (status = 422, description = "Validation failure", body = crate::error::ErrorBody),
    ),
    tag = "addresses"
)]
pub(crate) async fn create_address(
    State(state): State<AppState>,
    CustomerIdentity(customer_id): CustomerIdentity,
    Json(request): Json<CreateAddressRequest>,
) -> Result<impl IntoResponse, AppError> {
    for (field, value) in [
        ("line1", &request.line1),
        ("city", &request.city),
        ("postal_code", &request.postal_code),
        ("country", &request.country),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{field} must not be blank")));
        }
    }

    let address = Address {
        id: AddressId::new(),
        customer_id,
        line1: request.line1,
        line2: request.line2,
        city: request.city,
        region: request.region,
        postal_code: request.postal_code,
        country: request.country,
        created_at: Utc::now(),
    };
    state.market.insert_address(address.clone());
    Ok((StatusCode::CREATED, Json(address)))
}

/// GET /v1/addresses — the authenticated customer's saved addresses.
#[utoipa::path(
    get,
    path = "/v1/addresses",
    responses(
        (status = 200, description = "Addresses for the authenticated customer"),
        (status = 401, description = "No authenticated customer", body = crate::error::ErrorBody),
    ),
    tag = "addresses"
)]
pub(crate) async fn list_addresses(
    State(state): State<AppState>,
    CustomerIdentity(customer_id): CustomerIdentity,
) -> Json<Vec<Address>> {
    Json(state.market.addresses_for(customer_id))
}
