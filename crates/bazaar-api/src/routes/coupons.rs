// SPDX-License-Identifier: BUSL-1.1
//! # Coupon Administration Endpoints
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `POST` | `/v1/coupons` | `create_coupon` |
//! | `GET` | `/v1/coupons/:code` | `get_coupon` |
//!
//! Coupons are created by administrators and read-only at checkout.
//! Checkout looks them up by normalized code; an order embeds a by-value
//! snapshot, so edits here never rewrite placed orders.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use bazaar_core::{Coupon, CouponCode, CouponId, DiscountPercent};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::state::AppState;

/// Request to create a coupon.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateCouponRequest {
    /// Redemption code; normalized (trimmed, uppercased) on receipt.
    #[schema(value_type = String)]
    pub code: CouponCode,
    /// Whole-number discount percentage, 0–100.
    #[schema(value_type = u32)]
    pub discount: DiscountPercent,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub new_customers_only: bool,
    #[serde(default)]
    pub members_only: bool,
    #[serde(default = "default_public")]
    pub public: bool,
}

fn default_public() -> bool {
    true
}

/// Build the coupons router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/coupons", post(create_coupon))
        .route("/v1/coupons/:code", get(get_coupon))
}

/// POST /v1/coupons — create a coupon.
#[utoipa::path(
    post,
    path = "/v1/coupons",
    request_body = CreateCouponRequest,
    responses(
        (status = 201, description = "Coupon created"),
        (status = 409, description = "Code already exists", body = crate::error::ErrorBody),
        (status = 422, description = "Validation failure", body = crate::error::ErrorBody),
    ),
    tag = "coupons"
)]
pub(crate) async fn create_coupon(
    State(state): State<AppState>,
    Json(request): Json<CreateCouponRequest>,
) -> Result<impl IntoResponse, AppError> {
    let coupon = Coupon {
        id: CouponId::new(),
        code: request.code,
        discount: request.discount,
        expires_at: request.expires_at,
        new_customers_only: request.new_customers_only,
        members_only: request.members_only,
        public: request.public,
        created_at: Utc::now(),
    };
    state
        .market
        .insert_coupon(coupon.clone())
        .map_err(|err| AppError::Conflict(err.to_string()))?;
    Ok((StatusCode::CREATED, Json(coupon)))
}

/// GET /v1/coupons/:code — look up a coupon by code.
#[utoipa::path(
    get,
    path = "/v1/coupons/{code}",
    params(("code" = String, Path, description = "Coupon code, case-insensitive")),
    responses(
        (status = 200, description = "The coupon"),
        (status = 404, description = "No such coupon", body = crate::error::ErrorBody),
        (status = 422, description = "Malformed code", body = crate::error::ErrorBody),
    ),
    tag = "coupons"
)]
pub(crate) async fn get_coupon(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Coupon>, AppError> {
    let code = CouponCode::new(code)?;
    state
        .market
        .get_coupon(&code)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("coupon: {code}")))
}
