// SPDX-License-Identifier: BUSL-1.1
//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::state::AppState;

/// Adds the bearer token security scheme to the OpenAPI spec.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some(
                            "Service bearer token. Set via BAZAAR_AUTH_TOKEN env var.",
                        ))
                        .build(),
                ),
            );
        }
    }
}

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bazaar API — Multi-Vendor Order Placement",
        version = "0.3.2",
        description = "Multi-vendor marketplace checkout service.\n\nProvides:\n- **Catalog**: vendor store onboarding (pending/approved/suspended) and products\n- **Cart**: per-customer cart with store-eligibility gating\n- **Checkout**: atomic multi-store order placement with coupon application\n- **Coupons**: percentage discounts with expiry and eligibility rules\n- **Addresses**: customer delivery address book\n\nCustomer identity travels in the `x-customer-id` header. When\n`BAZAAR_AUTH_TOKEN` is set, all `/v1/*` endpoints additionally require\n`Authorization: Bearer <token>`. Health probes are unauthenticated.",
        license(name = "BUSL-1.1")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    security(
        ("bearer_auth" = [])
    ),
    paths(
        // ── Orders ───────────────────────────────────────────────────────
        crate::routes::orders::place_order,
        crate::routes::orders::list_orders,
        crate::routes::orders::get_order,
        // ── Cart ─────────────────────────────────────────────────────────
        crate::routes::carts::get_cart,
        crate::routes::carts::set_cart_line,
        // ── Catalog ──────────────────────────────────────────────────────
        crate::routes::catalog::create_store,
        crate::routes::catalog::list_stores,
        crate::routes::catalog::get_store,
        crate::routes::catalog::approve_store,
        crate::routes::catalog::suspend_store,
        crate::routes::catalog::create_product,
        crate::routes::catalog::list_products,
        crate::routes::catalog::get_product,
        // ── Coupons ──────────────────────────────────────────────────────
        crate::routes::coupons::create_coupon,
        crate::routes::coupons::get_coupon,
        // ── Addresses ────────────────────────────────────────────────────
        crate::routes::addresses::create_address,
        crate::routes::addresses::list_addresses,
    ),
    components(
        schemas(
            crate::error::ErrorBody,
            crate::error::ErrorDetail,
            crate::routes::orders::PlaceOrderResponse,
            crate::routes::carts::SetCartLineRequest,
            crate::routes::catalog::CreateStoreRequest,
            crate::routes::catalog::CreateProductRequest,
            crate::routes::coupons::CreateCouponRequest,
            crate::routes::addresses::CreateAddressRequest,
        ),
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "orders", description = "Order placement and order queries"),
        (name = "cart", description = "Per-customer cart"),
        (name = "catalog", description = "Vendor stores and products"),
        (name = "coupons", description = "Coupon administration"),
        (name = "addresses", description = "Customer address book"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
