// SPDX-License-Identifier: BUSL-1.1
//! # bazaar-api — HTTP Surface for the Marketplace
//!
//! Axum services for the multi-vendor marketplace: catalog and vendor
//! onboarding, per-customer carts and addresses, coupon administration,
//! and the atomic multi-store order placement workflow.
//!
//! ## API Surface
//!
//! | Prefix            | Module                | Domain                   |
//! |-------------------|-----------------------|--------------------------|
//! | `/v1/orders/*`    | [`routes::orders`]    | Order placement, queries |
//! | `/v1/cart/*`      | [`routes::carts`]     | Customer cart            |
//! | `/v1/stores/*`    | [`routes::catalog`]   | Vendor onboarding        |
//! | `/v1/products/*`  | [`routes::catalog`]   | Product catalog          |
//! | `/v1/coupons/*`   | [`routes::coupons`]   | Coupon administration    |
//! | `/v1/addresses/*` | [`routes::addresses`] | Address book             |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → AuthMiddleware → Handler
//! ```
//!
//! Health probes and `/metrics` are mounted outside the auth middleware so
//! they stay reachable without credentials.

pub mod auth;
pub mod db;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod notifications;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Check if metrics are enabled via the `BAZAAR_METRICS_ENABLED` env var.
/// Defaults to `true` when the variable is absent or set to anything other
/// than `"false"`.
fn metrics_enabled() -> bool {
    std::env::var("BAZAAR_METRICS_ENABLED")
        .map(|v| v.to_lowercase() != "false")
        .unwrap_or(true)
}

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let metrics_on = metrics_enabled();

    // Authenticated API routes. Body limit 2 MiB; order placement bodies
    // are small, the cap guards against oversized payloads.
    let mut api = Router::new()
        .merge(routes::orders::router())
        .merge(routes::carts::router())
        .merge(routes::catalog::router())
        .merge(routes::coupons::router())
        .merge(routes::addresses::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024))
        .layer(from_fn_with_state(state.clone(), auth::auth_middleware));

    if metrics_on {
        api = api.layer(from_fn_with_state(
            state.clone(),
            middleware::metrics::metrics_middleware,
        ));
    }

    let api = api.layer(TraceLayer::new_for_http()).with_state(state.clone());

    // Unauthenticated health probes; /metrics joins them when enabled.
    let mut unauthenticated = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));
    if metrics_on {
        unauthenticated = unauthenticated.route("/metrics", get(prometheus_metrics));
    }
    let unauthenticated = unauthenticated.with_state(state);

    Router::new().merge(unauthenticated).merge(api)
}

/// GET /health/liveness — the process is up.
async fn liveness() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

/// GET /health/readiness — the service can take traffic.
///
/// The in-memory market is always ready once constructed; the optional
/// Postgres mirror is reported but never gates readiness, because the
/// mirror is not on the request path.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "database": if state.db.is_some() { "mirroring" } else { "disabled" },
        })),
    )
}

/// GET /metrics — Prometheus metrics scrape endpoint.
async fn prometheus_metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
