// SPDX-License-Identifier: BUSL-1.1
//! # Service Bearer Authentication
//!
//! Validates the `Authorization: Bearer <token>` header against the
//! configured service token. Comparison is constant-time (`subtle`) so the
//! token cannot be recovered byte-by-byte from response timing.
//!
//! The customer identity *protocol* (sessions, sign-in) is owned by the
//! external identity provider; by the time a request reaches this service
//! the provider's gateway has already authenticated the customer and
//! stamped `x-customer-id` (see [`crate::extractors`]). This middleware
//! only guards the service boundary itself.
//!
//! When no token is configured the middleware passes everything through —
//! intended for tests and local development.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use subtle::ConstantTimeEq;

use crate::error::AppError;
use crate::state::AppState;

/// Bearer-token middleware. Mount with `from_fn_with_state`.
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = state.config.auth_token.as_deref() else {
        return next.run(request).await;
    };

    let supplied = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match supplied {
        Some(token) if bool::from(token.as_bytes().ct_eq(expected.as_bytes())) => {
            next.run(request).await
        }
        _ => AppError::Unauthorized("missing or invalid bearer token".into()).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ApiConfig;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    fn app(token: Option<&str>) -> Router {
        let state = AppState::with_config(
            ApiConfig {
                auth_token: token.map(String::from),
            },
            None,
        );
        Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(axum::middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            ))
            .with_state(state)
    }

    #[tokio::test]
    async fn no_configured_token_passes_through() {
        let response = app(None)
            .oneshot(HttpRequest::get("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn wrong_token_is_rejected() {
        let response = app(Some("sekrit"))
            .oneshot(
                HttpRequest::get("/ping")
                    .header("authorization", "Bearer wrong")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn missing_header_is_rejected() {
        let response = app(Some("sekrit"))
            .oneshot(HttpRequest::get("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn correct_token_passes() {
        let response = app(Some("sekrit"))
            .oneshot(
                HttpRequest::get("/ping")
                    .header("authorization", "Bearer sekrit")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
