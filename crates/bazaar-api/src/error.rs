// SPDX-License-Identifier: BUSL-1.1
//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps checkout and validation errors to HTTP status codes and returns
//! JSON error bodies with a machine-checkable code, a human-readable
//! message, and (for product-scoped checkout failures) details naming the
//! offending product so the cart UI can highlight the exact line.
//! Internal error detail is never exposed to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bazaar_checkout::CheckoutError;
use bazaar_core::ValidationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g. "OUT_OF_STOCK", "NOT_FOUND").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional context, present only for client errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// A checkout workflow failure; carries the full placement taxonomy.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request body parsed but contains invalid values (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Conflict with current resource state (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Missing or invalid service credentials (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server error (500). Message is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl AppError {
    /// HTTP status and machine-readable code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Checkout(err) => match err {
                CheckoutError::Unauthenticated => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
                CheckoutError::InvalidAddress => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_ADDRESS")
                }
                CheckoutError::EmptyOrder => (StatusCode::UNPROCESSABLE_ENTITY, "EMPTY_ORDER"),
                CheckoutError::ProductNotFound(_) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "PRODUCT_NOT_FOUND")
                }
                CheckoutError::OutOfStock(_) => (StatusCode::CONFLICT, "OUT_OF_STOCK"),
                CheckoutError::TransientFailure(_) => {
                    (StatusCode::SERVICE_UNAVAILABLE, "TRANSIENT_FAILURE")
                }
            },
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Details payload for product-scoped checkout failures.
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Checkout(err) => err
                .product_id()
                .map(|id| serde_json::json!({ "product_id": id })),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::Checkout(CheckoutError::TransientFailure(_)) => {
                tracing::warn!(error = %self, "transient checkout failure")
            }
            _ => {}
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details: self.details(),
            },
        };

        (status, Json(body)).into_response()
    }
}
