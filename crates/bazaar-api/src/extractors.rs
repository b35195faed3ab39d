// SPDX-License-Identifier: BUSL-1.1
//! # Request Extractors
//!
//! [`CustomerIdentity`] materializes the authenticated customer from the
//! `x-customer-id` header stamped by the identity provider's gateway. A
//! missing or malformed header is the `Unauthenticated` case of the
//! checkout taxonomy — handlers using this extractor never see an
//! unauthenticated request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use bazaar_checkout::CheckoutError;
use bazaar_core::CustomerId;

use crate::error::AppError;

/// Header carrying the authenticated customer id.
pub const CUSTOMER_ID_HEADER: &str = "x-customer-id";

/// The authenticated customer on this request.
#[derive(Debug, Clone, Copy)]
pub struct CustomerIdentity(pub CustomerId);

#[axum::async_trait]
impl<S> FromRequestParts<S> for CustomerIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(CUSTOMER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<CustomerId>().ok())
            .map(CustomerIdentity)
            .ok_or(AppError::Checkout(CheckoutError::Unauthenticated))
    }
}
