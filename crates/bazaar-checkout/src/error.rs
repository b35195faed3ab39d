// SPDX-License-Identifier: BUSL-1.1
//! # Checkout Error Taxonomy
//!
//! Every failure a caller of the placement workflow can see, each with a
//! machine-checkable kind. Product-level failures name the offending
//! product so the cart UI can highlight the exact line.
//!
//! Coupon invalidity is deliberately absent: it degrades silently to "no
//! discount applied" in [`crate::coupon::evaluate_coupon`].

use bazaar_core::ProductId;
use thiserror::Error;

/// Errors surfaced by the order placement workflow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// No valid customer identity on the request. Not retryable without
    /// signing in.
    #[error("no authenticated customer on request")]
    Unauthenticated,

    /// The address does not exist or belongs to another customer.
    #[error("address does not exist or is not owned by the customer")]
    InvalidAddress,

    /// The request carried no line items.
    #[error("order contains no items")]
    EmptyOrder,

    /// A requested product does not exist in the catalog.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// A requested product cannot currently be purchased — it is out of
    /// stock, or its store is not approved and active. The whole request
    /// is rejected; no partial order is placed from the valid items.
    #[error("product not available: {0}")]
    OutOfStock(ProductId),

    /// The storage layer failed mid-flight. Nothing was persisted, so the
    /// whole request is safe to retry.
    #[error("transient storage failure: {0}")]
    TransientFailure(String),
}

impl CheckoutError {
    /// Whether retrying the identical request can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TransientFailure(_))
    }

    /// The product this error names, if it is product-scoped.
    pub fn product_id(&self) -> Option<ProductId> {
        match self {
            Self::ProductNotFound(id) | Self::OutOfStock(id) => Some(*id),
            _ => None,
        }
    }
}

/// Errors reported by a [`crate::MarketStore`] implementation.
///
/// The service collapses these into [`CheckoutError::TransientFailure`]:
/// by the storage contract nothing was written, so the caller may retry
/// the whole request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// A record the transaction depends on vanished mid-flight
    /// (e.g. a product deleted between validation and the write).
    #[error("conflict during transactional write: {0}")]
    Conflict(String),

    /// The backing store is unavailable or timed out.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
