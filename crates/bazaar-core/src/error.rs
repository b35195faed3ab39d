// SPDX-License-Identifier: BUSL-1.1
//! Structured validation errors for domain-primitive construction.

use thiserror::Error;

/// Errors raised when a domain primitive or record rejects its input at
/// construction time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Coupon code was empty (or all whitespace) after trimming.
    #[error("coupon code must not be empty")]
    EmptyCouponCode,

    /// Quantity below the minimum of 1.
    #[error("quantity must be at least 1, got {0}")]
    QuantityTooSmall(u32),

    /// Discount percentage outside 0–100.
    #[error("discount percent must be between 0 and 100, got {0}")]
    DiscountOutOfRange(u32),

    /// Product price below zero.
    #[error("unit price must not be negative, got {0}")]
    NegativePrice(rust_decimal::Decimal),

    /// A display name was empty after trimming.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the offending field.
        field: &'static str,
    },
}
