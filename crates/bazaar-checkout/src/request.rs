// SPDX-License-Identifier: BUSL-1.1
//! The ephemeral order placement request. Never persisted.

use bazaar_core::{AddressId, CouponCode, PaymentMethod, ProductId, Quantity};
use serde::Deserialize;

/// One requested line: a product and how many of it.
///
/// [`Quantity`] is validated at deserialization, so a zero quantity is
/// rejected before the workflow ever sees the request.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LineRequest {
    pub product_id: ProductId,
    pub quantity: Quantity,
}

/// A request to place an order from the customer's selected items.
///
/// The authenticated customer is *not* part of the request body — it comes
/// from the session layer and is passed to the service separately, so a
/// request body can never claim to be someone else.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaceOrderRequest {
    pub address_id: AddressId,
    pub payment: PaymentMethod,
    /// Optional promo code. Invalid or expired codes degrade silently.
    #[serde(default)]
    pub coupon_code: Option<CouponCode>,
    pub items: Vec<LineRequest>,
}
