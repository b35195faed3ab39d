// SPDX-License-Identifier: BUSL-1.1
//! # Coupon Records
//!
//! Admin-created discount records, and the by-value snapshot that checkout
//! embeds into every order a coupon touched. The snapshot is deliberately
//! a copy: later edits or deletion of the coupon record must not rewrite
//! the financial history of already-placed orders.
//!
//! Eligibility *evaluation* lives in `bazaar-checkout`; this module only
//! defines the data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::CouponId;
use crate::primitives::{CouponCode, DiscountPercent};

/// An admin-created coupon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupon {
    pub id: CouponId,
    /// Normalized (uppercased) redemption code, unique across coupons.
    pub code: CouponCode,
    pub discount: DiscountPercent,
    pub expires_at: DateTime<Utc>,
    /// Redeemable only by customers with no prior orders.
    pub new_customers_only: bool,
    /// Reserved for the membership program; not consulted at checkout.
    /// Membership itself lives with the external identity provider.
    pub members_only: bool,
    /// Publicly redeemable. Non-public coupons (e.g. generated for cart
    /// recovery campaigns) never apply at open checkout.
    pub public: bool,
    pub created_at: DateTime<Utc>,
}

impl Coupon {
    /// Whether the coupon is expired at `now`.
    ///
    /// Expiry is inclusive: a coupon whose `expires_at` equals `now` is
    /// already expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// The by-value snapshot to embed into orders.
    pub fn snapshot(&self) -> CouponSnapshot {
        CouponSnapshot {
            code: self.code.clone(),
            discount: self.discount,
        }
    }
}

/// The portion of a coupon frozen into an order at placement time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponSnapshot {
    pub code: CouponCode,
    pub discount: DiscountPercent,
}
