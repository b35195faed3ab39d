// SPDX-License-Identifier: BUSL-1.1
//! # Route Modules
//!
//! | Prefix            | Module        | Domain                         |
//! |-------------------|---------------|--------------------------------|
//! | `/v1/orders/*`    | [`orders`]    | Order placement and queries    |
//! | `/v1/cart/*`      | [`carts`]     | Customer cart                  |
//! | `/v1/stores/*`    | [`catalog`]   | Vendor onboarding lifecycle    |
//! | `/v1/products/*`  | [`catalog`]   | Product catalog                |
//! | `/v1/coupons/*`   | [`coupons`]   | Coupon administration          |
//! | `/v1/addresses/*` | [`addresses`] | Customer address book          |

pub mod addresses;
pub mod carts;
pub mod catalog;
pub mod coupons;
pub mod orders;
