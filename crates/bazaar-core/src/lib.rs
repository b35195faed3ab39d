// SPDX-License-Identifier: BUSL-1.1
//! # bazaar-core — Foundational Marketplace Types
//!
//! Domain types shared across the Bazaar stack. Nothing in this crate
//! performs I/O; everything is plain data plus the invariants that make
//! the data safe to pass around:
//!
//! - **Identifiers** ([`identity`]): one newtype per entity kind — you
//!   cannot pass a [`ProductId`] where a [`StoreId`] is expected.
//! - **Validated primitives** ([`primitives`]): [`Quantity`] (≥ 1),
//!   [`DiscountPercent`] (0–100), [`CouponCode`] (trimmed, uppercased,
//!   non-empty). Invalid values are unrepresentable after construction.
//! - **Catalog records** ([`catalog`]): products and vendor stores with
//!   the approval lifecycle that gates orderability.
//! - **Customer records** ([`customer`]): delivery addresses and carts.
//! - **Coupons** ([`coupon`]): admin-created discount records and the
//!   by-value snapshot embedded into orders.
//! - **Orders** ([`order`]): the order record, frozen order lines, payment
//!   methods, and the `Placed → Processing → Shipped → Delivered` status
//!   machine with `Cancelled` reachable from any pre-delivery state.

pub mod catalog;
pub mod coupon;
pub mod customer;
pub mod error;
pub mod identity;
pub mod order;
pub mod primitives;

pub use catalog::{Product, Store, StoreStatus};
pub use coupon::{Coupon, CouponSnapshot};
pub use customer::{Address, Cart};
pub use error::ValidationError;
pub use identity::{AddressId, CouponId, CustomerId, OrderId, ProductId, StoreId};
pub use order::{Order, OrderError, OrderLine, OrderStatus, PaymentMethod};
pub use primitives::{CouponCode, DiscountPercent, Quantity};
