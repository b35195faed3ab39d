// SPDX-License-Identifier: BUSL-1.1
//! # bazaar-checkout — Multi-Vendor Order Placement
//!
//! The one workflow in the marketplace with genuine multi-step invariants:
//! placing an order whose items span several vendor stores.
//!
//! ## Pipeline
//!
//! ```text
//! PlaceOrderRequest
//!   → validate (address ownership, non-empty, resolvable, purchasable)
//!   → group by owning store (exact partition, prices frozen here)
//!   → evaluate coupon (silent degradation, even split across stores)
//!   → assemble OrderPlan (one order per store, totals floored at zero)
//!   → MarketStore::place_orders (single critical section:
//!         all orders created + cart cleared, or nothing at all)
//! ```
//!
//! Validation failures are reported before anything is written; failures
//! inside the transactional write roll back completely — a response never
//! implies partial success. Coupon invalidity is not a failure at all: a
//! stale or mistyped promo code degrades to "no discount" rather than
//! blocking checkout.
//!
//! The workflow is expressed over the [`MarketStore`] trait so the same
//! service runs against the in-memory market (`bazaar-store`) in tests and
//! production alike.

pub mod confirmation;
pub mod coupon;
pub mod error;
pub mod grouping;
pub mod plan;
pub mod request;
pub mod service;

pub use confirmation::OrderConfirmation;
pub use coupon::{evaluate_coupon, split_discount, CouponDecision};
pub use error::{CheckoutError, StorageError};
pub use grouping::{group_by_store, PricedLine, StoreGroup};
pub use plan::OrderPlan;
pub use request::{LineRequest, PlaceOrderRequest};
pub use service::{CheckoutService, MarketStore, PlacementOutcome};
