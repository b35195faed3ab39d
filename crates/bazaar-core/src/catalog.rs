// SPDX-License-Identifier: BUSL-1.1
//! # Catalog Records
//!
//! Products and the vendor stores that own them. A store moves through an
//! approval lifecycle; its products are orderable only while the store is
//! [`StoreStatus::Approved`]. Checkout re-checks that gate at order time —
//! approval can be withdrawn between cart-add and placement.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::{ProductId, StoreId};

/// Vendor store approval status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreStatus {
    /// Onboarding submitted, not yet reviewed. Products are not orderable.
    Pending,
    /// Approved and active. Products are orderable.
    Approved,
    /// Suspended by an administrator. Products are not orderable.
    Suspended,
}

/// A vendor store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub status: StoreStatus,
    pub created_at: DateTime<Utc>,
}

impl Store {
    /// Register a new store in the [`StoreStatus::Pending`] state.
    pub fn register(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "store name" });
        }
        Ok(Self {
            id: StoreId::new(),
            name,
            status: StoreStatus::Pending,
            created_at: Utc::now(),
        })
    }

    /// Whether this store's products may currently be ordered.
    pub fn is_orderable(&self) -> bool {
        self.status == StoreStatus::Approved
    }
}

/// A catalog product, owned by exactly one store.
///
/// `unit_price` is the price a customer would pay *right now*. Orders never
/// reference it after placement — they carry their own frozen copy in
/// [`crate::order::OrderLine`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub store_id: StoreId,
    pub name: String,
    pub unit_price: Decimal,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Create a product, rejecting negative prices and blank names.
    pub fn new(
        store_id: StoreId,
        name: impl Into<String>,
        unit_price: Decimal,
        in_stock: bool,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "product name" });
        }
        if unit_price.is_sign_negative() && !unit_price.is_zero() {
            return Err(ValidationError::NegativePrice(unit_price));
        }
        Ok(Self {
            id: ProductId::new(),
            store_id,
            name,
            unit_price,
            in_stock,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_registers_pending_and_not_orderable() {
        let store = Store::register("Spice Bazaar").unwrap();
        assert_eq!(store.status, StoreStatus::Pending);
        assert!(!store.is_orderable());
    }

    #[test]
    fn approved_store_is_orderable() {
        let mut store = Store::register("Spice Bazaar").unwrap();
        store.status = StoreStatus::Approved;
        assert!(store.is_orderable());
        store.status = StoreStatus::Suspended;
        assert!(!store.is_orderable());
    }

    #[test]
    fn store_rejects_blank_name() {
        assert!(matches!(
            Store::register("  "),
            Err(ValidationError::EmptyField { field: "store name" })
        ));
    }

    #[test]
    fn product_rejects_negative_price() {
        let store = StoreId::new();
        let err = Product::new(store, "Saffron 1g", Decimal::from(-3), true).unwrap_err();
        assert!(matches!(err, ValidationError::NegativePrice(_)));
        // Zero is a legal price (free samples, promo items).
        assert!(Product::new(store, "Sample", Decimal::ZERO, true).is_ok());
    }
}
