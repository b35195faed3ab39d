// SPDX-License-Identifier: BUSL-1.1
//! # Customer Records
//!
//! Delivery addresses and the per-customer cart. The cart is a plain
//! `product → quantity` mapping; checkout reads it, and the transactional
//! order write clears it as the final mutation of a successful placement.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::{AddressId, CustomerId, ProductId};
use crate::primitives::Quantity;

/// A customer delivery address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub id: AddressId,
    pub customer_id: CustomerId,
    pub line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub postal_code: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
}

impl Address {
    /// Whether this address belongs to the given customer.
    pub fn belongs_to(&self, customer_id: CustomerId) -> bool {
        self.customer_id == customer_id
    }
}

/// A customer's cart: product → quantity.
///
/// `BTreeMap` keeps iteration order stable, which keeps responses and
/// persisted rows deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    items: BTreeMap<ProductId, Quantity>,
}

impl Cart {
    /// An empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a line to the given quantity; `None` removes the line.
    pub fn set_line(&mut self, product_id: ProductId, quantity: Option<Quantity>) {
        match quantity {
            Some(q) => {
                self.items.insert(product_id, q);
            }
            None => {
                self.items.remove(&product_id);
            }
        }
    }

    /// Quantity for a product, if present.
    pub fn quantity_of(&self, product_id: ProductId) -> Option<Quantity> {
        self.items.get(&product_id).copied()
    }

    /// Iterate lines in stable product order.
    pub fn lines(&self) -> impl Iterator<Item = (ProductId, Quantity)> + '_ {
        self.items.iter().map(|(id, q)| (*id, *q))
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
