// SPDX-License-Identifier: BUSL-1.1
//! # Validated Domain Primitives
//!
//! Value newtypes that validate their contents at construction time.
//! Deserialization routes through the same constructors so invalid values
//! are rejected at the boundary — not silently accepted.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Helper macro to implement `Deserialize` for newtypes that must validate
/// their contents. Deserializes the raw representation, then routes through
/// the type's `new()` constructor so that invalid values are rejected at
/// deserialization time.
macro_rules! impl_validating_deserialize {
    ($ty:ident, $raw:ty) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = <$raw>::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// A line-item quantity. Always ≥ 1.
///
/// Cart mutation uses quantity 0 to mean "remove the line", but that is a
/// cart-API concern — a `Quantity` that reaches an order line is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Quantity(u32);

impl Quantity {
    /// Smallest legal quantity.
    pub const ONE: Self = Self(1);

    /// Create a quantity, rejecting zero.
    pub fn new(raw: u32) -> Result<Self, ValidationError> {
        if raw == 0 {
            return Err(ValidationError::QuantityTooSmall(raw));
        }
        Ok(Self(raw))
    }

    /// The quantity as a plain integer.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl_validating_deserialize!(Quantity, u32);

/// A coupon discount percentage. Always within 0–100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DiscountPercent(u32);

impl DiscountPercent {
    /// The zero discount.
    pub const ZERO: Self = Self(0);

    /// Create a discount percentage, rejecting values above 100.
    pub fn new(raw: u32) -> Result<Self, ValidationError> {
        if raw > 100 {
            return Err(ValidationError::DiscountOutOfRange(raw));
        }
        Ok(Self(raw))
    }

    /// The percentage as a plain integer.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for DiscountPercent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl_validating_deserialize!(DiscountPercent, u32);

/// A coupon redemption code.
///
/// Normalized on construction: surrounding whitespace is trimmed and the
/// code is uppercased, so lookup is case-insensitive by construction —
/// `summer10` and `SUMMER10` are the same code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CouponCode(String);

impl CouponCode {
    /// Create a coupon code, trimming and uppercasing the input.
    /// Rejects inputs that are empty after trimming.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let normalized = raw.into().trim().to_uppercase();
        if normalized.is_empty() {
            return Err(ValidationError::EmptyCouponCode);
        }
        Ok(Self(normalized))
    }

    /// The normalized code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CouponCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CouponCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl_validating_deserialize!(CouponCode, String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_rejects_zero() {
        assert_eq!(
            Quantity::new(0),
            Err(ValidationError::QuantityTooSmall(0))
        );
        assert_eq!(Quantity::new(1).unwrap().get(), 1);
    }

    #[test]
    fn quantity_deserialization_validates() {
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert_eq!(serde_json::from_str::<Quantity>("3").unwrap().get(), 3);
    }

    #[test]
    fn discount_rejects_over_100() {
        assert_eq!(
            DiscountPercent::new(101),
            Err(ValidationError::DiscountOutOfRange(101))
        );
        assert_eq!(DiscountPercent::new(100).unwrap().get(), 100);
        assert_eq!(DiscountPercent::ZERO.get(), 0);
    }

    #[test]
    fn coupon_code_normalizes_case_and_whitespace() {
        let a = CouponCode::new("  summer10 ").unwrap();
        let b = CouponCode::new("SUMMER10").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "SUMMER10");
    }

    #[test]
    fn coupon_code_rejects_blank() {
        assert_eq!(CouponCode::new("   "), Err(ValidationError::EmptyCouponCode));
    }

    #[test]
    fn coupon_code_deserialization_normalizes() {
        let code: CouponCode = serde_json::from_str("\"welcome5\"").unwrap();
        assert_eq!(code.as_str(), "WELCOME5");
        assert!(serde_json::from_str::<CouponCode>("\"\"").is_err());
    }
}
