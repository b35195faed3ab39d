// SPDX-License-Identifier: BUSL-1.1
//! # Store Grouping
//!
//! Partitions validated, priced line items by the store that owns each
//! product. The unit price is captured into [`PricedLine`] *before* this
//! point and frozen — nothing downstream ever re-reads the catalog price.
//!
//! Invariant: the union of all groups' lines equals the input exactly once
//! each — no duplication, no omission. Pinned by a property test below.

use std::collections::BTreeMap;

use bazaar_core::{ProductId, Quantity, StoreId};
use rust_decimal::Decimal;

/// A validated line item resolved against the catalog: the owning store
/// and the unit price frozen at validation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub store_id: StoreId,
    pub quantity: Quantity,
    pub unit_price: Decimal,
}

impl PricedLine {
    /// Line subtotal: quantity × frozen unit price.
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity.get())
    }
}

/// All of one store's lines from a single placement request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreGroup {
    pub store_id: StoreId,
    /// Sum of line subtotals, before any discount.
    pub subtotal: Decimal,
    pub lines: Vec<PricedLine>,
}

/// Partition priced lines by owning store.
///
/// Groups come back in stable store-id order; lines keep their request
/// order within each group.
pub fn group_by_store(lines: Vec<PricedLine>) -> Vec<StoreGroup> {
    let mut by_store: BTreeMap<StoreId, Vec<PricedLine>> = BTreeMap::new();
    for line in lines {
        by_store.entry(line.store_id).or_default().push(line);
    }

    by_store
        .into_iter()
        .map(|(store_id, lines)| {
            let subtotal = lines.iter().map(PricedLine::subtotal).sum();
            StoreGroup {
                store_id,
                subtotal,
                lines,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn line(store_id: StoreId, price: i64, quantity: u32) -> PricedLine {
        PricedLine {
            product_id: ProductId::new(),
            product_name: "item".into(),
            store_id,
            quantity: Quantity::new(quantity).unwrap(),
            unit_price: Decimal::from(price),
        }
    }

    #[test]
    fn single_store_yields_single_group() {
        let store = StoreId::new();
        let groups = group_by_store(vec![line(store, 10, 2), line(store, 5, 1)]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].store_id, store);
        assert_eq!(groups[0].subtotal, Decimal::from(25));
        assert_eq!(groups[0].lines.len(), 2);
    }

    #[test]
    fn two_stores_split_into_two_groups() {
        let (a, b) = (StoreId::new(), StoreId::new());
        let groups = group_by_store(vec![line(a, 70, 1), line(b, 30, 1)]);
        assert_eq!(groups.len(), 2);
        let total: Decimal = groups.iter().map(|g| g.subtotal).sum();
        assert_eq!(total, Decimal::from(100));
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(group_by_store(Vec::new()).is_empty());
    }

    #[test]
    fn lines_keep_request_order_within_a_group() {
        let store = StoreId::new();
        let first = line(store, 1, 1);
        let second = line(store, 2, 1);
        let groups = group_by_store(vec![first.clone(), second.clone()]);
        assert_eq!(groups[0].lines, vec![first, second]);
    }

    proptest! {
        /// Groups are an exact partition of the input: every line appears
        /// exactly once, and subtotals add up to the combined total.
        #[test]
        fn grouping_is_an_exact_partition(
            entries in proptest::collection::vec((0usize..4, 1i64..500, 1u32..10), 0..24)
        ) {
            // A small pool of stores so lines actually collide.
            let stores: Vec<StoreId> = (0..4).map(|_| StoreId::new()).collect();
            let input: Vec<PricedLine> = entries
                .into_iter()
                .map(|(s, price, qty)| line(stores[s], price, qty))
                .collect();

            let combined: Decimal = input.iter().map(PricedLine::subtotal).sum();
            let groups = group_by_store(input.clone());

            let mut regrouped: Vec<PricedLine> =
                groups.iter().flat_map(|g| g.lines.clone()).collect();
            let mut original = input;
            regrouped.sort_by_key(|l| l.product_id);
            original.sort_by_key(|l| l.product_id);
            prop_assert_eq!(regrouped, original);

            let group_total: Decimal = groups.iter().map(|g| g.subtotal).sum();
            prop_assert_eq!(group_total, combined);

            for group in &groups {
                prop_assert!(group.lines.iter().all(|l| l.store_id == group.store_id));
                prop_assert!(!group.lines.is_empty());
            }
        }
    }
}
