// SPDX-License-Identifier: BUSL-1.1
//! # bazaar-store — In-Memory Market Store
//!
//! The authoritative state backend for the Bazaar API: catalog, vendor
//! stores, addresses, coupons, carts, and orders, shared cheaply via
//! `Arc`. Suitable for sovereign single-node deployments and for tests;
//! the optional Postgres mirror in `bazaar-api` replays committed writes
//! for durability.
//!
//! ## Transactional writes
//!
//! All tables live behind **one** `RwLock`, not a lock per table. The
//! order-placement contract (N orders created and the cart cleared, or
//! nothing at all) needs a single critical section spanning orders *and*
//! carts; independent per-table maps cannot give that. `place_orders`
//! validates everything it depends on under the write lock before the
//! first mutation, so an aborted placement leaves the world untouched.

use std::collections::HashMap;
use std::sync::Arc;

use bazaar_checkout::{MarketStore, OrderPlan, StorageError};
use bazaar_core::{
    Address, AddressId, Cart, Coupon, CouponCode, CustomerId, Order, OrderId, Product, ProductId,
    Quantity, Store, StoreId, StoreStatus,
};
use parking_lot::RwLock;

/// All market tables. One lock guards the lot — see the module docs.
#[derive(Default)]
struct MarketData {
    stores: HashMap<StoreId, Store>,
    products: HashMap<ProductId, Product>,
    addresses: HashMap<AddressId, Address>,
    /// Keyed by normalized coupon code; codes are unique.
    coupons: HashMap<String, Coupon>,
    carts: HashMap<CustomerId, Cart>,
    orders: HashMap<OrderId, Order>,
}

/// Shared in-memory market state.
///
/// Cheaply cloneable via `Arc` — all clones share the same data.
#[derive(Clone, Default)]
pub struct InMemoryMarket {
    inner: Arc<RwLock<MarketData>>,
}

impl InMemoryMarket {
    /// Create an empty market.
    pub fn new() -> Self {
        Self::default()
    }

    // -- vendor stores -----------------------------------------------------

    /// Insert a store record.
    pub fn insert_store(&self, store: Store) {
        self.inner.write().stores.insert(store.id, store);
    }

    /// Update a store's approval status. Returns the updated record, or
    /// `None` if the store does not exist.
    pub fn set_store_status(&self, id: StoreId, status: StoreStatus) -> Option<Store> {
        let mut data = self.inner.write();
        let store = data.stores.get_mut(&id)?;
        store.status = status;
        Some(store.clone())
    }

    /// Store record by id.
    pub fn get_store(&self, id: StoreId) -> Option<Store> {
        self.inner.read().stores.get(&id).cloned()
    }

    /// All store records, in unspecified order.
    pub fn list_stores(&self) -> Vec<Store> {
        self.inner.read().stores.values().cloned().collect()
    }

    // -- products ----------------------------------------------------------

    /// Insert or replace a product.
    pub fn upsert_product(&self, product: Product) {
        self.inner.write().products.insert(product.id, product);
    }

    /// Delete a product. Returns whether it existed.
    pub fn remove_product(&self, id: ProductId) -> bool {
        self.inner.write().products.remove(&id).is_some()
    }

    /// Product by id.
    pub fn get_product(&self, id: ProductId) -> Option<Product> {
        self.inner.read().products.get(&id).cloned()
    }

    /// All products, in unspecified order.
    pub fn list_products(&self) -> Vec<Product> {
        self.inner.read().products.values().cloned().collect()
    }

    // -- addresses ---------------------------------------------------------

    /// Insert an address record.
    pub fn insert_address(&self, address: Address) {
        self.inner.write().addresses.insert(address.id, address);
    }

    /// All addresses belonging to a customer.
    pub fn addresses_for(&self, customer_id: CustomerId) -> Vec<Address> {
        self.inner
            .read()
            .addresses
            .values()
            .filter(|a| a.belongs_to(customer_id))
            .cloned()
            .collect()
    }

    // -- coupons -----------------------------------------------------------

    /// Insert a coupon. Fails if the code is already taken.
    pub fn insert_coupon(&self, coupon: Coupon) -> Result<(), StorageError> {
        let mut data = self.inner.write();
        let key = coupon.code.as_str().to_owned();
        if data.coupons.contains_key(&key) {
            return Err(StorageError::Conflict(format!(
                "coupon code already exists: {key}"
            )));
        }
        data.coupons.insert(key, coupon);
        Ok(())
    }

    /// Coupon by normalized code.
    pub fn get_coupon(&self, code: &CouponCode) -> Option<Coupon> {
        self.inner.read().coupons.get(code.as_str()).cloned()
    }

    // -- carts -------------------------------------------------------------

    /// Set one cart line; `None` removes the line. Creates the cart on
    /// first use.
    pub fn set_cart_line(
        &self,
        customer_id: CustomerId,
        product_id: ProductId,
        quantity: Option<Quantity>,
    ) {
        let mut data = self.inner.write();
        data.carts
            .entry(customer_id)
            .or_default()
            .set_line(product_id, quantity);
    }

    /// Snapshot of the customer's cart (empty if none exists yet).
    pub fn cart_of(&self, customer_id: CustomerId) -> Cart {
        self.inner
            .read()
            .carts
            .get(&customer_id)
            .cloned()
            .unwrap_or_default()
    }

    // -- orders ------------------------------------------------------------

    /// Order by id.
    pub fn get_order(&self, id: OrderId) -> Option<Order> {
        self.inner.read().orders.get(&id).cloned()
    }

    /// All orders placed by a customer, newest first.
    pub fn orders_for(&self, customer_id: CustomerId) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .inner
            .read()
            .orders
            .values()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
        orders
    }
}

impl MarketStore for InMemoryMarket {
    fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, StorageError> {
        let data = self.inner.read();
        Ok(ids
            .iter()
            .filter_map(|id| data.products.get(id).cloned())
            .collect())
    }

    fn store_by_id(&self, id: StoreId) -> Result<Option<Store>, StorageError> {
        Ok(self.get_store(id))
    }

    fn address_by_id(&self, id: AddressId) -> Result<Option<Address>, StorageError> {
        Ok(self.inner.read().addresses.get(&id).cloned())
    }

    fn coupon_by_code(&self, code: &CouponCode) -> Result<Option<Coupon>, StorageError> {
        Ok(self.get_coupon(code))
    }

    fn prior_order_count(&self, customer_id: CustomerId) -> Result<u64, StorageError> {
        Ok(self
            .inner
            .read()
            .orders
            .values()
            .filter(|o| o.customer_id == customer_id)
            .count() as u64)
    }

    /// The all-or-nothing write. Everything below the first mutation is
    /// pure verification, all of it under the single write lock:
    ///
    /// 1. every line's product must still exist (a product deleted between
    ///    validation and this point aborts the placement);
    /// 2. insert every order;
    /// 3. clear the customer's cart — strictly the last mutation.
    ///
    /// An error return means no order was inserted and the cart is
    /// byte-for-byte what it was.
    fn place_orders(&self, plan: &OrderPlan) -> Result<Vec<Order>, StorageError> {
        let mut data = self.inner.write();

        for order in &plan.orders {
            for line in &order.lines {
                if !data.products.contains_key(&line.product_id) {
                    tracing::warn!(
                        product = %line.product_id,
                        "product vanished mid-placement, aborting"
                    );
                    return Err(StorageError::Conflict(format!(
                        "product no longer exists: {}",
                        line.product_id
                    )));
                }
            }
            if data.orders.contains_key(&order.id) {
                return Err(StorageError::Conflict(format!(
                    "order id collision: {}",
                    order.id
                )));
            }
        }

        for order in &plan.orders {
            data.orders.insert(order.id, order.clone());
        }
        if let Some(cart) = data.carts.get_mut(&plan.customer_id) {
            cart.clear();
        }

        Ok(plan.orders.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_core::{OrderLine, OrderStatus, PaymentMethod};
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn approved_store(name: &str) -> Store {
        let mut store = Store::register(name).unwrap();
        store.status = StoreStatus::Approved;
        store
    }

    fn order_for(customer: CustomerId, product: &Product) -> Order {
        Order {
            id: OrderId::new(),
            customer_id: customer,
            store_id: product.store_id,
            address_id: AddressId::new(),
            total: product.unit_price,
            payment: PaymentMethod::CashOnDelivery,
            paid: false,
            status: OrderStatus::Placed,
            coupon: None,
            lines: vec![OrderLine {
                product_id: product.id,
                product_name: product.name.clone(),
                quantity: Quantity::ONE,
                unit_price: product.unit_price,
            }],
            placed_at: Utc::now(),
        }
    }

    #[test]
    fn successful_placement_commits_orders_and_clears_cart() {
        let market = InMemoryMarket::new();
        let customer = CustomerId::new();
        let store = approved_store("Copperworks");
        let product = Product::new(store.id, "Kettle", Decimal::from(40), true).unwrap();
        market.insert_store(store);
        market.upsert_product(product.clone());
        market.set_cart_line(customer, product.id, Some(Quantity::ONE));

        let plan = OrderPlan {
            customer_id: customer,
            orders: vec![order_for(customer, &product)],
        };
        let committed = market.place_orders(&plan).unwrap();

        assert_eq!(committed.len(), 1);
        assert!(market.get_order(committed[0].id).is_some());
        assert!(market.cart_of(customer).is_empty());
        assert_eq!(market.prior_order_count(customer).unwrap(), 1);
    }

    #[test]
    fn vanished_product_aborts_with_nothing_applied() {
        let market = InMemoryMarket::new();
        let customer = CustomerId::new();
        let store = approved_store("Copperworks");
        let kept = Product::new(store.id, "Kettle", Decimal::from(40), true).unwrap();
        let doomed = Product::new(store.id, "Tray", Decimal::from(15), true).unwrap();
        market.insert_store(store);
        market.upsert_product(kept.clone());
        market.upsert_product(doomed.clone());
        market.set_cart_line(customer, kept.id, Some(Quantity::ONE));
        market.set_cart_line(customer, doomed.id, Some(Quantity::ONE));
        let cart_before = market.cart_of(customer);

        // Simulate a mid-transaction catalog delete: the plan references a
        // product that no longer exists at write time.
        market.remove_product(doomed.id);
        let plan = OrderPlan {
            customer_id: customer,
            orders: vec![order_for(customer, &kept), order_for(customer, &doomed)],
        };
        let err = market.place_orders(&plan).unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));

        // Zero orders persisted, cart untouched — even the valid order
        // from the plan must not survive.
        assert_eq!(market.prior_order_count(customer).unwrap(), 0);
        assert!(market.orders_for(customer).is_empty());
        let cart_after = market.cart_of(customer);
        assert_eq!(cart_after.len(), cart_before.len());
        assert_eq!(
            cart_after.quantity_of(kept.id),
            cart_before.quantity_of(kept.id)
        );
    }

    #[test]
    fn order_lines_keep_frozen_prices_after_catalog_edits() {
        let market = InMemoryMarket::new();
        let customer = CustomerId::new();
        let store = approved_store("Copperworks");
        let mut product = Product::new(store.id, "Kettle", Decimal::from(40), true).unwrap();
        market.insert_store(store);
        market.upsert_product(product.clone());

        let plan = OrderPlan {
            customer_id: customer,
            orders: vec![order_for(customer, &product)],
        };
        let committed = market.place_orders(&plan).unwrap();

        // Reprice the product after the order committed.
        product.unit_price = Decimal::from(99);
        market.upsert_product(product.clone());

        let reread = market.get_order(committed[0].id).unwrap();
        assert_eq!(reread.lines[0].unit_price, Decimal::from(40));
    }

    #[test]
    fn duplicate_coupon_codes_are_rejected() {
        use bazaar_core::{CouponId, DiscountPercent};
        let market = InMemoryMarket::new();
        let coupon = Coupon {
            id: CouponId::new(),
            code: CouponCode::new("WELCOME5").unwrap(),
            discount: DiscountPercent::new(5).unwrap(),
            expires_at: Utc::now() + chrono::Duration::days(30),
            new_customers_only: true,
            members_only: false,
            public: true,
            created_at: Utc::now(),
        };
        market.insert_coupon(coupon.clone()).unwrap();
        let mut dupe = coupon;
        dupe.id = CouponId::new();
        assert!(market.insert_coupon(dupe).is_err());
    }

    #[test]
    fn orders_for_lists_newest_first() {
        let market = InMemoryMarket::new();
        let customer = CustomerId::new();
        let store = approved_store("Copperworks");
        let product = Product::new(store.id, "Kettle", Decimal::from(40), true).unwrap();
        market.insert_store(store);
        market.upsert_product(product.clone());

        let mut first = order_for(customer, &product);
        first.placed_at = Utc::now() - chrono::Duration::minutes(5);
        let second = order_for(customer, &product);
        market
            .place_orders(&OrderPlan {
                customer_id: customer,
                orders: vec![first],
            })
            .unwrap();
        market
            .place_orders(&OrderPlan {
                customer_id: customer,
                orders: vec![second.clone()],
            })
            .unwrap();

        let listed = market.orders_for(customer);
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
    }
}
