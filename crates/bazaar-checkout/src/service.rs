// SPDX-License-Identifier: BUSL-1.1
//! # Checkout Service
//!
//! Orchestrates the placement pipeline over a [`MarketStore`]: validate →
//! group → evaluate coupon → assemble plan → transactional write. All
//! validation happens on snapshots read up front; the store re-verifies
//! existence inside its critical section, so nothing is ever half-written.

use std::collections::{BTreeSet, HashMap};

use bazaar_core::{Address, Coupon, CouponCode, CustomerId, Order, Product, ProductId, Store, StoreId};
use chrono::{DateTime, Utc};

use crate::confirmation::OrderConfirmation;
use crate::coupon::evaluate_coupon;
use crate::error::{CheckoutError, StorageError};
use crate::grouping::{group_by_store, PricedLine};
use crate::plan::OrderPlan;
use crate::request::PlaceOrderRequest;

/// Storage contract consumed by the checkout workflow.
///
/// Read methods return point-in-time snapshots. [`place_orders`] is the
/// one write: it must create every order in the plan *and* clear the
/// customer's cart in a single all-or-nothing step — on any error, no
/// order exists and the cart is untouched.
///
/// [`place_orders`]: MarketStore::place_orders
pub trait MarketStore {
    /// Products for the given ids; ids with no record are simply absent
    /// from the result.
    fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, StorageError>;

    /// Store record by id, if it exists.
    fn store_by_id(&self, id: StoreId) -> Result<Option<Store>, StorageError>;

    /// The address, if it exists. Ownership is checked by the caller.
    fn address_by_id(&self, id: bazaar_core::AddressId) -> Result<Option<Address>, StorageError>;

    /// Coupon by normalized code, if one exists.
    fn coupon_by_code(&self, code: &CouponCode) -> Result<Option<Coupon>, StorageError>;

    /// How many orders this customer has placed before.
    fn prior_order_count(&self, customer_id: CustomerId) -> Result<u64, StorageError>;

    /// Atomically create every order in the plan and clear the customer's
    /// cart. Returns the committed orders.
    fn place_orders(&self, plan: &OrderPlan) -> Result<Vec<Order>, StorageError>;
}

/// Result of a successful placement: the committed orders plus the
/// confirmation events to dispatch after the response is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementOutcome {
    pub orders: Vec<Order>,
    pub confirmations: Vec<OrderConfirmation>,
}

/// The order placement workflow over a [`MarketStore`].
#[derive(Debug, Clone)]
pub struct CheckoutService<S> {
    store: S,
}

impl<S: MarketStore> CheckoutService<S> {
    /// Wrap a market store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Place an order for an authenticated customer.
    ///
    /// `now` is explicit so coupon expiry is decidable in tests without an
    /// ambient clock. Checks run in a fixed order, each with its own
    /// [`CheckoutError`]; the transactional write happens only after every
    /// check passes.
    pub fn place_order(
        &self,
        customer_id: CustomerId,
        request: &PlaceOrderRequest,
        now: DateTime<Utc>,
    ) -> Result<PlacementOutcome, CheckoutError> {
        // Address must exist and belong to the requesting customer.
        let owned = self
            .store
            .address_by_id(request.address_id)
            .map_err(storage)?
            .map(|a| a.belongs_to(customer_id))
            .unwrap_or(false);
        if !owned {
            return Err(CheckoutError::InvalidAddress);
        }

        if request.items.is_empty() {
            return Err(CheckoutError::EmptyOrder);
        }

        // Resolve every product; the first unresolvable id is named.
        let ids: Vec<ProductId> = request.items.iter().map(|l| l.product_id).collect();
        let products: HashMap<ProductId, Product> = self
            .store
            .products_by_ids(&ids)
            .map_err(storage)?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();
        for line in &request.items {
            if !products.contains_key(&line.product_id) {
                return Err(CheckoutError::ProductNotFound(line.product_id));
            }
        }

        // Purchasability: in stock, and the owning store approved. Store
        // approval is re-checked here even though cart-add already gated
        // it — approval can be withdrawn in between.
        let store_ids: BTreeSet<StoreId> = products.values().map(|p| p.store_id).collect();
        let mut orderable: HashMap<StoreId, bool> = HashMap::new();
        for store_id in store_ids {
            let ok = self
                .store
                .store_by_id(store_id)
                .map_err(storage)?
                .map(|s| s.is_orderable())
                .unwrap_or(false);
            orderable.insert(store_id, ok);
        }
        for line in &request.items {
            let product = &products[&line.product_id];
            let store_ok = orderable.get(&product.store_id).copied().unwrap_or(false);
            if !product.in_stock || !store_ok {
                return Err(CheckoutError::OutOfStock(line.product_id));
            }
        }

        // Freeze prices and partition by store.
        let priced: Vec<PricedLine> = request
            .items
            .iter()
            .map(|line| {
                let product = &products[&line.product_id];
                PricedLine {
                    product_id: product.id,
                    product_name: product.name.clone(),
                    store_id: product.store_id,
                    quantity: line.quantity,
                    unit_price: product.unit_price,
                }
            })
            .collect();
        let groups = group_by_store(priced);

        // Coupon decision. Unknown or ineligible codes degrade silently.
        let decision = match &request.coupon_code {
            Some(code) => {
                let coupon = self.store.coupon_by_code(code).map_err(storage)?;
                let prior = self.store.prior_order_count(customer_id).map_err(storage)?;
                evaluate_coupon(coupon.as_ref(), prior, now)
            }
            None => evaluate_coupon(None, 0, now),
        };

        let plan = OrderPlan::assemble(
            customer_id,
            request.address_id,
            request.payment,
            groups,
            &decision,
            now,
        );

        let orders = self.store.place_orders(&plan).map_err(storage)?;
        tracing::info!(
            customer = %customer_id,
            orders = orders.len(),
            coupon = decision.snapshot.as_ref().map(|s| s.code.as_str()),
            "order placed"
        );

        let confirmations = orders.iter().map(OrderConfirmation::from).collect();
        Ok(PlacementOutcome {
            orders,
            confirmations,
        })
    }
}

/// Storage failures reach the caller as the retryable kind: by the store
/// contract nothing was written.
fn storage(err: StorageError) -> CheckoutError {
    tracing::warn!(error = %err, "storage failure during checkout");
    CheckoutError::TransientFailure(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::LineRequest;
    use bazaar_core::{
        AddressId, CouponId, DiscountPercent, PaymentMethod, Quantity, StoreStatus,
    };
    use chrono::Duration;
    use rust_decimal::Decimal;
    use std::cell::RefCell;

    /// Snapshot-backed fake store. Reads come from plain maps; the write
    /// records the plan so tests can observe what would be committed.
    #[derive(Default)]
    struct FakeStore {
        products: Vec<Product>,
        stores: Vec<Store>,
        addresses: Vec<Address>,
        coupons: Vec<Coupon>,
        prior_orders: u64,
        fail_write: bool,
        committed: RefCell<Vec<OrderPlan>>,
    }

    impl MarketStore for FakeStore {
        fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, StorageError> {
            Ok(self
                .products
                .iter()
                .filter(|p| ids.contains(&p.id))
                .cloned()
                .collect())
        }

        fn store_by_id(&self, id: StoreId) -> Result<Option<Store>, StorageError> {
            Ok(self.stores.iter().find(|s| s.id == id).cloned())
        }

        fn address_by_id(&self, id: AddressId) -> Result<Option<Address>, StorageError> {
            Ok(self.addresses.iter().find(|a| a.id == id).cloned())
        }

        fn coupon_by_code(&self, code: &CouponCode) -> Result<Option<Coupon>, StorageError> {
            Ok(self.coupons.iter().find(|c| &c.code == code).cloned())
        }

        fn prior_order_count(&self, _customer_id: CustomerId) -> Result<u64, StorageError> {
            Ok(self.prior_orders)
        }

        fn place_orders(&self, plan: &OrderPlan) -> Result<Vec<Order>, StorageError> {
            if self.fail_write {
                return Err(StorageError::Unavailable("injected failure".into()));
            }
            self.committed.borrow_mut().push(plan.clone());
            Ok(plan.orders.clone())
        }
    }

    struct Fixture {
        customer: CustomerId,
        address: AddressId,
        product_a: ProductId,
        product_b: ProductId,
        store: FakeStore,
    }

    /// Two approved stores, one in-stock product each ($70 and $30).
    fn fixture() -> Fixture {
        let customer = CustomerId::new();
        let mut store_a = Store::register("North Loom").unwrap();
        store_a.status = StoreStatus::Approved;
        let mut store_b = Store::register("South Loom").unwrap();
        store_b.status = StoreStatus::Approved;

        let product_a =
            Product::new(store_a.id, "Wool Throw", Decimal::from(70), true).unwrap();
        let product_b =
            Product::new(store_b.id, "Cotton Scarf", Decimal::from(30), true).unwrap();

        let address = Address {
            id: AddressId::new(),
            customer_id: customer,
            line1: "5 Harbor Road".into(),
            line2: None,
            city: "Lahore".into(),
            region: None,
            postal_code: "54000".into(),
            country: "PK".into(),
            created_at: Utc::now(),
        };

        Fixture {
            customer,
            address: address.id,
            product_a: product_a.id,
            product_b: product_b.id,
            store: FakeStore {
                products: vec![product_a, product_b],
                stores: vec![store_a, store_b],
                addresses: vec![address],
                ..FakeStore::default()
            },
        }
    }

    fn request(fx: &Fixture) -> PlaceOrderRequest {
        PlaceOrderRequest {
            address_id: fx.address,
            payment: PaymentMethod::CashOnDelivery,
            coupon_code: None,
            items: vec![
                LineRequest {
                    product_id: fx.product_a,
                    quantity: Quantity::ONE,
                },
                LineRequest {
                    product_id: fx.product_b,
                    quantity: Quantity::ONE,
                },
            ],
        }
    }

    #[test]
    fn two_store_cart_fans_out_to_two_orders() {
        let fx = fixture();
        let req = request(&fx);
        let customer = fx.customer;
        let service = CheckoutService::new(fx.store);
        let outcome = service.place_order(customer, &req, Utc::now()).unwrap();
        assert_eq!(outcome.orders.len(), 2);
        assert_eq!(outcome.confirmations.len(), 2);
        let total: Decimal = outcome.orders.iter().map(|o| o.total).sum();
        assert_eq!(total, Decimal::from(100));
    }

    #[test]
    fn foreign_address_is_rejected_before_anything_else() {
        let fx = fixture();
        let req = request(&fx);
        let service = CheckoutService::new(fx.store);
        let err = service
            .place_order(CustomerId::new(), &req, Utc::now())
            .unwrap_err();
        assert_eq!(err, CheckoutError::InvalidAddress);
    }

    #[test]
    fn empty_item_list_is_rejected() {
        let fx = fixture();
        let mut req = request(&fx);
        req.items.clear();
        let customer = fx.customer;
        let service = CheckoutService::new(fx.store);
        assert_eq!(
            service.place_order(customer, &req, Utc::now()),
            Err(CheckoutError::EmptyOrder)
        );
    }

    #[test]
    fn unknown_product_is_named() {
        let fx = fixture();
        let ghost = ProductId::new();
        let mut req = request(&fx);
        req.items.push(LineRequest {
            product_id: ghost,
            quantity: Quantity::ONE,
        });
        let customer = fx.customer;
        let service = CheckoutService::new(fx.store);
        assert_eq!(
            service.place_order(customer, &req, Utc::now()),
            Err(CheckoutError::ProductNotFound(ghost))
        );
    }

    #[test]
    fn out_of_stock_product_blocks_the_whole_request() {
        let mut fx = fixture();
        let b = fx.product_b;
        fx.store
            .products
            .iter_mut()
            .find(|p| p.id == b)
            .unwrap()
            .in_stock = false;
        let req = request(&fx);
        let customer = fx.customer;
        let store = fx.store;
        let service = CheckoutService::new(store);
        let err = service.place_order(customer, &req, Utc::now()).unwrap_err();
        // Product A was perfectly valid, yet nothing is created.
        assert_eq!(err, CheckoutError::OutOfStock(b));
    }

    #[test]
    fn suspended_store_blocks_its_products_at_order_time() {
        let mut fx = fixture();
        let a = fx.product_a;
        fx.store.stores[0].status = StoreStatus::Suspended;
        let req = request(&fx);
        let customer = fx.customer;
        let service = CheckoutService::new(fx.store);
        assert_eq!(
            service.place_order(customer, &req, Utc::now()),
            Err(CheckoutError::OutOfStock(a))
        );
    }

    #[test]
    fn unknown_coupon_code_degrades_to_full_price() {
        let fx = fixture();
        let mut req = request(&fx);
        req.coupon_code = Some(CouponCode::new("NOSUCH").unwrap());
        let customer = fx.customer;
        let service = CheckoutService::new(fx.store);
        let outcome = service.place_order(customer, &req, Utc::now()).unwrap();
        let total: Decimal = outcome.orders.iter().map(|o| o.total).sum();
        assert_eq!(total, Decimal::from(100));
        assert!(outcome.orders.iter().all(|o| o.coupon.is_none()));
    }

    #[test]
    fn ten_percent_coupon_splits_evenly_across_stores() {
        let mut fx = fixture();
        fx.store.coupons.push(Coupon {
            id: CouponId::new(),
            code: CouponCode::new("SUMMER10").unwrap(),
            discount: DiscountPercent::new(10).unwrap(),
            expires_at: Utc::now() + Duration::days(1),
            new_customers_only: false,
            members_only: false,
            public: true,
            created_at: Utc::now(),
        });
        let mut req = request(&fx);
        req.coupon_code = Some(CouponCode::new("summer10").unwrap());
        let customer = fx.customer;
        let (pa, pb) = (fx.product_a, fx.product_b);
        let service = CheckoutService::new(fx.store);
        let outcome = service.place_order(customer, &req, Utc::now()).unwrap();

        // $70 − $5 and $30 − $5: even split, not proportional.
        let order_for = |pid: ProductId| {
            outcome
                .orders
                .iter()
                .find(|o| o.lines.iter().any(|l| l.product_id == pid))
                .unwrap()
        };
        assert_eq!(order_for(pa).total, Decimal::from(65));
        assert_eq!(order_for(pb).total, Decimal::from(25));
        assert!(outcome.orders.iter().all(|o| o.coupon.is_some()));
    }

    #[test]
    fn storage_failure_surfaces_as_retryable_transient() {
        let mut fx = fixture();
        fx.store.fail_write = true;
        let req = request(&fx);
        let customer = fx.customer;
        let service = CheckoutService::new(fx.store);
        let err = service.place_order(customer, &req, Utc::now()).unwrap_err();
        assert!(err.is_retryable(), "write failures must be retryable: {err:?}");
    }

    #[test]
    fn unit_prices_are_frozen_from_the_catalog_snapshot() {
        let fx = fixture();
        let req = request(&fx);
        let customer = fx.customer;
        let pa = fx.product_a;
        let service = CheckoutService::new(fx.store);
        let outcome = service.place_order(customer, &req, Utc::now()).unwrap();
        let line = outcome
            .orders
            .iter()
            .flat_map(|o| &o.lines)
            .find(|l| l.product_id == pa)
            .unwrap();
        assert_eq!(line.unit_price, Decimal::from(70));
        assert_eq!(line.product_name, "Wool Throw");
    }
}
