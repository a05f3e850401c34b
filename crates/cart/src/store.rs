//! The cart store: owns the line sequence, persists every mutation, and
//! broadcasts changes to subscribers.

use rust_decimal::Decimal;
use tracing::{error, warn};

use digital_store_core::{Customizations, LineId, Product};

use crate::cart::Cart;
use crate::line::CartLine;
use crate::storage::CartStorage;

/// Handle returned by [`CartStore::subscribe`]; pass it back to
/// [`CartStore::unsubscribe`] to stop receiving updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&Cart)>;

/// Process-local owner of the shopper's in-progress order.
///
/// There is exactly one store (and one logical writer) per execution
/// context, so every mutation goes through `&mut self` and no locking is
/// needed. Subscribers receive a `&Cart` view during the mutating call;
/// they cannot re-enter the store.
///
/// Storage faults never block the shopper: a failed load seeds an empty
/// cart and a failed save keeps the in-memory mutation, both reported
/// through `tracing` rather than returned to the caller.
pub struct CartStore<S: CartStorage> {
    cart: Cart,
    storage: S,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<S: CartStorage> CartStore<S> {
    /// Open the store, seeding state from `storage`.
    ///
    /// A missing or unreadable record degrades to an empty cart; opening
    /// never fails.
    pub fn open(storage: S) -> Self {
        let cart = match storage.load() {
            Ok(lines) => Cart::from_lines(lines),
            Err(e) => {
                warn!(error = %e, "failed to load persisted cart, starting empty");
                Cart::new()
            }
        };
        Self {
            cart,
            storage,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Current cart contents.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The persistence adapter backing this store.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Sum of `unit_price * quantity` over all lines, recomputed every call.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.cart.total()
    }

    /// Sum of quantities over all lines, recomputed every call.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.cart.count()
    }

    /// Add `product` to the cart with the given customization selections.
    ///
    /// Appends a brand-new line with a fresh id and quantity 1, snapshotting
    /// the product's title, price, and image at call time. Every add creates
    /// its own line - identical product and customizations do NOT merge into
    /// an existing line. Persists and notifies.
    pub fn add(&mut self, product: &Product, customizations: Customizations) -> LineId {
        let line = CartLine::from_product(product, customizations);
        let line_id = line.line_id.clone();
        self.cart.push(line);
        self.persist_and_notify();
        line_id
    }

    /// Delete the line with `line_id`.
    ///
    /// Unknown ids are a silent no-op; nothing is persisted and nobody is
    /// notified unless a line was actually removed.
    pub fn remove(&mut self, line_id: &LineId) {
        if self.cart.remove(line_id) {
            self.persist_and_notify();
        }
    }

    /// Replace the quantity of the line with `line_id` in place.
    ///
    /// A quantity below 1 behaves exactly like [`remove`](Self::remove).
    /// Unknown ids are a silent no-op.
    pub fn set_quantity(&mut self, line_id: &LineId, quantity: i64) {
        if quantity < 1 {
            self.remove(line_id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if self.cart.set_quantity(line_id, quantity) {
            self.persist_and_notify();
        }
    }

    /// Empty the cart unconditionally. Persists and notifies even when the
    /// cart was already empty.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist_and_notify();
    }

    /// Register `callback` for change notifications.
    ///
    /// The callback fires once synchronously right here with current state,
    /// so late subscribers catch up immediately, and then again after every
    /// successful mutating operation. Delivery order is subscription order.
    pub fn subscribe(&mut self, mut callback: impl FnMut(&Cart) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        callback(&self.cart);
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Drop a subscriber. Unknown handles are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sid, _)| *sid != id);
    }

    /// Persist the current line sequence, then notify subscribers.
    ///
    /// Optimistic: a storage fault never rolls back the in-memory cart or
    /// suppresses notifications; the shopper keeps working with best-known
    /// state while the fault is reported.
    fn persist_and_notify(&mut self) {
        if let Err(e) = self.storage.save(self.cart.lines()) {
            error!(error = %e, "failed to persist cart, continuing with in-memory state");
        }
        for (_, callback) in &mut self.subscribers {
            callback(&self.cart);
        }
    }
}

impl<S: CartStorage + std::fmt::Debug> std::fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("storage", &self.storage)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use digital_store_core::{CustomizationValue, ProductId};

    use super::*;
    use crate::storage::MemoryStorage;

    fn mug() -> Product {
        Product {
            id: ProductId::new("p1"),
            title: "Mug".to_string(),
            description: String::new(),
            price: Decimal::new(999, 2),
            image_url: String::new(),
            customizations: Vec::new(),
        }
    }

    fn tee() -> Product {
        Product {
            id: ProductId::new("p2"),
            title: "Tee".to_string(),
            description: String::new(),
            price: Decimal::new(1950, 2),
            image_url: String::new(),
            customizations: Vec::new(),
        }
    }

    #[test]
    fn test_add_appends_distinct_lines() {
        let mut store = CartStore::open(MemoryStorage::new());
        let first = store.add(&mug(), Customizations::new());
        let second = store.add(&mug(), Customizations::new());

        // Identical product and customizations still produce two lines
        assert_ne!(first, second);
        assert_eq!(store.cart().lines().len(), 2);
        assert_eq!(store.count(), 2);
        assert_eq!(store.total(), Decimal::new(1998, 2));
    }

    #[test]
    fn test_identical_adds_stay_separate_lines() {
        let mut customizations = Customizations::new();
        customizations.insert("Gift wrap".to_string(), CustomizationValue::Flag(true));

        let mut store = CartStore::open(MemoryStorage::new());
        store.add(&mug(), customizations.clone());
        store.add(&mug(), customizations);

        assert_eq!(store.cart().lines().len(), 2);
        assert!(
            store
                .cart()
                .lines()
                .iter()
                .all(|line| line.quantity == 1)
        );
    }

    #[test]
    fn test_set_quantity_below_one_removes() {
        let mut store = CartStore::open(MemoryStorage::new());
        let zero = store.add(&mug(), Customizations::new());
        let negative = store.add(&mug(), Customizations::new());

        store.set_quantity(&zero, 0);
        store.set_quantity(&negative, -1);

        assert_eq!(store.count(), 0);
        assert_eq!(store.total(), Decimal::ZERO);
    }

    #[test]
    fn test_unknown_line_id_is_a_no_op() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add(&mug(), Customizations::new());

        let notified = Rc::new(RefCell::new(0_u32));
        let seen = Rc::clone(&notified);
        store.subscribe(move |_| *seen.borrow_mut() += 1);

        store.remove(&LineId::new("missing"));
        store.set_quantity(&LineId::new("missing"), 5);

        assert_eq!(store.count(), 1);
        // Only the immediate subscribe call fired
        assert_eq!(*notified.borrow(), 1);
    }

    #[test]
    fn test_clear_persists_empty_record() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add(&mug(), Customizations::new());
        store.add(&tee(), Customizations::new());
        store.clear();

        assert_eq!(store.count(), 0);
        assert_eq!(store.total(), Decimal::ZERO);

        let raw = store.storage().record().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["lines"], serde_json::json!([]));
    }

    #[test]
    fn test_mug_scenario() {
        // The concrete walkthrough: 9.99 -> 19.98 -> 39.96 -> 29.97 -> 0
        let mut store = CartStore::open(MemoryStorage::new());

        let line1 = store.add(&mug(), Customizations::new());
        assert_eq!(store.count(), 1);
        assert_eq!(store.total(), Decimal::new(999, 2));

        let line2 = store.add(&mug(), Customizations::new());
        assert_eq!(store.count(), 2);
        assert_eq!(store.total(), Decimal::new(1998, 2));
        assert_ne!(line1, line2);

        store.set_quantity(&line1, 3);
        assert_eq!(store.count(), 4);
        assert_eq!(store.total(), Decimal::new(3996, 2));

        store.remove(&line2);
        assert_eq!(store.count(), 3);
        assert_eq!(store.total(), Decimal::new(2997, 2));

        store.clear();
        assert_eq!(store.count(), 0);
        assert_eq!(store.total(), Decimal::ZERO);
    }

    #[test]
    fn test_round_trip_through_storage() {
        let storage = MemoryStorage::new();
        let record;
        {
            let mut store = CartStore::open(storage);
            store.add(&mug(), Customizations::new());
            store.add(&tee(), Customizations::new());
            record = store.storage().record().unwrap();
        }

        let reopened_storage = MemoryStorage::new();
        reopened_storage.set_record(record);
        let reopened = CartStore::open(reopened_storage);

        assert_eq!(reopened.cart().lines().len(), 2);
        assert_eq!(reopened.count(), 2);
        assert_eq!(reopened.total(), Decimal::new(2949, 2));
        let titles: Vec<_> = reopened
            .cart()
            .lines()
            .iter()
            .map(|line| line.title.as_str())
            .collect();
        assert_eq!(titles, ["Mug", "Tee"]);
    }

    #[test]
    fn test_corrupt_record_degrades_to_empty() {
        let storage = MemoryStorage::new();
        storage.set_record("{definitely not a cart");
        let store = CartStore::open(storage);
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_failed_save_keeps_state_and_notifies() {
        let mut store = CartStore::open(MemoryStorage::new());

        let notified = Rc::new(RefCell::new(0_u32));
        let seen = Rc::clone(&notified);
        store.subscribe(move |_| *seen.borrow_mut() += 1);

        store.storage().fail_saves(true);
        store.add(&mug(), Customizations::new());

        // In-memory mutation stands and subscribers still heard about it
        assert_eq!(store.count(), 1);
        assert_eq!(*notified.borrow(), 2);
        assert!(store.storage().record().is_none());
    }

    #[test]
    fn test_subscriber_cadence_and_order() {
        let mut store = CartStore::open(MemoryStorage::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        let first_log = Rc::clone(&log);
        store.subscribe(move |cart| first_log.borrow_mut().push(("first", cart.count())));
        let second_log = Rc::clone(&log);
        store.subscribe(move |cart| second_log.borrow_mut().push(("second", cart.count())));

        store.add(&mug(), Customizations::new());

        assert_eq!(
            *log.borrow(),
            vec![
                ("first", 0),  // immediate call at subscribe time
                ("second", 0), // immediate call at subscribe time
                ("first", 1),  // after add, in subscription order
                ("second", 1),
            ]
        );
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut store = CartStore::open(MemoryStorage::new());
        let notified = Rc::new(RefCell::new(0_u32));

        let seen = Rc::clone(&notified);
        let id = store.subscribe(move |_| *seen.borrow_mut() += 1);
        assert_eq!(*notified.borrow(), 1);

        store.unsubscribe(id);
        store.add(&mug(), Customizations::new());
        assert_eq!(*notified.borrow(), 1);
    }
}
