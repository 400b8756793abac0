//! Current order ("bag")
//!
//! The in-progress selection of menu items. Volatile: it lives for the
//! process only and is never persisted. Every mutator publishes one
//! [`OrderChanged`] after the mutation completes and before it returns,
//! whether or not the contents actually changed.

use parking_lot::RwLock;
use shared::models::total_price;
use shared::{Decimal, MenuItem};

use crate::notify::{Notifier, Subscription};
use crate::{ClientError, ClientResult};

/// Published after every `add`, `remove_at` and `clear`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderChanged {
    /// Number of items after the mutation
    pub item_count: usize,
}

/// The shared current order
pub struct OrderState {
    items: RwLock<Vec<MenuItem>>,
    notifier: Notifier<OrderChanged>,
}

impl Default for OrderState {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderState {
    /// Create an empty order
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            notifier: Notifier::new("order_changed"),
        }
    }

    /// Append an item; the same item may appear several times
    pub fn add(&self, item: MenuItem) {
        let item_count = {
            let mut items = self.items.write();
            tracing::debug!(menu_id = item.id, name = %item.name, "Item added to order");
            items.push(item);
            items.len()
        };
        self.notifier.publish(&OrderChanged { item_count });
    }

    /// Remove the entry at `position`
    ///
    /// Fails with `IndexOutOfRange` and leaves the order untouched (and
    /// unnotified) when `position` is not an existing index.
    pub fn remove_at(&self, position: usize) -> ClientResult<MenuItem> {
        let (removed, item_count) = {
            let mut items = self.items.write();
            if position >= items.len() {
                return Err(ClientError::IndexOutOfRange {
                    index: position,
                    len: items.len(),
                });
            }
            let removed = items.remove(position);
            (removed, items.len())
        };
        tracing::debug!(menu_id = removed.id, position, "Item removed from order");
        self.notifier.publish(&OrderChanged { item_count });
        Ok(removed)
    }

    /// Empty the order
    pub fn clear(&self) {
        {
            let mut items = self.items.write();
            tracing::debug!(cleared = items.len(), "Order cleared");
            items.clear();
        }
        self.notifier.publish(&OrderChanged { item_count: 0 });
    }

    /// Copy of the current items, in insertion order
    pub fn snapshot(&self) -> Vec<MenuItem> {
        self.items.read().clone()
    }

    /// Identifiers to send to `/order`, duplicates included
    pub fn menu_ids(&self) -> Vec<i64> {
        self.items.read().iter().map(|item| item.id).collect()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Sum of current item prices
    pub fn total(&self) -> Decimal {
        total_price(self.items.read().iter())
    }

    /// Tab badge text: nothing when empty, otherwise the item count
    pub fn badge(&self) -> Option<String> {
        match self.len() {
            0 => None,
            count => Some(count.to_string()),
        }
    }

    /// Observe order changes
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&OrderChanged) + Send + Sync + 'static,
    {
        self.notifier.subscribe(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn item(id: i64, cents: i64) -> MenuItem {
        MenuItem {
            id,
            name: format!("Item {id}"),
            description: String::new(),
            price: Decimal::new(cents, 2),
            category: "entrees".to_string(),
            image_url: format!("http://localhost:8080/images/{id}.png"),
        }
    }

    fn record(order: &OrderState) -> (Arc<Mutex<Vec<OrderChanged>>>, Subscription) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let e = events.clone();
        let sub = order.subscribe(move |event| e.lock().push(*event));
        (events, sub)
    }

    enum Op {
        Add(i64),
        RemoveAt(usize),
        Clear,
    }

    #[test]
    fn test_replay_matches_reference_model() {
        let order = OrderState::new();
        let (events, _sub) = record(&order);
        let mut model: Vec<MenuItem> = Vec::new();
        let mut expected_events = 0;

        let script = [
            Op::Add(1),
            Op::Add(2),
            Op::Add(2),
            Op::RemoveAt(0),
            Op::Add(3),
            Op::RemoveAt(5),
            Op::Clear,
            Op::Clear,
            Op::Add(4),
            Op::Add(1),
            Op::RemoveAt(1),
            Op::RemoveAt(1),
        ];

        for op in script {
            match op {
                Op::Add(id) => {
                    order.add(item(id, 100));
                    model.push(item(id, 100));
                    expected_events += 1;
                }
                Op::RemoveAt(position) => {
                    let result = order.remove_at(position);
                    if position < model.len() {
                        assert_eq!(result.unwrap(), model.remove(position));
                        expected_events += 1;
                    } else {
                        assert!(matches!(
                            result,
                            Err(ClientError::IndexOutOfRange { index, len }) if index == position && len == model.len()
                        ));
                    }
                }
                Op::Clear => {
                    order.clear();
                    model.clear();
                    expected_events += 1;
                }
            }
            assert_eq!(order.snapshot(), model);
        }

        assert_eq!(events.lock().len(), expected_events);
        assert_eq!(events.lock().last().map(|e| e.item_count), Some(model.len()));
    }

    #[test]
    fn test_remove_out_of_range_leaves_order_unchanged() {
        let order = OrderState::new();
        order.add(item(1, 300));
        order.add(item(2, 450));
        let before = order.snapshot();
        let (events, _sub) = record(&order);

        assert!(order.remove_at(2).is_err());
        assert!(order.remove_at(usize::MAX).is_err());

        assert_eq!(order.snapshot(), before);
        assert!(events.lock().is_empty());
    }

    #[test]
    fn test_clear_notifies_even_when_empty() {
        let order = OrderState::new();
        let (events, _sub) = record(&order);

        order.clear();
        assert_eq!(*events.lock(), vec![OrderChanged { item_count: 0 }]);
    }

    #[test]
    fn test_snapshot_is_stable_and_independent() {
        let order = OrderState::new();
        order.add(item(1, 300));
        order.add(item(1, 300));

        let first = order.snapshot();
        let second = order.snapshot();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);

        order.clear();
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_total_badge_and_ids() {
        let order = OrderState::new();
        assert_eq!(order.badge(), None);
        assert_eq!(order.total(), Decimal::ZERO);

        order.add(item(1, 300));
        order.add(item(2, 450));
        order.add(item(1, 300));

        assert_eq!(order.badge().as_deref(), Some("3"));
        assert_eq!(order.total(), Decimal::new(1050, 2));
        assert_eq!(order.menu_ids(), vec![1, 2, 1]);
    }

    #[test]
    fn test_observer_can_read_order_during_notification() {
        let order = Arc::new(OrderState::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let o = Arc::downgrade(&order);
        let s = seen.clone();
        let _sub = order.subscribe(move |_| {
            if let Some(order) = o.upgrade() {
                s.lock().push(order.badge());
            }
        });

        order.add(item(1, 100));
        order.clear();
        assert_eq!(*seen.lock(), vec![Some("1".to_string()), None]);
    }
}
