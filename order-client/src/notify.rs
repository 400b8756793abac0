//! Change notifications
//!
//! Each state owner (`OrderState`, `OrderHistoryStore`) holds its own typed
//! `Notifier`. Observers register a callback and keep the returned
//! `Subscription`; dropping it unregisters the callback.
//!
//! Delivery is synchronous: `publish` invokes every callback registered at
//! that moment exactly once, on the publishing thread, before returning. A
//! panicking callback is logged and skipped, it never reaches the publisher.
//! Callbacks may themselves subscribe, unsubscribe or read the publishing
//! store, since no lock is held while they run.

use parking_lot::Mutex;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

type Callback<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct Registry<E> {
    topic: &'static str,
    next_id: AtomicU64,
    observers: Mutex<Vec<(u64, Callback<E>)>>,
}

/// Publish/subscribe point for one kind of change event
pub struct Notifier<E> {
    inner: Arc<Registry<E>>,
}

impl<E: 'static> Notifier<E> {
    /// `topic` names the event stream in logs
    pub fn new(topic: &'static str) -> Self {
        Self {
            inner: Arc::new(Registry {
                topic,
                next_id: AtomicU64::new(0),
                observers: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn topic(&self) -> &'static str {
        self.inner.topic
    }

    /// Register a callback; it stays registered while the handle lives
    #[must_use = "dropping the subscription unregisters the callback"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.observers.lock().push((id, Arc::new(callback)));

        let registry: Weak<Registry<E>> = Arc::downgrade(&self.inner);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(registry) = registry.upgrade() {
                    registry.observers.lock().retain(|(other, _)| *other != id);
                }
            })),
        }
    }

    /// Deliver `event` to every current subscriber
    pub fn publish(&self, event: &E) {
        // Snapshot so callbacks run without the lock held
        let observers: Vec<Callback<E>> = self
            .inner
            .observers
            .lock()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        for callback in observers {
            if let Err(panic_info) = catch_unwind(AssertUnwindSafe(|| callback(event))) {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    (*s).to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                tracing::error!(topic = %self.inner.topic, panic = %panic_msg, "Subscriber panicked");
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.observers.lock().len()
    }
}

/// Handle for a registered callback
///
/// Unregisters on drop, or explicitly via [`Subscription::unsubscribe`].
/// Use [`Subscription::detach`] to keep the callback for the notifier's lifetime.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }

    /// Keep the callback registered without holding the handle
    pub fn detach(mut self) {
        self.unsubscribe = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}
