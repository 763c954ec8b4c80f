//! Selector-based subscriptions.
//!
//! A subscription pairs a pure selector over [`StoreState`] with a listener.
//! The registry remembers the last value each selector produced and, after a
//! commit, hands back a [`Delivery`] only for listeners whose selected value
//! differs from the remembered one. A consumer that selects the filtered view
//! is therefore not woken by favorite changes, and vice versa.
//!
//! Deliveries own a copy of the selected value, so the caller decides when to
//! run them: [`RecipeStore`](crate::RecipeStore) runs them at once, while
//! [`SharedRecipeStore`](crate::SharedRecipeStore) runs them after its lock
//! is released.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::store::StoreState;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subscription-{}", self.0)
    }
}

/// A pending listener call carrying the newly selected value.
pub struct Delivery {
    id: SubscriptionId,
    call: Box<dyn FnOnce() + Send>,
}

impl Delivery {
    pub fn subscription(&self) -> SubscriptionId {
        self.id
    }

    /// Call the listener.
    pub fn deliver(self) {
        tracing::trace!(subscription = %self.id, "delivering selected value");
        (self.call)()
    }
}

impl fmt::Debug for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delivery").field("id", &self.id).finish()
    }
}

trait Watch: Send {
    /// Re-run the selector; returns the listener call if the value changed.
    fn check(&mut self, id: SubscriptionId, state: &StoreState) -> Option<Delivery>;
}

struct Selection<T, S, L> {
    selector: S,
    last: Arc<T>,
    listener: Arc<Mutex<L>>,
}

impl<T, S, L> Watch for Selection<T, S, L>
where
    T: PartialEq + Send + Sync + 'static,
    S: Fn(&StoreState) -> T + Send + 'static,
    L: FnMut(&T) + Send + 'static,
{
    fn check(&mut self, id: SubscriptionId, state: &StoreState) -> Option<Delivery> {
        let next = (self.selector)(state);
        if next == *self.last {
            return None;
        }
        let value = Arc::new(next);
        self.last = Arc::clone(&value);
        let listener = Arc::clone(&self.listener);
        Some(Delivery {
            id,
            call: Box::new(move || match listener.lock() {
                Ok(mut listener) => (*listener)(value.as_ref()),
                Err(_) => tracing::warn!(subscription = %id, "listener poisoned, skipping"),
            }),
        })
    }
}

/// Registry of selector subscriptions, notified in subscription order.
#[derive(Default)]
pub struct Subscriptions {
    next_id: u64,
    entries: Vec<(SubscriptionId, Box<dyn Watch>)>,
}

impl fmt::Debug for Subscriptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriptions")
            .field("next_id", &self.next_id)
            .field("subscribers", &self.entries.len())
            .finish()
    }
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. The selector is evaluated once against `state` to
    /// seed the remembered value; the listener is not called for it.
    pub fn subscribe<T, S, L>(
        &mut self,
        state: &StoreState,
        selector: S,
        listener: L,
    ) -> SubscriptionId
    where
        T: PartialEq + Send + Sync + 'static,
        S: Fn(&StoreState) -> T + Send + 'static,
        L: FnMut(&T) + Send + 'static,
    {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        let last = Arc::new(selector(state));
        self.entries.push((
            id,
            Box::new(Selection {
                selector,
                last,
                listener: Arc::new(Mutex::new(listener)),
            }),
        ));
        id
    }

    /// Returns false if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(existing, _)| *existing != id);
        self.entries.len() != before
    }

    /// Re-evaluate every selector against `state` and collect the listener
    /// calls for the values that changed. Nothing is called yet.
    pub fn notify(&mut self, state: &StoreState) -> Vec<Delivery> {
        self.entries
            .iter_mut()
            .filter_map(|(id, watch)| watch.check(*id, state))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
