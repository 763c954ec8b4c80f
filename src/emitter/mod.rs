//! Change-event feed backed by `event_emitter_rs`.
//!
//! Mutations enqueue a [`StoreEvent`]; once the commit has recomputed every
//! view and notified selector subscribers, the queue is drained and each event
//! is emitted under its type name with a JSON payload.
//!
//! ```ignore
//! let mut store = RecipeStore::new();
//! store.on(StoreEvent::RECIPE_ADDED, |payload: String| {
//!     println!("added: {}", payload);
//! });
//! store.add_recipe(Recipe::new(1, "Pasta", "Tomato"))?;
//! ```
//!
//! The underlying emitter runs listeners on their own threads, so delivery is
//! asynchronous with respect to the mutation that produced the event.

use std::fmt;

use event_emitter_rs::EventEmitter;

use crate::StoreEvent;

pub struct ChangeEmitter {
    event_emitter: EventEmitter,
    events_to_emit: Vec<StoreEvent>,
}

impl fmt::Debug for ChangeEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeEmitter")
            .field("events_to_emit", &self.events_to_emit)
            .finish()
    }
}

impl Default for ChangeEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeEmitter {
    pub fn new() -> Self {
        Self {
            event_emitter: EventEmitter::new(),
            events_to_emit: Vec::new(),
        }
    }

    /// Register a listener for an event type. Returns the listener id.
    pub fn on<F>(&mut self, event_type: &str, listener: F) -> String
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.event_emitter.on(event_type, listener)
    }

    /// Returns false if no listener had this id.
    pub fn remove_listener(&mut self, listener_id: &str) -> bool {
        self.event_emitter.remove_listener(listener_id).is_some()
    }

    /// Queue an event to be emitted after the current commit.
    pub fn enqueue(&mut self, event: StoreEvent) {
        self.events_to_emit.push(event);
    }

    /// Emit all queued events, in the order they were queued.
    pub fn emit_queued(&mut self) {
        let events: Vec<_> = self.events_to_emit.drain(..).collect();
        for event in events {
            match serde_json::to_string(&event) {
                Ok(payload) => {
                    self.event_emitter.emit(event.event_type(), payload);
                }
                Err(err) => {
                    tracing::warn!(event = event.event_type(), %err, "dropping unserializable store event");
                }
            }
        }
    }

    /// Number of events waiting for the next emit.
    pub fn queued_len(&self) -> usize {
        self.events_to_emit.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn enqueue_and_emit() {
        let mut emitter = ChangeEmitter::new();
        let (tx, rx) = mpsc::channel::<String>();
        let tx = std::sync::Mutex::new(tx);

        emitter.on(StoreEvent::FAVORITE_ADDED, move |payload: String| {
            tx.lock().unwrap().send(payload).unwrap();
        });

        emitter.enqueue(StoreEvent::FavoriteAdded { id: 5 });
        assert_eq!(emitter.queued_len(), 1);

        emitter.emit_queued();
        assert_eq!(emitter.queued_len(), 0);

        // EventEmitter delivers on a spawned thread
        let payload = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        let event: StoreEvent = serde_json::from_str(&payload).unwrap();
        assert_eq!(event, StoreEvent::FavoriteAdded { id: 5 });
    }

    #[test]
    fn removed_listener_is_reported() {
        let mut emitter = ChangeEmitter::new();
        let id = emitter.on(StoreEvent::RECIPES_SET, |_payload: String| {});
        assert!(emitter.remove_listener(&id));
        assert!(!emitter.remove_listener(&id));
    }
}
