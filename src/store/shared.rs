use std::sync::{Arc, Mutex};

use crate::StoreError;

use super::{RecipeStore, StoreSnapshot, StoreState};

/// Cloneable handle to one [`RecipeStore`] shared between threads.
///
/// All access goes through a single mutex, so writes are serialized and a
/// reader always sees the state between two whole commits. Clones share the
/// same store.
///
/// Subscription listeners fired by a write run after the lock is released, on
/// the writing thread, so they may call [`SharedRecipeStore::read`] or
/// [`SharedRecipeStore::write`] on a clone of the handle.
#[derive(Debug, Clone)]
pub struct SharedRecipeStore {
    inner: Arc<Mutex<RecipeStore>>,
}

impl Default for SharedRecipeStore {
    fn default() -> Self {
        Self::new(RecipeStore::new())
    }
}

impl From<RecipeStore> for SharedRecipeStore {
    fn from(store: RecipeStore) -> Self {
        Self::new(store)
    }
}

impl SharedRecipeStore {
    pub fn new(mut store: RecipeStore) -> Self {
        store.defer_deliveries();
        SharedRecipeStore {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Run `f` against the current state.
    pub fn read<R>(&self, f: impl FnOnce(&StoreState) -> R) -> Result<R, StoreError> {
        let store = self
            .inner
            .lock()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(f(store.state()))
    }

    /// Run `f` with exclusive access to the store, then call the listeners
    /// whose selected values changed.
    pub fn write<R>(&self, f: impl FnOnce(&mut RecipeStore) -> R) -> Result<R, StoreError> {
        let (result, deliveries) = {
            let mut store = self
                .inner
                .lock()
                .map_err(|_| StoreError::LockPoisoned("write"))?;
            let result = f(&mut store);
            (result, store.take_deliveries())
        };

        for delivery in deliveries {
            delivery.deliver();
        }
        Ok(result)
    }

    pub fn snapshot(&self) -> Result<StoreSnapshot, StoreError> {
        self.read(StoreState::snapshot)
    }
}
