use std::collections::HashMap;

use crate::config::{DuplicateIdPolicy, StoreConfig};
#[cfg(feature = "emitter")]
use crate::emitter::ChangeEmitter;
use crate::recipe::{Recipe, RecipeId, RecipePatch};
use crate::subscription::{Delivery, SubscriptionId, Subscriptions};
use crate::view::{filter_recipes, recommend, Favorites};
use crate::{StoreError, StoreEvent};

use super::{StoreSnapshot, StoreState};

/// In-memory recipe collection with search, favorites and recommendation views.
///
/// Every mutation updates the source state, recomputes the views that depend
/// on it, and only then notifies subscribers, so a reader never observes a
/// collection that is out of step with its filtered view.
///
/// ```ignore
/// let mut store = RecipeStore::new();
/// store.add_recipe(Recipe::new(1, "Pasta", "Tomato"))?;
/// store.add_recipe(Recipe::new(2, "Salad", "Greens"))?;
///
/// store.set_search_term("toma");
/// assert_eq!(store.filtered_recipes().len(), 1);
///
/// store.add_favorite(1);
/// assert_eq!(store.recommendations()[0].id, 2);
/// ```
#[derive(Debug)]
pub struct RecipeStore {
    config: StoreConfig,
    state: StoreState,
    subscriptions: Subscriptions,
    /// Listener calls held back until the owner releases its lock.
    pending: Vec<Delivery>,
    defer_deliveries: bool,
    #[cfg(feature = "emitter")]
    emitter: ChangeEmitter,
}

impl Default for RecipeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeStore {
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        RecipeStore {
            config,
            state: StoreState::default(),
            subscriptions: Subscriptions::new(),
            pending: Vec::new(),
            defer_deliveries: false,
            #[cfg(feature = "emitter")]
            emitter: ChangeEmitter::new(),
        }
    }

    /// Build a store from injected initial state. Derived views are computed
    /// here, never taken from the input.
    pub fn from_snapshot(snapshot: StoreSnapshot, config: StoreConfig) -> Result<Self, StoreError> {
        let recipes = collect_unique(snapshot.recipes, config.duplicate_ids)
            .map_err(|err| rejected("from_snapshot", err))?;

        let mut store = Self::with_config(config);
        store.state.recipes = recipes;
        store.state.search_term = snapshot.search_term;
        store.state.favorites = snapshot.favorites;
        store.refresh_filtered();
        store.refresh_recommendations();
        Ok(store)
    }

    /// Build a store from a JSON encoded [`StoreSnapshot`].
    pub fn from_json(json: &str, config: StoreConfig) -> Result<Self, StoreError> {
        let snapshot: StoreSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot, config)
    }

    /// Get the configuration the store was built with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Get a reference to the full state, source and derived views.
    pub fn state(&self) -> &StoreState {
        &self.state
    }

    /// Copy the source state out for persistence.
    pub fn snapshot(&self) -> StoreSnapshot {
        self.state.snapshot()
    }

    /// All recipes, in collection order.
    pub fn recipes(&self) -> &[Recipe] {
        self.state.recipes()
    }

    /// Look up a recipe by id.
    pub fn recipe(&self, id: RecipeId) -> Option<&Recipe> {
        self.state.recipe(id)
    }

    /// The current search term, as set.
    pub fn search_term(&self) -> &str {
        self.state.search_term()
    }

    /// Recipes matching the search term.
    pub fn filtered_recipes(&self) -> &[Recipe] {
        self.state.filtered_recipes()
    }

    /// Favorited ids, in the order they were added.
    pub fn favorites(&self) -> &Favorites {
        self.state.favorites()
    }

    /// Favorited recipes still present in the collection.
    pub fn favorite_recipes(&self) -> Vec<Recipe> {
        self.state.favorite_recipes()
    }

    /// The current recommendation list.
    pub fn recommendations(&self) -> &[Recipe] {
        self.state.recommendations()
    }

    /// Check whether `id` is a favorite.
    pub fn is_favorite(&self, id: RecipeId) -> bool {
        self.state.is_favorite(id)
    }

    // -- collection ---------------------------------------------------------

    /// Append a recipe. An id already in the collection is rejected or
    /// replaces the existing record, depending on the configured policy.
    pub fn add_recipe(&mut self, recipe: Recipe) -> Result<(), StoreError> {
        recipe
            .validate()
            .map_err(|err| rejected("add_recipe", err))?;

        let event = match self.position(recipe.id) {
            Some(index) => match self.config.duplicate_ids {
                DuplicateIdPolicy::Reject => {
                    return Err(rejected("add_recipe", StoreError::DuplicateId(recipe.id)));
                }
                DuplicateIdPolicy::Replace => {
                    self.state.recipes[index] = recipe.clone();
                    StoreEvent::RecipeUpdated { recipe }
                }
            },
            None => {
                self.state.recipes.push(recipe.clone());
                StoreEvent::RecipeAdded { recipe }
            }
        };

        self.commit(event);
        Ok(())
    }

    /// Remove the recipe with `id`. Returns false, changing nothing, if absent.
    ///
    /// A favorite pointing at the recipe is left in place and becomes dangling.
    pub fn delete_recipe(&mut self, id: RecipeId) -> bool {
        let before = self.state.recipes.len();
        self.state.recipes.retain(|recipe| recipe.id != id);
        if self.state.recipes.len() == before {
            return false;
        }

        self.commit(StoreEvent::RecipeDeleted { id });
        true
    }

    /// Shallow-merge `patch` into the recipe with `id`.
    ///
    /// Returns `Ok(false)` if there is no such recipe.
    pub fn update_recipe(&mut self, id: RecipeId, patch: RecipePatch) -> Result<bool, StoreError> {
        patch
            .validate()
            .map_err(|err| rejected("update_recipe", err))?;

        let Some(index) = self.position(id) else {
            return Ok(false);
        };

        let merged = self.state.recipes[index].merge(&patch);
        if merged != self.state.recipes[index] {
            self.state.recipes[index] = merged.clone();
            self.commit(StoreEvent::RecipeUpdated { recipe: merged });
        }
        Ok(true)
    }

    /// Replace the whole collection. Nothing changes if any record is rejected.
    pub fn set_recipes(&mut self, recipes: Vec<Recipe>) -> Result<(), StoreError> {
        let recipes = collect_unique(recipes, self.config.duplicate_ids)
            .map_err(|err| rejected("set_recipes", err))?;

        let count = recipes.len();
        self.state.recipes = recipes;
        self.commit(StoreEvent::RecipesSet { count });
        Ok(())
    }

    /// Bulk load a JSON array of recipes through [`RecipeStore::set_recipes`].
    pub fn load_recipes_json(&mut self, json: &str) -> Result<(), StoreError> {
        let recipes: Vec<Recipe> =
            serde_json::from_str(json).map_err(|err| rejected("load_recipes_json", err.into()))?;
        self.set_recipes(recipes)
    }

    // -- search -------------------------------------------------------------

    /// Store `term` verbatim and refilter.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term == self.state.search_term {
            return;
        }

        self.state.search_term = term.clone();
        self.commit(StoreEvent::SearchTermChanged { term });
    }

    // -- favorites ----------------------------------------------------------

    /// Returns false if `id` was already a favorite.
    pub fn add_favorite(&mut self, id: RecipeId) -> bool {
        if !self.state.favorites.insert(id) {
            return false;
        }
        self.commit(StoreEvent::FavoriteAdded { id });
        true
    }

    /// Returns false if `id` was not a favorite.
    pub fn remove_favorite(&mut self, id: RecipeId) -> bool {
        if !self.state.favorites.remove(id) {
            return false;
        }
        self.commit(StoreEvent::FavoriteRemoved { id });
        true
    }

    /// Flip membership of `id`. Returns whether it is a favorite afterwards.
    pub fn toggle_favorite(&mut self, id: RecipeId) -> bool {
        if self.is_favorite(id) {
            self.remove_favorite(id);
            false
        } else {
            self.add_favorite(id);
            true
        }
    }

    /// Recompute recommendations from the current favorites and collection.
    pub fn generate_recommendations(&mut self) -> &[Recipe] {
        self.refresh_recommendations();
        let ids = self.state.recommended.iter().map(|recipe| recipe.id).collect();
        self.commit(StoreEvent::RecommendationsGenerated { ids });
        self.state.recommendations()
    }

    // -- notification -------------------------------------------------------

    /// Call `listener` with the selected value whenever a commit changes it.
    ///
    /// Listeners run after the views are recomputed. Behind a
    /// [`SharedRecipeStore`](crate::SharedRecipeStore) they run once the lock
    /// is released, so a listener may read the store through a cloned handle.
    ///
    /// ```ignore
    /// store.subscribe(
    ///     |state: &StoreState| state.filtered_recipes().to_vec(),
    ///     |filtered: &Vec<Recipe>| render(filtered),
    /// );
    /// ```
    pub fn subscribe<T, S, L>(&mut self, selector: S, listener: L) -> SubscriptionId
    where
        T: PartialEq + Send + Sync + 'static,
        S: Fn(&StoreState) -> T + Send + 'static,
        L: FnMut(&T) + Send + 'static,
    {
        self.subscriptions.subscribe(&self.state, selector, listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscriptions.unsubscribe(id)
    }

    /// Listen for change events of one type. The listener receives the event
    /// as JSON. Returns a listener id for [`RecipeStore::remove_listener`].
    #[cfg(feature = "emitter")]
    pub fn on<F>(&mut self, event_type: &str, listener: F) -> String
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.emitter.on(event_type, listener)
    }

    #[cfg(feature = "emitter")]
    pub fn remove_listener(&mut self, listener_id: &str) -> bool {
        self.emitter.remove_listener(listener_id)
    }

    /// Hold listener calls in [`RecipeStore::take_deliveries`] instead of
    /// running them inside the commit.
    pub(crate) fn defer_deliveries(&mut self) {
        self.defer_deliveries = true;
    }

    pub(crate) fn take_deliveries(&mut self) -> Vec<Delivery> {
        std::mem::take(&mut self.pending)
    }

    // -- internals ----------------------------------------------------------

    fn position(&self, id: RecipeId) -> Option<usize> {
        self.state.recipes.iter().position(|recipe| recipe.id == id)
    }

    fn refresh_filtered(&mut self) {
        self.state.filtered = filter_recipes(&self.state.recipes, &self.state.search_term);
    }

    fn refresh_recommendations(&mut self) {
        self.state.recommended = recommend(
            &self.state.favorites,
            &self.state.recipes,
            self.config.recommendation_limit,
        );
    }

    /// Recompute the views affected by `event`, then notify.
    fn commit(&mut self, event: StoreEvent) {
        match &event {
            event if event.is_collection_change() => {
                self.refresh_filtered();
                if self.config.refresh_recommendations_on_write {
                    self.refresh_recommendations();
                }
            }
            StoreEvent::SearchTermChanged { .. } => self.refresh_filtered(),
            StoreEvent::FavoriteAdded { .. } | StoreEvent::FavoriteRemoved { .. } => {
                self.refresh_recommendations();
            }
            // recommendations are refreshed by the caller
            _ => {}
        }

        tracing::debug!(
            event = event.event_type(),
            recipes = self.state.recipes.len(),
            filtered = self.state.filtered.len(),
            favorites = self.state.favorites.len(),
            recommended = self.state.recommended.len(),
            "store commit"
        );

        let deliveries = self.subscriptions.notify(&self.state);
        if self.defer_deliveries {
            self.pending.extend(deliveries);
        } else {
            deliveries.into_iter().for_each(Delivery::deliver);
        }

        #[cfg(feature = "emitter")]
        {
            self.emitter.enqueue(event);
            self.emitter.emit_queued();
        }
    }
}

fn rejected(operation: &'static str, err: StoreError) -> StoreError {
    tracing::warn!(operation, %err, "store write rejected");
    err
}

/// Validate a batch and enforce id uniqueness under `policy`.
fn collect_unique(
    recipes: Vec<Recipe>,
    policy: DuplicateIdPolicy,
) -> Result<Vec<Recipe>, StoreError> {
    let mut unique: Vec<Recipe> = Vec::with_capacity(recipes.len());
    let mut index: HashMap<RecipeId, usize> = HashMap::with_capacity(recipes.len());

    for recipe in recipes {
        recipe.validate()?;
        match index.get(&recipe.id) {
            Some(&existing) => match policy {
                DuplicateIdPolicy::Reject => return Err(StoreError::DuplicateId(recipe.id)),
                DuplicateIdPolicy::Replace => unique[existing] = recipe,
            },
            None => {
                index.insert(recipe.id, unique.len());
                unique.push(recipe);
            }
        }
    }

    Ok(unique)
}
