//! The recipe store and its state.

mod recipe_store;
mod shared;

use serde::{Deserialize, Serialize};

use crate::recipe::{Recipe, RecipeId};
use crate::view::{favorite_recipes, Favorites};

pub use recipe_store::RecipeStore;
pub use shared::SharedRecipeStore;

/// Source state: everything a store needs to rebuild its views.
///
/// Used as injectable initial state and as a serializable export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub favorites: Favorites,
}

/// Current state of a store, source fields plus cached derived views.
///
/// Only the store writes to it, and always as part of a commit, so the derived
/// views observed through a `&StoreState` are consistent with the collection,
/// search term and favorites next to them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreState {
    pub(crate) recipes: Vec<Recipe>,
    pub(crate) search_term: String,
    pub(crate) favorites: Favorites,
    pub(crate) filtered: Vec<Recipe>,
    pub(crate) recommended: Vec<Recipe>,
}

impl StoreState {
    /// The recipe collection, in insertion order.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Find a recipe by id.
    pub fn recipe(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.id == id)
    }

    /// The search term as last set, untrimmed.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Cached result of filtering the collection by the search term.
    pub fn filtered_recipes(&self) -> &[Recipe] {
        &self.filtered
    }

    /// Get a reference to the favorite ids.
    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn is_favorite(&self, id: RecipeId) -> bool {
        self.favorites.contains(id)
    }

    /// Favorited recipes in favorites order, dangling ids skipped.
    pub fn favorite_recipes(&self) -> Vec<Recipe> {
        favorite_recipes(&self.favorites, &self.recipes)
    }

    /// Cached recommendation list.
    pub fn recommendations(&self) -> &[Recipe] {
        &self.recommended
    }

    /// Clone the source state; derived views are left out.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            recipes: self.recipes.clone(),
            search_term: self.search_term.clone(),
            favorites: self.favorites.clone(),
        }
    }
}
