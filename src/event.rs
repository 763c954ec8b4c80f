use serde::{Deserialize, Serialize};

use crate::recipe::{Recipe, RecipeId};

/// A committed change to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StoreEvent {
    RecipeAdded { recipe: Recipe },
    RecipeDeleted { id: RecipeId },
    RecipeUpdated { recipe: Recipe },
    RecipesSet { count: usize },
    SearchTermChanged { term: String },
    FavoriteAdded { id: RecipeId },
    FavoriteRemoved { id: RecipeId },
    RecommendationsGenerated { ids: Vec<RecipeId> },
}

impl StoreEvent {
    pub const RECIPE_ADDED: &'static str = "RecipeAdded";
    pub const RECIPE_DELETED: &'static str = "RecipeDeleted";
    pub const RECIPE_UPDATED: &'static str = "RecipeUpdated";
    pub const RECIPES_SET: &'static str = "RecipesSet";
    pub const SEARCH_TERM_CHANGED: &'static str = "SearchTermChanged";
    pub const FAVORITE_ADDED: &'static str = "FavoriteAdded";
    pub const FAVORITE_REMOVED: &'static str = "FavoriteRemoved";
    pub const RECOMMENDATIONS_GENERATED: &'static str = "RecommendationsGenerated";

    pub fn event_type(&self) -> &'static str {
        match self {
            StoreEvent::RecipeAdded { .. } => Self::RECIPE_ADDED,
            StoreEvent::RecipeDeleted { .. } => Self::RECIPE_DELETED,
            StoreEvent::RecipeUpdated { .. } => Self::RECIPE_UPDATED,
            StoreEvent::RecipesSet { .. } => Self::RECIPES_SET,
            StoreEvent::SearchTermChanged { .. } => Self::SEARCH_TERM_CHANGED,
            StoreEvent::FavoriteAdded { .. } => Self::FAVORITE_ADDED,
            StoreEvent::FavoriteRemoved { .. } => Self::FAVORITE_REMOVED,
            StoreEvent::RecommendationsGenerated { .. } => Self::RECOMMENDATIONS_GENERATED,
        }
    }

    /// Whether the change touched the recipe collection itself.
    pub fn is_collection_change(&self) -> bool {
        matches!(
            self,
            StoreEvent::RecipeAdded { .. }
                | StoreEvent::RecipeDeleted { .. }
                | StoreEvent::RecipeUpdated { .. }
                | StoreEvent::RecipesSet { .. }
        )
    }
}
