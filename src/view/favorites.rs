use serde::{Deserialize, Serialize};

use crate::recipe::{Recipe, RecipeId};

/// Insertion-ordered set of favorited recipe ids.
///
/// Ids are not required to reference a recipe in the collection. Dangling ids
/// are kept and skipped when the set is joined against recipes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<RecipeId>", into = "Vec<RecipeId>")]
pub struct Favorites {
    ids: Vec<RecipeId>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the id was already present.
    pub fn insert(&mut self, id: RecipeId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Returns false if the id was not present.
    pub fn remove(&mut self, id: RecipeId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| *existing != id);
        self.ids.len() != before
    }

    pub fn contains(&self, id: RecipeId) -> bool {
        self.ids.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = RecipeId> + '_ {
        self.ids.iter().copied()
    }

    pub fn as_slice(&self) -> &[RecipeId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl From<Vec<RecipeId>> for Favorites {
    fn from(ids: Vec<RecipeId>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<Favorites> for Vec<RecipeId> {
    fn from(favorites: Favorites) -> Self {
        favorites.ids
    }
}

impl FromIterator<RecipeId> for Favorites {
    fn from_iter<I: IntoIterator<Item = RecipeId>>(iter: I) -> Self {
        let mut favorites = Favorites::new();
        for id in iter {
            favorites.insert(id);
        }
        favorites
    }
}

/// Join favorites against the collection, in favorites order.
pub fn favorite_recipes(favorites: &Favorites, recipes: &[Recipe]) -> Vec<Recipe> {
    favorites
        .iter()
        .filter_map(|id| recipes.iter().find(|recipe| recipe.id == id))
        .cloned()
        .collect()
}
