use crate::recipe::Recipe;

use super::Favorites;

/// Number of recipes in the recommendation view unless configured otherwise.
pub const RECOMMENDATION_LIMIT: usize = 3;

/// Recommendations with the default limit.
pub fn generate_recommendations(favorites: &Favorites, recipes: &[Recipe]) -> Vec<Recipe> {
    recommend(favorites, recipes, RECOMMENDATION_LIMIT)
}

/// First `limit` recipes that are not favorited, in collection order.
///
/// With no favorites this is simply the head of the collection.
pub fn recommend(favorites: &Favorites, recipes: &[Recipe], limit: usize) -> Vec<Recipe> {
    recipes
        .iter()
        .filter(|recipe| !favorites.contains(recipe.id))
        .take(limit)
        .cloned()
        .collect()
}
