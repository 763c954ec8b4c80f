//! Derived views over the recipe collection.
//!
//! Every function here is pure: the store caches their results but the same
//! inputs always give the same output, so a view can be recomputed from
//! scratch at any time.

mod favorites;
mod filter;
mod recommend;

pub use favorites::{favorite_recipes, Favorites};
pub use filter::filter_recipes;
pub use recommend::{generate_recommendations, recommend, RECOMMENDATION_LIMIT};
