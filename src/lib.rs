//! Reactive in-memory recipe store.
//!
//! [`RecipeStore`] owns a collection of [`Recipe`]s, a search term and a set of
//! favorites, and keeps two derived views in step with them: the recipes
//! matching the search term and a short list of recommendations. Consumers
//! read the views directly or subscribe to a selected slice of state.

mod config;
#[cfg(feature = "emitter")]
mod emitter;
mod error;
mod event;
mod recipe;
mod store;
mod subscription;
pub mod view;

pub use config::{DuplicateIdPolicy, StoreConfig};
#[cfg(feature = "emitter")]
pub use emitter::ChangeEmitter;
pub use error::StoreError;
pub use event::StoreEvent;
pub use recipe::{Recipe, RecipeId, RecipePatch};
pub use store::{RecipeStore, SharedRecipeStore, StoreSnapshot, StoreState};
pub use subscription::{Delivery, SubscriptionId, Subscriptions};
pub use view::{favorite_recipes, filter_recipes, generate_recommendations, Favorites};
