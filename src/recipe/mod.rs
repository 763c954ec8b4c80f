//! Recipe records and partial updates.
//!
//! A recipe is an immutable value from the store's point of view. The only way
//! to change one is [`Recipe::merge`], which applies a [`RecipePatch`] field by
//! field and never touches the id.

use serde::{Deserialize, Serialize};

use crate::StoreError;

/// Opaque identifier supplied by whoever creates the recipe.
pub type RecipeId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Recipe {
    pub fn new(id: RecipeId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Recipe {
            id,
            title: title.into(),
            description: description.into(),
        }
    }

    /// Check the shape of the record before it enters a collection.
    pub fn validate(&self) -> Result<(), StoreError> {
        validate_title(&self.title)
    }

    /// Case-insensitive substring match against title or description.
    ///
    /// `needle` must already be lower-cased.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }

    /// Shallow merge: fields present in the patch replace the current ones.
    pub fn merge(&self, patch: &RecipePatch) -> Recipe {
        Recipe {
            id: self.id,
            title: patch.title.clone().unwrap_or_else(|| self.title.clone()),
            description: patch
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
        }
    }
}

/// Partial recipe fields for an update. Absent fields are preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RecipePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        match &self.title {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }
}

fn validate_title(title: &str) -> Result<(), StoreError> {
    if title.trim().is_empty() {
        return Err(StoreError::InvalidArgument {
            field: "title",
            reason: "must not be blank".into(),
        });
    }
    Ok(())
}
