use serde::{Deserialize, Serialize};

use crate::view::RECOMMENDATION_LIMIT;
use crate::StoreError;

/// What happens when a recipe arrives with an id already in the collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateIdPolicy {
    /// Refuse the write with [`StoreError::DuplicateId`].
    #[default]
    Reject,
    /// Replace the existing record in place, keeping its position.
    Replace,
}

/// Store configuration.
///
/// ```ignore
/// let config = StoreConfig::default()
///     .with_recommendation_limit(5)
///     .with_duplicate_ids(DuplicateIdPolicy::Replace);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub recommendation_limit: usize,
    /// Recompute recommendations on add/delete/update/set as well as on
    /// favorite changes. When false, recommendations only refresh on favorite
    /// changes and explicit `generate_recommendations` calls.
    pub refresh_recommendations_on_write: bool,
    pub duplicate_ids: DuplicateIdPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            recommendation_limit: RECOMMENDATION_LIMIT,
            refresh_recommendations_on_write: true,
            duplicate_ids: DuplicateIdPolicy::Reject,
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_recommendation_limit(mut self, limit: usize) -> Self {
        self.recommendation_limit = limit;
        self
    }

    pub fn with_refresh_recommendations_on_write(mut self, refresh: bool) -> Self {
        self.refresh_recommendations_on_write = refresh;
        self
    }

    pub fn with_duplicate_ids(mut self, policy: DuplicateIdPolicy) -> Self {
        self.duplicate_ids = policy;
        self
    }
}
