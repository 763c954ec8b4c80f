use std::fmt;

use crate::recipe::RecipeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    InvalidArgument {
        field: &'static str,
        reason: String,
    },
    DuplicateId(RecipeId),
    Serde(String),
    LockPoisoned(&'static str),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InvalidArgument { field, reason } => {
                write!(f, "invalid argument for {}: {}", field, reason)
            }
            StoreError::DuplicateId(id) => {
                write!(f, "a recipe with id {} already exists", id)
            }
            StoreError::Serde(message) => write!(f, "serialization error: {}", message),
            StoreError::LockPoisoned(operation) => {
                write!(f, "store lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}
