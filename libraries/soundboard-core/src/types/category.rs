//! Category domain type

use crate::types::CategoryId;
use serde::{Deserialize, Serialize};

/// Display name of the sentinel category
pub const UNCATEGORIZED_NAME: &str = "Uncategorized";

/// A named grouping of sounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique category identifier
    pub id: CategoryId,

    /// Category name (unique, case-insensitive)
    pub name: String,

    /// Whether the user may delete this category
    pub is_deletable: bool,

    /// Whether the user may rename this category
    pub is_editable: bool,
}

impl Category {
    /// Create a new user category with a fresh id
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::generate(),
            name: name.into(),
            is_deletable: true,
            is_editable: true,
        }
    }

    /// The protected "Uncategorized" sentinel
    pub fn uncategorized() -> Self {
        Self {
            id: CategoryId::uncategorized(),
            name: UNCATEGORIZED_NAME.to_string(),
            is_deletable: false,
            is_editable: false,
        }
    }

    /// Case-insensitive name comparison
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}
