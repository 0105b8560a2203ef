/// ID types for Soundboard entities
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Sound identifier
///
/// Generated once when a sound is registered and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SoundId(String);

impl SoundId {
    /// Create a sound ID from an existing value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random sound ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category identifier
///
/// The sentinel id [`CategoryId::UNCATEGORIZED`] always exists in a registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    /// Raw value of the sentinel category id
    pub const UNCATEGORIZED: &'static str = "uncategorized";

    /// Create a category ID from an existing value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random category ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The sentinel "uncategorized" id
    pub fn uncategorized() -> Self {
        Self(Self::UNCATEGORIZED.to_string())
    }

    /// Whether this is the sentinel id
    pub fn is_uncategorized(&self) -> bool {
        self.0 == Self::UNCATEGORIZED
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
