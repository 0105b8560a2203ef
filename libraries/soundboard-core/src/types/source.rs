//! Clip locators and upload intake types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Reference the audio engine uses to fetch clip bytes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Locator {
    /// File shipped with the soundboard
    Path(PathBuf),

    /// Ephemeral reference to user-provided bytes (must be released by its owner)
    Blob(String),
}

impl Locator {
    /// Whether the locator points anywhere at all
    pub fn is_valid(&self) -> bool {
        match self {
            Locator::Path(path) => !path.as_os_str().is_empty(),
            Locator::Blob(key) => !key.trim().is_empty(),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Path(path) => write!(f, "{}", path.display()),
            Locator::Blob(key) => write!(f, "blob:{}", key),
        }
    }
}

/// Where a sound came from
///
/// Determines the load strategy and who cleans up the locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Listed in the startup manifest, loaded in batches
    Provisioned,

    /// Added by the user at runtime, loaded individually and eagerly
    Uploaded,
}

/// A file handed over by the upload intake
///
/// The locator has already been produced by the file acquisition layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// File name as selected by the user
    pub name: String,

    /// Declared media type (e.g. `audio/ogg`)
    pub media_type: String,

    /// Engine-usable reference to the file contents
    pub locator: Locator,
}

impl UploadedFile {
    /// Create a new uploaded file description
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, locator: Locator) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            locator,
        }
    }
}
