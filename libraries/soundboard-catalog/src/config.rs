//! Catalog configuration

use serde::{Deserialize, Serialize};
use soundboard_core::Locator;
use std::path::PathBuf;

/// Configuration for the sound catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// The only media type accepted for uploads (default: `audio/ogg`)
    #[serde(default = "default_accepted_media_type")]
    pub accepted_media_type: String,

    /// Directory provisioned clips are fetched from (default: `sounds`)
    #[serde(default = "default_provisioned_root")]
    pub provisioned_root: PathBuf,
}

impl CatalogConfig {
    /// Whether an upload with this declared media type passes intake
    ///
    /// Media types compare case-insensitively.
    pub fn accepts(&self, media_type: &str) -> bool {
        media_type
            .trim()
            .eq_ignore_ascii_case(self.accepted_media_type.trim())
    }

    /// Locator for a file listed in the manifest
    pub fn provisioned_locator(&self, file_name: &str) -> Locator {
        if file_name.trim().is_empty() {
            return Locator::Path(PathBuf::new());
        }
        Locator::Path(self.provisioned_root.join(file_name))
    }
}

fn default_accepted_media_type() -> String {
    "audio/ogg".to_string()
}

fn default_provisioned_root() -> PathBuf {
    PathBuf::from("sounds")
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            accepted_media_type: default_accepted_media_type(),
            provisioned_root: default_provisioned_root(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.accepted_media_type, "audio/ogg");
        assert_eq!(config.provisioned_root, PathBuf::from("sounds"));
    }

    #[test]
    fn accepts_only_configured_type() {
        let config = CatalogConfig::default();
        assert!(config.accepts("audio/ogg"));
        assert!(config.accepts("Audio/OGG "));
        assert!(!config.accepts("audio/wav"));
        assert!(!config.accepts(""));
    }

    #[test]
    fn provisioned_locator_joins_root() {
        let config = CatalogConfig::default();
        assert_eq!(
            config.provisioned_locator("boo.ogg"),
            Locator::Path(PathBuf::from("sounds/boo.ogg"))
        );
        assert!(!config.provisioned_locator("  ").is_valid());
    }

    #[test]
    fn missing_keys_use_defaults() {
        let config: CatalogConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CatalogConfig::default());
    }
}
