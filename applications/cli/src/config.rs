/// CLI configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use soundboard_catalog::{CatalogConfig, SortMode};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "soundboard.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default = "default_library")]
    pub library: LibrarySettings,

    #[serde(default = "default_catalog")]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub view: ViewSettings,

    #[serde(default = "default_logging")]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibrarySettings {
    /// Directory holding the provisioned clips and the manifest
    #[serde(default = "default_sounds_dir")]
    pub sounds_dir: PathBuf,

    /// Manifest file name, relative to `sounds_dir`
    #[serde(default = "default_manifest")]
    pub manifest: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSettings {
    #[serde(default = "default_accepted_media_type")]
    pub accepted_media_type: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ViewSettings {
    /// Sort mode used when `--sort` is not given
    #[serde(default)]
    pub sort: SortMode,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `soundboard.toml` is used if
    /// present. Environment variables prefixed with `SOUNDBOARD_` override
    /// both, with `__` between nested keys (`SOUNDBOARD_LIBRARY__SOUNDS_DIR`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        settings = match path {
            Some(path) => settings.add_source(config::File::from(path.to_path_buf())),
            None => settings
                .add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        settings = settings.add_source(
            config::Environment::with_prefix("SOUNDBOARD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: CliConfig = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.catalog.accepted_media_type.trim().is_empty() {
            return Err(CliError::Config(
                "catalog.accepted_media_type cannot be empty".to_string(),
            ));
        }
        if self.library.manifest.trim().is_empty() {
            return Err(CliError::Config(
                "library.manifest cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Catalog settings for the soundboard
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            accepted_media_type: self.catalog.accepted_media_type.clone(),
            provisioned_root: self.library.sounds_dir.clone(),
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.library.sounds_dir.join(&self.library.manifest)
    }
}

// Default values
fn default_library() -> LibrarySettings {
    LibrarySettings {
        sounds_dir: default_sounds_dir(),
        manifest: default_manifest(),
    }
}

fn default_sounds_dir() -> PathBuf {
    CatalogConfig::default().provisioned_root
}

fn default_manifest() -> String {
    "sounds.json".to_string()
}

fn default_catalog() -> CatalogSettings {
    CatalogSettings {
        accepted_media_type: default_accepted_media_type(),
    }
}

fn default_accepted_media_type() -> String {
    CatalogConfig::default().accepted_media_type
}

fn default_logging() -> LoggingSettings {
    LoggingSettings {
        filter: default_log_filter(),
    }
}

fn default_log_filter() -> String {
    "soundboard_cli=info,soundboard_catalog=info,soundboard_playback=info".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            library: default_library(),
            catalog: default_catalog(),
            view: ViewSettings::default(),
            logging: default_logging(),
        }
    }
}
