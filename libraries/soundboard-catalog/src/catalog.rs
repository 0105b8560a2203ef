//! Sound catalog
//!
//! Owns every sound entity in insertion order. Sounds are never removed.

use crate::config::CatalogConfig;
use crate::registry::CategoryRegistry;
use soundboard_core::{
    CategoryId, ColorTag, LoadOutcome, LoadPhase, Result, Sound, SoundId, SoundboardError,
    UploadedFile,
};

/// Metadata edit for a single sound
///
/// A non-blank `new_category_name` wins over `category_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoundUpdate {
    /// New display name (blank keeps the current name)
    pub name: Option<String>,

    /// New color
    pub color: Option<ColorTag>,

    /// Existing category to move the sound to
    pub category_id: Option<CategoryId>,

    /// Category to move the sound to, created if no category has this name
    pub new_category_name: Option<String>,
}

impl SoundUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn color(mut self, color: ColorTag) -> Self {
        self.color = Some(color);
        self
    }

    pub fn category(mut self, id: CategoryId) -> Self {
        self.category_id = Some(id);
        self
    }

    pub fn new_category(mut self, name: impl Into<String>) -> Self {
        self.new_category_name = Some(name.into());
        self
    }
}

/// What a metadata edit changed besides the sound itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataOutcome {
    /// Category created on the fly for `new_category_name`
    pub created_category: Option<CategoryId>,
}

/// All sounds of the soundboard
#[derive(Debug)]
pub struct SoundCatalog {
    sounds: Vec<Sound>,
    config: CatalogConfig,

    /// Palette position of the next provisioned sound
    provisioned_cursor: usize,
}

impl SoundCatalog {
    /// Create an empty catalog
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            sounds: Vec::new(),
            config,
            provisioned_cursor: 0,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Register a clip from the startup manifest
    ///
    /// Colors cycle through the palette in manifest order. The sound starts
    /// `NotLoaded` and waits for the load pipeline.
    ///
    /// # Errors
    /// `EmptyName` if the file name is blank; the catalog is left unchanged.
    pub fn register_provisioned(&mut self, file_name: &str) -> Result<&Sound> {
        if file_name.trim().is_empty() {
            return Err(SoundboardError::EmptyName);
        }

        let color = ColorTag::cycle(self.provisioned_cursor);
        self.provisioned_cursor += 1;

        let locator = self.config.provisioned_locator(file_name);
        let sound = Sound::provisioned(file_name, locator, color);
        tracing::debug!(
            "Registered provisioned sound '{}' ({}) from {}",
            sound.name(),
            sound.id(),
            file_name
        );
        Ok(self.push(sound))
    }

    /// Register a user upload
    ///
    /// The color is picked from the current catalog size and the sound starts
    /// `Loading`, since uploads are loaded right away.
    ///
    /// # Errors
    /// `UnsupportedFormat` if the declared media type is not accepted; the
    /// catalog is left unchanged.
    pub fn register_uploaded(&mut self, file: UploadedFile) -> Result<&Sound> {
        if !self.config.accepts(&file.media_type) {
            return Err(SoundboardError::unsupported_format(
                file.name,
                file.media_type,
            ));
        }

        let color = ColorTag::cycle(self.sounds.len());
        let sound = Sound::uploaded(file.name, file.locator, color);
        tracing::debug!("Registered uploaded sound '{}' ({})", sound.name(), sound.id());
        Ok(self.push(sound))
    }

    fn push(&mut self, sound: Sound) -> &Sound {
        self.sounds.push(sound);
        &self.sounds[self.sounds.len() - 1]
    }

    pub fn find(&self, id: &SoundId) -> Option<&Sound> {
        self.sounds.iter().find(|s| s.id() == id)
    }

    /// Like [`SoundCatalog::find`], but not-found is an error
    pub fn get(&self, id: &SoundId) -> Result<&Sound> {
        self.find(id)
            .ok_or_else(|| SoundboardError::SoundNotFound(id.clone()))
    }

    fn get_mut(&mut self, id: &SoundId) -> Result<&mut Sound> {
        self.sounds
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or_else(|| SoundboardError::SoundNotFound(id.clone()))
    }

    /// Edit name, color and category of a sound
    ///
    /// Everything is validated before anything changes, except that a
    /// requested new category is created before being assigned.
    ///
    /// # Errors
    /// `SoundNotFound`, `CategoryNotFound` for an unknown `category_id`
    pub fn update_metadata(
        &mut self,
        id: &SoundId,
        update: SoundUpdate,
        categories: &mut CategoryRegistry,
    ) -> Result<MetadataOutcome> {
        self.get(id)?;

        let mut outcome = MetadataOutcome::default();
        let new_category_name = update
            .new_category_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());

        let category_id = match (new_category_name, update.category_id) {
            (Some(name), _) => match categories.find_by_name(name) {
                Some(existing) => Some(existing.id.clone()),
                None => {
                    let created = categories.create(name)?.id.clone();
                    outcome.created_category = Some(created.clone());
                    Some(created)
                }
            },
            (None, Some(category_id)) => {
                if !categories.contains(&category_id) {
                    return Err(SoundboardError::CategoryNotFound(category_id));
                }
                Some(category_id)
            }
            (None, None) => None,
        };

        let sound = self.get_mut(id)?;
        if let Some(name) = update.name.as_deref() {
            sound.rename(name);
        }
        if let Some(color) = update.color {
            sound.set_color(color);
        }
        if let Some(category_id) = category_id {
            sound.assign_category(category_id);
        }

        Ok(outcome)
    }

    /// Move every sound in `from` to `to`, returning how many moved
    pub(crate) fn reassign_category(&mut self, from: &CategoryId, to: &CategoryId) -> usize {
        let mut moved = 0;
        for sound in self.sounds.iter_mut().filter(|s| s.category_id() == from) {
            sound.assign_category(to.clone());
            moved += 1;
        }
        moved
    }

    /// Claim a sound for loading (`NotLoaded -> Loading`)
    pub fn begin_loading(&mut self, id: &SoundId) -> Result<()> {
        self.get_mut(id)?.begin_loading()
    }

    /// Record a load result (`Loading -> Ready | Failed`)
    pub fn finish_loading(&mut self, id: &SoundId, outcome: LoadOutcome) -> Result<LoadPhase> {
        self.get_mut(id)?.finish_loading(outcome)
    }

    /// All sounds in insertion order
    pub fn sounds(&self) -> &[Sound] {
        &self.sounds
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sound> {
        self.sounds.iter()
    }

    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }
}

impl Default for SoundCatalog {
    fn default() -> Self {
        Self::new(CatalogConfig::default())
    }
}
