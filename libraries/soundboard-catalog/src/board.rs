//! Soundboard - owned catalog context
//!
//! Bundles the category registry, the sound catalog and the UI selection
//! state into one explicitly owned object. Every mutation goes through
//! `&mut self`, so multi-step operations (category delete, metadata edits)
//! are never observed half-applied, and every mutation queues events.

use crate::{
    catalog::{SoundCatalog, SoundUpdate},
    config::CatalogConfig,
    events::CatalogEvent,
    projector::{project, CategoryFilter, SortMode, ViewCriteria},
    registry::CategoryRegistry,
    status::LoadStatus,
};
use soundboard_core::{
    CategoryId, LoadOutcome, LoadPhase, Result, Sound, SoundId, SoundboardError, UploadedFile,
};

/// Catalog, categories and view selection of one soundboard
#[derive(Debug)]
pub struct Soundboard {
    categories: CategoryRegistry,
    sounds: SoundCatalog,
    criteria: ViewCriteria,
    edit_mode: bool,
    pending_events: Vec<CatalogEvent>,
}

impl Soundboard {
    /// Create an empty soundboard with only the "Uncategorized" category
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            categories: CategoryRegistry::new(),
            sounds: SoundCatalog::new(config),
            criteria: ViewCriteria::default(),
            edit_mode: false,
            pending_events: Vec::new(),
        }
    }

    // ===== Sounds =====

    /// Register every manifest entry as a provisioned sound
    pub fn register_manifest<I, S>(&mut self, files: I) -> Vec<SoundId>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids: Vec<SoundId> = files
            .into_iter()
            .filter_map(|file| {
                self.sounds
                    .register_provisioned(file.as_ref())
                    .ok()
                    .map(|sound| sound.id().clone())
            })
            .collect();

        tracing::info!("Registered {} provisioned sound(s)", ids.len());
        if !ids.is_empty() {
            self.emit(CatalogEvent::SoundsRegistered { ids: ids.clone() });
        }
        ids
    }

    /// Register one provisioned sound
    ///
    /// # Errors
    /// `EmptyName` if the file name is blank.
    pub fn register_provisioned(&mut self, file_name: &str) -> Result<SoundId> {
        let id = self.sounds.register_provisioned(file_name)?.id().clone();
        self.emit(CatalogEvent::SoundsRegistered {
            ids: vec![id.clone()],
        });
        Ok(id)
    }

    /// Register a user upload (starts `Loading`)
    ///
    /// Rejected uploads leave the catalog unchanged and queue an
    /// `UploadRejected` event for the user-facing warning.
    pub fn register_upload(&mut self, file: UploadedFile) -> Result<SoundId> {
        let file_name = file.name.clone();
        match self.sounds.register_uploaded(file) {
            Ok(sound) => {
                let id = sound.id().clone();
                self.emit(CatalogEvent::SoundsRegistered {
                    ids: vec![id.clone()],
                });
                Ok(id)
            }
            Err(err) => {
                tracing::warn!("Rejected upload '{}': {}", file_name, err);
                self.emit(CatalogEvent::UploadRejected {
                    file_name,
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Edit a sound's metadata
    ///
    /// See [`SoundCatalog::update_metadata`].
    pub fn update_sound(&mut self, id: &SoundId, update: SoundUpdate) -> Result<()> {
        let outcome = self
            .sounds
            .update_metadata(id, update, &mut self.categories)?;
        if let Some(created) = outcome.created_category {
            self.emit(CatalogEvent::CategoryCreated { id: created });
        }
        self.emit(CatalogEvent::SoundUpdated { id: id.clone() });
        Ok(())
    }

    pub fn sound(&self, id: &SoundId) -> Option<&Sound> {
        self.sounds.find(id)
    }

    pub fn sounds(&self) -> &SoundCatalog {
        &self.sounds
    }

    // ===== Load state =====

    /// `NotLoaded -> Loading`
    pub fn begin_loading(&mut self, id: &SoundId) -> Result<()> {
        self.sounds.begin_loading(id)?;
        self.emit(CatalogEvent::LoadStateChanged {
            id: id.clone(),
            phase: LoadPhase::Loading,
        });
        Ok(())
    }

    /// `Loading -> Ready | Failed`
    pub fn finish_loading(&mut self, id: &SoundId, outcome: LoadOutcome) -> Result<LoadPhase> {
        let phase = self.sounds.finish_loading(id, outcome)?;
        self.emit(CatalogEvent::LoadStateChanged {
            id: id.clone(),
            phase,
        });
        Ok(phase)
    }

    /// Current load counts
    pub fn status(&self) -> LoadStatus {
        LoadStatus::from_sounds(self.sounds.iter())
    }

    /// Queue a `StatusChanged` event with the current counts
    pub fn publish_status(&mut self) -> LoadStatus {
        let status = self.status();
        self.emit(CatalogEvent::StatusChanged { status });
        status
    }

    // ===== Categories =====

    pub fn create_category(&mut self, name: &str) -> Result<CategoryId> {
        let id = self.categories.create(name)?.id.clone();
        self.emit(CatalogEvent::CategoryCreated { id: id.clone() });
        Ok(id)
    }

    pub fn rename_category(&mut self, id: &CategoryId, new_name: &str) -> Result<()> {
        self.categories.rename(id, new_name)?;
        self.emit(CatalogEvent::CategoryRenamed { id: id.clone() });
        Ok(())
    }

    /// Delete a category, moving its sounds to "Uncategorized"
    ///
    /// A filter on the deleted category falls back to "all".
    pub fn delete_category(&mut self, id: &CategoryId) -> Result<usize> {
        let reassigned = self.categories.delete(id, &mut self.sounds)?;
        self.emit(CatalogEvent::CategoryDeleted {
            id: id.clone(),
            reassigned,
        });

        if self.criteria.filter == CategoryFilter::Only(id.clone()) {
            self.criteria.filter = CategoryFilter::All;
            self.emit(CatalogEvent::CriteriaChanged);
        }
        Ok(reassigned)
    }

    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    // ===== View =====

    pub fn criteria(&self) -> &ViewCriteria {
        &self.criteria
    }

    /// Replace the whole selection
    ///
    /// # Errors
    /// `CategoryNotFound` if the filter names an unknown category
    pub fn set_criteria(&mut self, criteria: ViewCriteria) -> Result<()> {
        self.check_filter(&criteria.filter)?;
        if self.criteria != criteria {
            self.criteria = criteria;
            self.emit(CatalogEvent::CriteriaChanged);
        }
        Ok(())
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) -> Result<()> {
        let criteria = self.criteria.clone().with_filter(filter);
        self.set_criteria(criteria)
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if self.criteria.search != search {
            self.criteria.search = search;
            self.emit(CatalogEvent::CriteriaChanged);
        }
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        if self.criteria.sort != sort {
            self.criteria.sort = sort;
            self.emit(CatalogEvent::CriteriaChanged);
        }
    }

    fn check_filter(&self, filter: &CategoryFilter) -> Result<()> {
        match filter {
            CategoryFilter::All => Ok(()),
            CategoryFilter::Only(id) if self.categories.contains(id) => Ok(()),
            CategoryFilter::Only(id) => Err(SoundboardError::CategoryNotFound(id.clone())),
        }
    }

    /// Display list for the current selection
    pub fn projection(&self) -> Vec<&Sound> {
        self.project_with(&self.criteria)
    }

    /// Display list for an arbitrary selection
    pub fn project_with(&self, criteria: &ViewCriteria) -> Vec<&Sound> {
        project(self.sounds.sounds(), &self.categories, criteria)
    }

    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Flip edit mode, returning the new value
    pub fn toggle_edit_mode(&mut self) -> bool {
        self.edit_mode = !self.edit_mode;
        self.emit(CatalogEvent::EditModeChanged {
            enabled: self.edit_mode,
        });
        self.edit_mode
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<CatalogEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn emit(&mut self, event: CatalogEvent) {
        self.pending_events.push(event);
    }
}

impl Default for Soundboard {
    fn default() -> Self {
        Self::new(CatalogConfig::default())
    }
}
