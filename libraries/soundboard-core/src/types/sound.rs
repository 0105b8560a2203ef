//! Sound entity and its load state machine

use crate::error::{Result, SoundboardError};
use crate::naming::display_name;
use crate::types::{
    CategoryId, ColorTag, LoadOutcome, LoadPhase, LoadState, Locator, PlayerHandle, Provenance,
    SoundId,
};

/// One playable clip and its metadata
///
/// Load state only moves along `NotLoaded -> Loading -> {Ready, Failed}`.
/// Every transition goes through [`Sound::begin_loading`] or
/// [`Sound::finish_loading`], which reject anything else.
#[derive(Debug)]
pub struct Sound {
    id: SoundId,
    name: String,
    original_name: String,
    locator: Locator,
    color: ColorTag,
    category_id: CategoryId,
    provenance: Provenance,
    load_state: LoadState,
}

impl Sound {
    /// Create a sound listed in the startup manifest
    ///
    /// Starts `NotLoaded` until the load pipeline claims it.
    pub fn provisioned(file_name: impl Into<String>, locator: Locator, color: ColorTag) -> Self {
        Self::create(file_name.into(), locator, color, Provenance::Provisioned)
    }

    /// Create a sound from a user upload
    ///
    /// Uploads load eagerly, so the sound starts out `Loading`.
    pub fn uploaded(file_name: impl Into<String>, locator: Locator, color: ColorTag) -> Self {
        Self::create(file_name.into(), locator, color, Provenance::Uploaded)
    }

    fn create(
        original_name: String,
        locator: Locator,
        color: ColorTag,
        provenance: Provenance,
    ) -> Self {
        let load_state = match provenance {
            Provenance::Provisioned => LoadState::NotLoaded,
            Provenance::Uploaded => LoadState::Loading,
        };

        Self {
            id: SoundId::generate(),
            name: display_name(&original_name),
            original_name,
            locator,
            color,
            category_id: CategoryId::uncategorized(),
            provenance,
            load_state,
        }
    }

    pub fn id(&self) -> &SoundId {
        &self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File name the sound was created from
    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub fn color(&self) -> ColorTag {
        self.color
    }

    pub fn category_id(&self) -> &CategoryId {
        &self.category_id
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn phase(&self) -> LoadPhase {
        self.load_state.phase()
    }

    pub fn is_ready(&self) -> bool {
        self.phase() == LoadPhase::Ready
    }

    /// Buffer handle (only present when ready)
    pub fn player_handle(&self) -> Option<&PlayerHandle> {
        self.load_state.handle()
    }

    /// Rename the sound
    ///
    /// Blank input keeps the current name. Returns whether the name changed.
    pub fn rename(&mut self, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() || trimmed == self.name {
            return false;
        }
        self.name = trimmed.to_string();
        true
    }

    pub fn set_color(&mut self, color: ColorTag) {
        self.color = color;
    }

    /// Point the sound at another category
    ///
    /// The caller is responsible for the category existing.
    pub fn assign_category(&mut self, category_id: CategoryId) {
        self.category_id = category_id;
    }

    /// `NotLoaded -> Loading`
    pub fn begin_loading(&mut self) -> Result<()> {
        match self.load_state {
            LoadState::NotLoaded => {
                self.load_state = LoadState::Loading;
                Ok(())
            }
            _ => Err(self.invalid_transition(LoadPhase::Loading)),
        }
    }

    /// `Loading -> Ready | Failed`
    ///
    /// Returns the phase the sound ended up in.
    pub fn finish_loading(&mut self, outcome: LoadOutcome) -> Result<LoadPhase> {
        if !matches!(self.load_state, LoadState::Loading) {
            return Err(self.invalid_transition(outcome.phase()));
        }

        self.load_state = match outcome {
            LoadOutcome::Ready(handle) => LoadState::Ready(handle),
            LoadOutcome::Failed(reason) => LoadState::Failed { reason },
        };
        Ok(self.phase())
    }

    fn invalid_transition(&self, to: LoadPhase) -> SoundboardError {
        SoundboardError::InvalidTransition {
            id: self.id.clone(),
            from: self.phase(),
            to,
        }
    }
}
