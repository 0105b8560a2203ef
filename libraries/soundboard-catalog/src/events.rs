//! Catalog Events
//!
//! Every mutation of the soundboard pushes one or more events onto a pending
//! queue. The render surface drains them and decides when to recompute the
//! projection and redraw.

use crate::status::LoadStatus;
use serde::{Deserialize, Serialize};
use soundboard_core::{CategoryId, LoadPhase, SoundId};

/// Events emitted by the soundboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogEvent {
    /// New sounds were added to the catalog
    SoundsRegistered {
        /// IDs of the new sounds, in catalog order
        ids: Vec<SoundId>,
    },

    /// An upload was refused at intake
    UploadRejected {
        /// File name of the rejected upload
        file_name: String,
        /// Why it was refused (user-facing)
        message: String,
    },

    /// Name, color, or category of a sound changed
    SoundUpdated {
        /// ID of the edited sound
        id: SoundId,
    },

    /// A sound moved to another load phase
    LoadStateChanged {
        /// ID of the sound
        id: SoundId,
        /// The phase it is in now
        phase: LoadPhase,
    },

    /// A category was created
    CategoryCreated {
        /// ID of the new category
        id: CategoryId,
    },

    /// A category was renamed
    CategoryRenamed {
        /// ID of the renamed category
        id: CategoryId,
    },

    /// A category was deleted
    CategoryDeleted {
        /// ID of the removed category
        id: CategoryId,
        /// Sounds moved to "Uncategorized"
        reassigned: usize,
    },

    /// Filter, search term, or sort mode changed
    CriteriaChanged,

    /// Edit mode was toggled
    EditModeChanged {
        /// Whether edit mode is now on
        enabled: bool,
    },

    /// Catalog-wide load counts after a batch of transitions
    StatusChanged {
        /// Current counts
        status: LoadStatus,
    },
}

impl CatalogEvent {
    /// Whether the display list may look different after this event
    pub fn affects_projection(&self) -> bool {
        !matches!(
            self,
            CatalogEvent::UploadRejected { .. } | CatalogEvent::StatusChanged { .. }
        )
    }
}
