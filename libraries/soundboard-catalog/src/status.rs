//! Catalog-wide load status

use serde::{Deserialize, Serialize};
use soundboard_core::{LoadPhase, Sound};

/// Load counts across the whole catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStatus {
    pub not_loaded: usize,
    pub loading: usize,
    pub ready: usize,
    pub failed: usize,
    pub total: usize,
}

impl LoadStatus {
    /// Count load phases over a set of sounds
    pub fn from_sounds<'a>(sounds: impl IntoIterator<Item = &'a Sound>) -> Self {
        sounds
            .into_iter()
            .fold(Self::default(), |mut status, sound| {
                match sound.phase() {
                    LoadPhase::NotLoaded => status.not_loaded += 1,
                    LoadPhase::Loading => status.loading += 1,
                    LoadPhase::Ready => status.ready += 1,
                    LoadPhase::Failed => status.failed += 1,
                }
                status.total += 1;
                status
            })
    }

    /// No load is in flight
    pub fn is_settled(&self) -> bool {
        self.loading == 0
    }

    /// User-facing status line
    ///
    /// `None` while anything is still loading.
    pub fn message(&self) -> Option<String> {
        if !self.is_settled() {
            return None;
        }

        let message = if self.failed > 0 {
            format!("Some sounds failed. {}/{} ready.", self.ready, self.total)
        } else if self.total == 0 {
            "No sounds loaded.".to_string()
        } else if self.ready == self.total {
            format!("All {} sounds loaded & ready!", self.ready)
        } else {
            format!("{}/{} sounds processed.", self.ready, self.total)
        };
        Some(message)
    }
}
