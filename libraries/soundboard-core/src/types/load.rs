//! Load state machine types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque ownership of a ready-to-play buffer
///
/// Issued by the audio engine and owned by exactly one sound. Deliberately
/// neither `Clone` nor `Copy`: the engine only ever borrows it.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct PlayerHandle(u64);

impl PlayerHandle {
    /// Wrap an engine-issued buffer key
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Engine-issued buffer key
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Load state of a sound
///
/// The handle lives inside `Ready`, so a handle can never exist in any other state.
#[derive(Debug, PartialEq, Eq)]
pub enum LoadState {
    /// Registered, not yet claimed by the load pipeline
    NotLoaded,

    /// A load request is in flight
    Loading,

    /// Buffer loaded and playable
    Ready(PlayerHandle),

    /// Load failed; stays failed until the sound is registered again
    Failed {
        /// What went wrong, for display
        reason: String,
    },
}

impl LoadState {
    /// Payload-free view of the state
    pub fn phase(&self) -> LoadPhase {
        match self {
            LoadState::NotLoaded => LoadPhase::NotLoaded,
            LoadState::Loading => LoadPhase::Loading,
            LoadState::Ready(_) => LoadPhase::Ready,
            LoadState::Failed { .. } => LoadPhase::Failed,
        }
    }

    /// Player handle, present only when ready
    pub fn handle(&self) -> Option<&PlayerHandle> {
        match self {
            LoadState::Ready(handle) => Some(handle),
            _ => None,
        }
    }

    /// Failure reason, present only when failed
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            LoadState::Failed { reason } => Some(reason),
            _ => None,
        }
    }
}

/// Load state without payload (for events, counting, and errors)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPhase {
    NotLoaded,
    Loading,
    Ready,
    Failed,
}

impl LoadPhase {
    /// Whether no further transition can happen for this registration
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoadPhase::Ready | LoadPhase::Failed)
    }
}

impl fmt::Display for LoadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoadPhase::NotLoaded => "not loaded",
            LoadPhase::Loading => "loading",
            LoadPhase::Ready => "ready",
            LoadPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Result of loading one clip, as reported by the audio engine
#[derive(Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Buffer loaded
    Ready(PlayerHandle),

    /// Buffer did not load
    Failed(String),
}

impl LoadOutcome {
    /// Phase this outcome moves a sound into
    pub fn phase(&self) -> LoadPhase {
        match self {
            LoadOutcome::Ready(_) => LoadPhase::Ready,
            LoadOutcome::Failed(_) => LoadPhase::Failed,
        }
    }
}
