//! Playback controller - starts and stops loaded sounds

use serde::Serialize;
use soundboard_catalog::Soundboard;
use soundboard_core::{AudioEngine, Result, SoundId, SoundboardError};
use std::sync::Arc;

/// Prompt shown until the audio subsystem has been activated
pub const ACTIVATION_PROMPT: &str = "Click anywhere or a button to enable audio.";

/// Result of a user gesture on the audio subsystem
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AudioActivation {
    /// Audio was already running
    AlreadyActive,

    /// Audio was started by this gesture
    Activated,

    /// The platform refused; the next gesture tries again
    Failed(String),
}

impl AudioActivation {
    pub fn is_active(&self) -> bool {
        !matches!(self, AudioActivation::Failed(_))
    }

    /// Status line for the render surface
    pub fn message(&self) -> Option<&'static str> {
        match self {
            AudioActivation::AlreadyActive => None,
            AudioActivation::Activated => Some("Audio active. Loading sounds..."),
            AudioActivation::Failed(_) => Some("Failed to start audio. Please try again."),
        }
    }
}

/// How many sounds a stop-all actually stopped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StopSummary {
    pub stopped: usize,
}

impl StopSummary {
    pub fn message(&self) -> &'static str {
        if self.stopped > 0 {
            "All sounds stopped."
        } else {
            "No sounds were playing."
        }
    }
}

/// What pressing a sound button did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PressOutcome {
    /// The sound was started
    Played(SoundId),

    /// Edit mode is on; the caller should open the editor for this sound
    Edit(SoundId),
}

/// Starts and stops sounds on the audio engine
pub struct PlaybackController {
    engine: Arc<dyn AudioEngine>,
}

impl PlaybackController {
    pub fn new(engine: Arc<dyn AudioEngine>) -> Self {
        Self { engine }
    }

    pub fn is_audio_active(&self) -> bool {
        self.engine.is_active()
    }

    /// Activate audio on a user gesture
    ///
    /// Safe to call on every gesture: an active engine is left alone.
    pub async fn on_user_gesture(&self) -> AudioActivation {
        if self.engine.is_active() {
            return AudioActivation::AlreadyActive;
        }

        match self.engine.activate().await {
            Ok(()) => {
                tracing::info!("Audio subsystem activated");
                AudioActivation::Activated
            }
            Err(err) => {
                tracing::warn!("Audio activation failed: {}", err);
                AudioActivation::Failed(err.to_string())
            }
        }
    }

    /// Start a sound from the beginning
    ///
    /// Starting a sound that is already playing restarts it.
    ///
    /// # Errors
    /// `AudioNotReady` before activation, `SoundNotFound`, `NotLoaded` unless
    /// the sound is `Ready`
    pub fn play(&self, board: &Soundboard, id: &SoundId) -> Result<()> {
        if !self.engine.is_active() {
            return Err(SoundboardError::AudioNotReady);
        }

        let sound = board
            .sound(id)
            .ok_or_else(|| SoundboardError::SoundNotFound(id.clone()))?;
        let handle = sound
            .player_handle()
            .ok_or_else(|| SoundboardError::NotLoaded(id.clone()))?;

        tracing::debug!("Playing '{}' ({})", sound.name(), id);
        self.engine.start(handle)
    }

    /// Route a sound button press
    ///
    /// Opens the editor in edit mode, plays the sound otherwise.
    pub fn press(&self, board: &Soundboard, id: &SoundId) -> Result<PressOutcome> {
        if board.is_edit_mode() {
            if board.sound(id).is_none() {
                return Err(SoundboardError::SoundNotFound(id.clone()));
            }
            return Ok(PressOutcome::Edit(id.clone()));
        }

        self.play(board, id)?;
        Ok(PressOutcome::Played(id.clone()))
    }

    /// Stop one sound if it is playing
    ///
    /// Returns whether anything was stopped.
    pub fn stop(&self, board: &Soundboard, id: &SoundId) -> bool {
        match board.sound(id).and_then(|sound| sound.player_handle()) {
            Some(handle) if self.engine.is_playing(handle) => {
                self.engine.stop(handle);
                true
            }
            _ => false,
        }
    }

    /// Stop every playing sound
    pub fn stop_all(&self, board: &Soundboard) -> StopSummary {
        if !self.engine.is_active() {
            return StopSummary::default();
        }

        let mut summary = StopSummary::default();
        for handle in board.sounds().iter().filter_map(|sound| sound.player_handle()) {
            if self.engine.is_playing(handle) {
                self.engine.stop(handle);
                summary.stopped += 1;
            }
        }

        tracing::debug!("Stopped {} sound(s)", summary.stopped);
        summary
    }
}
