/// Core error types for Soundboard
use thiserror::Error;
use crate::types::{CategoryId, LoadPhase, SoundId};

/// Result type alias using `SoundboardError`
pub type Result<T> = std::result::Result<T, SoundboardError>;

/// Core error type for Soundboard
#[derive(Error, Debug)]
pub enum SoundboardError {
    /// Name is blank after trimming
    #[error("Name cannot be empty")]
    EmptyName,

    /// Another category already uses this name (case-insensitive)
    #[error("Category name already exists: {0}")]
    DuplicateName(String),

    /// Category cannot be renamed
    #[error("Category cannot be edited: {0}")]
    NotEditable(CategoryId),

    /// Category cannot be deleted (protected or unknown)
    #[error("Category cannot be deleted: {0}")]
    NotDeletable(CategoryId),

    /// Category not found
    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// Sound not found
    #[error("Sound not found: {0}")]
    SoundNotFound(SoundId),

    /// Upload rejected because of its media type
    #[error("File \"{file_name}\" is not a supported audio file ({media_type}) and was skipped")]
    UnsupportedFormat {
        file_name: String,
        media_type: String,
    },

    /// Audio subsystem has not been activated yet
    #[error("Audio not active. Interact with the soundboard to enable it")]
    AudioNotReady,

    /// Sound is not ready to play
    #[error("Sound is not loaded: {0}")]
    NotLoaded(SoundId),

    /// Load state change outside the state machine
    #[error("Invalid load transition for {id}: {from} -> {to}")]
    InvalidTransition {
        id: SoundId,
        from: LoadPhase,
        to: LoadPhase,
    },

    /// Audio engine errors
    #[error("Audio engine error: {0}")]
    Engine(String),

    /// Manifest could not be parsed
    #[error("Invalid manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SoundboardError {
    /// Create an audio engine error
    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }

    /// Create an unsupported format error
    pub fn unsupported_format(file_name: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            file_name: file_name.into(),
            media_type: media_type.into(),
        }
    }

    /// Whether this is a user input validation failure
    ///
    /// Validation failures are reported back to the user as warnings.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyName | Self::DuplicateName(_) | Self::UnsupportedFormat { .. }
        )
    }
}
