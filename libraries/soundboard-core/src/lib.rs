//! Soundboard Core
//!
//! Core types, traits, and error handling shared by every Soundboard crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Sound`, `Category`, `LoadState`, `ColorTag`, `Locator`
//! - **Core Traits**: `AudioEngine`
//! - **Error Handling**: Unified `SoundboardError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use soundboard_core::types::{ColorTag, Locator, LoadPhase, Sound};
//! use std::path::PathBuf;
//!
//! let sound = Sound::provisioned(
//!     "--Air-Horn.ogg",
//!     Locator::Path(PathBuf::from("sounds/--Air-Horn.ogg")),
//!     ColorTag::Blue,
//! );
//!
//! assert_eq!(sound.name(), "Air Horn");
//! assert_eq!(sound.phase(), LoadPhase::NotLoaded);
//! assert!(sound.category_id().is_uncategorized());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod naming;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SoundboardError};
pub use traits::AudioEngine;

pub use types::{
    Category, CategoryId, ColorTag, LoadOutcome, LoadPhase, LoadState, Locator, PlayerHandle,
    Provenance, Sound, SoundId, UploadedFile,
};
