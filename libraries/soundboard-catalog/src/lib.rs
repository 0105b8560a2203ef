//! Soundboard Catalog
//!
//! Owns the sound catalog, the category registry and the current view
//! selection, and derives the ordered display list from them.
//!
//! # Example
//!
//! ```rust
//! use soundboard_catalog::{SortMode, Soundboard, SoundUpdate};
//!
//! let mut board = Soundboard::default();
//! let ids = board.register_manifest(["--Air-Horn.ogg", "boo_sound.ogg"]);
//!
//! let sfx = board.create_category("SFX").unwrap();
//! board
//!     .update_sound(&ids[1], SoundUpdate::default().category(sfx))
//!     .unwrap();
//!
//! board.set_sort(SortMode::NameDescending);
//! let names: Vec<&str> = board.projection().iter().map(|s| s.name()).collect();
//! assert_eq!(names, vec!["Boo Sound", "Air Horn"]);
//! ```

#![forbid(unsafe_code)]

pub mod board;
pub mod catalog;
pub mod config;
pub mod events;
pub mod manifest;
pub mod projector;
pub mod registry;
pub mod status;

pub use board::Soundboard;
pub use catalog::{MetadataOutcome, SoundCatalog, SoundUpdate};
pub use config::CatalogConfig;
pub use events::CatalogEvent;
pub use manifest::parse_manifest;
pub use projector::{project, CategoryFilter, SortMode, ViewCriteria};
pub use registry::{CategoryRegistry, UNKNOWN_CATEGORY_NAME};
pub use status::LoadStatus;
