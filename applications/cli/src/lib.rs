//! Soundboard CLI
//!
//! Headless driver around the soundboard libraries: loads configuration,
//! reads the manifest, probes clips on disk and plays them on an engine
//! that never touches an audio device.

pub mod app;
pub mod config;
pub mod engine;
pub mod error;

pub use app::App;
pub use config::CliConfig;
pub use engine::HeadlessEngine;
pub use error::{CliError, Result};
