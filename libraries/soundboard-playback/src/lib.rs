//! Soundboard - Load Pipeline and Playback
//!
//! Moves sounds through their load state machine and starts/stops them on an
//! [`AudioEngine`](soundboard_core::AudioEngine).
//!
//! This crate provides:
//! - Batch loading of provisioned sounds, one engine call per batch
//! - Individual loading of user uploads, with release of failed uploads
//! - Catalog-wide load status after every batch of transitions
//! - Play / stop / stop-all, gated on audio activation
//!
//! # Architecture
//!
//! The pipeline never holds the [`Soundboard`](soundboard_catalog::Soundboard)
//! across an await. Loads are split into claim / execute / apply, so the
//! caller can keep handling input (and uploads) while a batch is in flight:
//!
//! ```rust,ignore
//! let batch = pipeline.claim_pending(&mut board);
//! // ... board stays usable here ...
//! if let Some(batch) = batch {
//!     let outcome = pipeline.execute(batch).await;
//!     let report = pipeline.apply(&mut board, outcome);
//!     println!("{:?}", report.status.message());
//! }
//! ```

mod controller;
mod pipeline;

pub use controller::{
    AudioActivation, PlaybackController, PressOutcome, StopSummary, ACTIVATION_PROMPT,
};
pub use pipeline::{
    BatchOutcome, LoadBatch, LoadPipeline, LoadReport, UploadIntake, UploadOutcome, UploadReport,
    UploadRequest, NO_BUFFER_REASON,
};
pub use soundboard_catalog::LoadStatus;
