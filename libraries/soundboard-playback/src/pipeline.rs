//! Load pipeline
//!
//! Drives every sound through `NotLoaded -> Loading -> Ready | Failed`.
//!
//! Each load is split into three phases so the soundboard is never borrowed
//! across an await:
//!
//! 1. **claim** (sync): pick the sounds to load and mark them `Loading`
//! 2. **execute** (async): talk to the audio engine, nothing else
//! 3. **apply** (sync): record every outcome and publish the load status
//!
//! A provisioned batch and any number of upload loads may be in flight at the
//! same time; they cover disjoint sounds and claiming never re-selects a sound
//! that is already `Loading`.

use serde::Serialize;
use soundboard_catalog::{LoadStatus, Soundboard};
use soundboard_core::{
    AudioEngine, LoadOutcome, LoadPhase, Locator, Provenance, Sound, SoundId, SoundboardError,
    UploadedFile,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Reason recorded when the engine answers a batch without mentioning a sound
pub const NO_BUFFER_REASON: &str = "Engine returned no buffer for this sound";

/// Provisioned sounds claimed for one batch load
#[derive(Debug)]
#[must_use = "a claimed batch leaves its sounds Loading until it is applied"]
pub struct LoadBatch {
    requests: Vec<(SoundId, Locator)>,
}

impl LoadBatch {
    pub fn ids(&self) -> impl Iterator<Item = &SoundId> {
        self.requests.iter().map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// Engine answers for a batch, one per claimed sound
#[derive(Debug)]
pub struct BatchOutcome {
    results: Vec<(SoundId, LoadOutcome)>,
}

/// An accepted upload waiting for its single load
///
/// Only produced by upload intake, so every upload is loaded exactly once.
#[derive(Debug)]
#[must_use = "an accepted upload stays Loading until its load is applied"]
pub struct UploadRequest {
    id: SoundId,
    locator: Locator,
}

impl UploadRequest {
    pub fn id(&self) -> &SoundId {
        &self.id
    }
}

/// Engine answer for one upload
#[derive(Debug)]
pub struct UploadOutcome {
    id: SoundId,
    locator: Locator,
    outcome: LoadOutcome,
}

/// Result of upload intake
#[derive(Debug, Default)]
pub struct UploadIntake {
    /// Accepted uploads, already `Loading`
    pub accepted: Vec<UploadRequest>,

    /// Rejected files with the reason (shown as warnings)
    pub rejected: Vec<(String, SoundboardError)>,
}

/// What an `apply` step changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub ready: Vec<SoundId>,
    pub failed: Vec<SoundId>,

    /// Catalog-wide counts after the step
    pub status: LoadStatus,
}

/// Loads sounds through the audio engine
pub struct LoadPipeline {
    engine: Arc<dyn AudioEngine>,
}

impl LoadPipeline {
    pub fn new(engine: Arc<dyn AudioEngine>) -> Self {
        Self { engine }
    }

    // ===== Provisioned batch =====

    /// Claim every provisioned sound waiting to be loaded
    ///
    /// Returns `None` when there is nothing to load.
    pub fn claim_pending(&self, board: &mut Soundboard) -> Option<LoadBatch> {
        let candidates: Vec<(SoundId, Locator)> = board
            .sounds()
            .iter()
            .filter(|sound| wants_batch_load(sound))
            .map(|sound| (sound.id().clone(), sound.locator().clone()))
            .collect();

        let mut requests = Vec::with_capacity(candidates.len());
        for (id, locator) in candidates {
            match board.begin_loading(&id) {
                Ok(()) => requests.push((id, locator)),
                Err(err) => tracing::warn!("Could not claim {} for loading: {}", id, err),
            }
        }

        if requests.is_empty() {
            return None;
        }
        tracing::debug!("Claimed {} sound(s) for batch load", requests.len());
        Some(LoadBatch { requests })
    }

    /// Run a claimed batch through the engine
    ///
    /// A failed batch call fails every sound in it. A sound the engine did
    /// not answer for fails with [`NO_BUFFER_REASON`].
    pub async fn execute(&self, batch: LoadBatch) -> BatchOutcome {
        let requests: HashMap<SoundId, Locator> = batch.requests.iter().cloned().collect();

        let results = match self.engine.load_batch(requests).await {
            Ok(mut answers) => batch
                .requests
                .into_iter()
                .map(|(id, _)| {
                    let outcome = answers
                        .remove(&id)
                        .unwrap_or_else(|| LoadOutcome::Failed(NO_BUFFER_REASON.to_string()));
                    (id, outcome)
                })
                .collect(),
            Err(err) => {
                tracing::error!("Batch load of {} sound(s) failed: {}", batch.len(), err);
                let reason = err.to_string();
                batch
                    .requests
                    .into_iter()
                    .map(|(id, _)| (id, LoadOutcome::Failed(reason.clone())))
                    .collect()
            }
        };

        BatchOutcome { results }
    }

    /// Record batch outcomes and publish the new load status
    pub fn apply(&self, board: &mut Soundboard, outcome: BatchOutcome) -> LoadReport {
        let mut report = LoadReport::default();
        for (id, result) in outcome.results {
            record(board, &id, result, &mut report);
        }
        report.status = board.publish_status();

        tracing::info!(
            "Batch load finished: {} ready, {} failed",
            report.ready.len(),
            report.failed.len()
        );
        report
    }

    /// Claim, execute and apply in one go
    pub async fn load_pending(&self, board: &mut Soundboard) -> LoadReport {
        match self.claim_pending(board) {
            Some(batch) => {
                let outcome = self.execute(batch).await;
                self.apply(board, outcome)
            }
            None => LoadReport {
                status: board.status(),
                ..LoadReport::default()
            },
        }
    }

    // ===== Uploads =====

    /// Run user uploads through intake
    ///
    /// Accepted files are registered `Loading`; rejected files leave the
    /// catalog untouched and are reported back, one entry per file.
    pub fn register_uploads<I>(&self, board: &mut Soundboard, files: I) -> UploadIntake
    where
        I: IntoIterator<Item = UploadedFile>,
    {
        let mut intake = UploadIntake::default();
        for file in files {
            let file_name = file.name.clone();
            let locator = file.locator.clone();
            match board.register_upload(file) {
                Ok(id) => intake.accepted.push(UploadRequest { id, locator }),
                Err(err) => intake.rejected.push((file_name, err)),
            }
        }
        intake
    }

    /// Load one accepted upload through the engine
    pub async fn execute_upload(&self, request: UploadRequest) -> UploadOutcome {
        let outcome = match self.engine.load_one(&request.locator).await {
            Ok(handle) => LoadOutcome::Ready(handle),
            Err(err) => LoadOutcome::Failed(err.to_string()),
        };
        UploadOutcome {
            id: request.id,
            locator: request.locator,
            outcome,
        }
    }

    /// Record an upload outcome and publish the new load status
    ///
    /// A failed upload is not retried, so its locator is released.
    pub fn apply_upload(&self, board: &mut Soundboard, outcome: UploadOutcome) -> LoadReport {
        let mut report = LoadReport::default();
        let phase = record(board, &outcome.id, outcome.outcome, &mut report);
        if phase == Some(LoadPhase::Failed) {
            self.engine.release(&outcome.locator);
        }
        report.status = board.publish_status();
        report
    }

    /// Intake, then load every accepted upload
    pub async fn load_uploads<I>(&self, board: &mut Soundboard, files: I) -> UploadReport
    where
        I: IntoIterator<Item = UploadedFile>,
    {
        let intake = self.register_uploads(board, files);
        let mut report = UploadReport {
            rejected: intake.rejected,
            loads: LoadReport::default(),
        };

        for request in intake.accepted {
            let outcome = self.execute_upload(request).await;
            let step = self.apply_upload(board, outcome);
            report.loads.ready.extend(step.ready);
            report.loads.failed.extend(step.failed);
            report.loads.status = step.status;
        }
        if report.loads.ready.is_empty() && report.loads.failed.is_empty() {
            report.loads.status = board.status();
        }
        report
    }
}

/// Result of [`LoadPipeline::load_uploads`]
#[derive(Debug, Default)]
pub struct UploadReport {
    pub rejected: Vec<(String, SoundboardError)>,
    pub loads: LoadReport,
}

/// Whether the batch loader is responsible for this sound right now
fn wants_batch_load(sound: &Sound) -> bool {
    match sound.provenance() {
        Provenance::Provisioned => {
            sound.phase() == LoadPhase::NotLoaded && sound.locator().is_valid()
        }
        // Uploads are loaded one by one at intake
        Provenance::Uploaded => false,
    }
}

fn record(
    board: &mut Soundboard,
    id: &SoundId,
    outcome: LoadOutcome,
    report: &mut LoadReport,
) -> Option<LoadPhase> {
    if let LoadOutcome::Failed(reason) = &outcome {
        tracing::warn!("Sound {} failed to load: {}", id, reason);
    }

    match board.finish_loading(id, outcome) {
        Ok(LoadPhase::Ready) => {
            report.ready.push(id.clone());
            Some(LoadPhase::Ready)
        }
        Ok(phase) => {
            report.failed.push(id.clone());
            Some(phase)
        }
        Err(err) => {
            tracing::warn!("Dropped load result for {}: {}", id, err);
            None
        }
    }
}
