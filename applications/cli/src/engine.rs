//! Headless audio engine
//!
//! Probes clips on disk instead of decoding them and keeps "playing" buffers
//! as an in-memory set. Nothing is ever sent to an audio device.

use async_trait::async_trait;
use soundboard_core::{
    AudioEngine, LoadOutcome, Locator, PlayerHandle, Result, SoundId, SoundboardError,
};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::io::AsyncReadExt;

/// First bytes of every Ogg page
const OGG_CAPTURE_PATTERN: [u8; 4] = *b"OggS";

/// Audio engine that validates clip files without playing them
#[derive(Default)]
pub struct HeadlessEngine {
    active: AtomicBool,
    next_handle: AtomicU64,
    playing: Mutex<HashSet<u64>>,
    blobs: Mutex<HashMap<String, PathBuf>>,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand a local file to the engine as an ephemeral upload
    pub fn stage_upload(&self, path: &Path) -> Locator {
        let key = format!("upload-{}", self.next_handle.fetch_add(1, Ordering::Relaxed));
        lock(&self.blobs).insert(key.clone(), path.to_path_buf());
        Locator::Blob(key)
    }

    /// Number of uploads not yet released
    pub fn staged_uploads(&self) -> usize {
        lock(&self.blobs).len()
    }

    fn resolve(&self, locator: &Locator) -> Result<PathBuf> {
        match locator {
            Locator::Path(path) => Ok(path.clone()),
            Locator::Blob(key) => lock(&self.blobs)
                .get(key)
                .cloned()
                .ok_or_else(|| SoundboardError::engine(format!("Unknown upload {}", locator))),
        }
    }

    async fn probe(&self, locator: &Locator) -> Result<PlayerHandle> {
        let path = self.resolve(locator)?;

        let mut file = tokio::fs::File::open(&path).await?;
        let mut magic = [0u8; 4];
        file.read_exact(&mut magic).await.map_err(|_| {
            SoundboardError::engine(format!("{} is too short to be audio", path.display()))
        })?;
        if magic != OGG_CAPTURE_PATTERN {
            return Err(SoundboardError::engine(format!(
                "{} is not an Ogg stream",
                path.display()
            )));
        }

        let handle = PlayerHandle::new(self.next_handle.fetch_add(1, Ordering::Relaxed));
        tracing::debug!("Probed {} as buffer {}", path.display(), handle.raw());
        Ok(handle)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl AudioEngine for HeadlessEngine {
    fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    async fn activate(&self) -> Result<()> {
        self.active.store(true, Ordering::Release);
        Ok(())
    }

    async fn load_batch(
        &self,
        requests: HashMap<SoundId, Locator>,
    ) -> Result<HashMap<SoundId, LoadOutcome>> {
        let mut answers = HashMap::with_capacity(requests.len());
        for (id, locator) in requests {
            let outcome = match self.probe(&locator).await {
                Ok(handle) => LoadOutcome::Ready(handle),
                Err(err) => LoadOutcome::Failed(err.to_string()),
            };
            answers.insert(id, outcome);
        }
        Ok(answers)
    }

    async fn load_one(&self, locator: &Locator) -> Result<PlayerHandle> {
        self.probe(locator).await
    }

    fn start(&self, handle: &PlayerHandle) -> Result<()> {
        if !self.is_active() {
            return Err(SoundboardError::AudioNotReady);
        }
        lock(&self.playing).insert(handle.raw());
        Ok(())
    }

    fn stop(&self, handle: &PlayerHandle) {
        lock(&self.playing).remove(&handle.raw());
    }

    fn is_playing(&self, handle: &PlayerHandle) -> bool {
        lock(&self.playing).contains(&handle.raw())
    }

    fn release(&self, locator: &Locator) {
        if let Locator::Blob(key) = locator {
            lock(&self.blobs).remove(key);
        }
    }
}
