/// Core traits for Soundboard
use crate::error::Result;
use crate::types::{LoadOutcome, Locator, PlayerHandle, SoundId};
use async_trait::async_trait;
use std::collections::HashMap;

/// Audio engine collaborator
///
/// Implementers decode clips into playable buffers and start/stop them. The
/// catalog never touches audio data directly; it only holds the
/// [`PlayerHandle`]s this trait hands out.
///
/// Load calls are the only suspension points of the soundboard. There is no
/// timeout or cancellation: a load runs until the engine answers.
#[async_trait]
pub trait AudioEngine: Send + Sync {
    /// Whether the audio subsystem has been activated
    fn is_active(&self) -> bool;

    /// Activate the audio subsystem
    ///
    /// Invoked on the first user gesture. Activating an already-active engine is a no-op.
    ///
    /// # Errors
    /// Returns an error if the platform refuses to start audio
    async fn activate(&self) -> Result<()>;

    /// Load a set of clips keyed by sound id
    ///
    /// Each entry gets its own outcome; an id missing from the returned map
    /// counts as failed.
    ///
    /// # Errors
    /// An error means the whole batch failed
    async fn load_batch(
        &self,
        requests: HashMap<SoundId, Locator>,
    ) -> Result<HashMap<SoundId, LoadOutcome>>;

    /// Load a single clip
    ///
    /// # Errors
    /// Returns an error if the clip could not be fetched or decoded
    async fn load_one(&self, locator: &Locator) -> Result<PlayerHandle>;

    /// Start a loaded buffer from the beginning
    ///
    /// Starting a buffer that is already playing restarts it.
    fn start(&self, handle: &PlayerHandle) -> Result<()>;

    /// Stop a buffer (no-op when not playing)
    fn stop(&self, handle: &PlayerHandle);

    /// Whether the buffer is currently playing
    fn is_playing(&self, handle: &PlayerHandle) -> bool;

    /// Release an ephemeral locator (uploaded blob)
    ///
    /// Called once an upload has failed to load, since it will not be retried.
    fn release(&self, locator: &Locator) {
        let _ = locator;
    }
}
