//! Shared test helpers
//!
//! `ScriptedEngine` is an in-memory audio engine whose answers are scripted
//! per locator. It never touches real audio.

#![allow(dead_code)]

use async_trait::async_trait;
use soundboard_catalog::Soundboard;
use soundboard_core::{
    AudioEngine, LoadOutcome, Locator, PlayerHandle, Result, SoundId, SoundboardError,
    UploadedFile,
};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Default)]
struct EngineState {
    active: bool,
    activation_failures: usize,
    batch_failure: Option<String>,
    failing: HashSet<String>,
    omitted: HashSet<String>,
    next_handle: u64,
    playing: HashSet<u64>,
    released: Vec<Locator>,
    batch_calls: Vec<Vec<SoundId>>,
    single_calls: Vec<Locator>,
}

/// Audio engine with scripted per-locator answers
#[derive(Default)]
pub struct ScriptedEngine {
    state: Mutex<EngineState>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine that is already active
    pub fn active() -> Self {
        let engine = Self::new();
        engine.state.lock().unwrap().active = true;
        engine
    }

    /// Fail the next `count` activation attempts
    pub fn fail_activation(&self, count: usize) {
        self.state.lock().unwrap().activation_failures = count;
    }

    /// Make every batch call fail wholesale
    pub fn fail_batches(&self, reason: &str) {
        self.state.lock().unwrap().batch_failure = Some(reason.to_string());
    }

    /// Make loads of this locator fail
    pub fn fail_locator(&self, locator: &Locator) {
        self.state.lock().unwrap().failing.insert(locator.to_string());
    }

    /// Leave this locator out of batch answers
    pub fn omit_locator(&self, locator: &Locator) {
        self.state.lock().unwrap().omitted.insert(locator.to_string());
    }

    pub fn released(&self) -> Vec<Locator> {
        self.state.lock().unwrap().released.clone()
    }

    pub fn batch_calls(&self) -> Vec<Vec<SoundId>> {
        self.state.lock().unwrap().batch_calls.clone()
    }

    pub fn single_calls(&self) -> Vec<Locator> {
        self.state.lock().unwrap().single_calls.clone()
    }

    pub fn playing_count(&self) -> usize {
        self.state.lock().unwrap().playing.len()
    }

    fn issue_handle(state: &mut EngineState) -> PlayerHandle {
        state.next_handle += 1;
        PlayerHandle::new(state.next_handle)
    }
}

#[async_trait]
impl AudioEngine for ScriptedEngine {
    fn is_active(&self) -> bool {
        self.state.lock().unwrap().active
    }

    async fn activate(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.activation_failures > 0 {
            state.activation_failures -= 1;
            return Err(SoundboardError::engine("audio context refused to start"));
        }
        state.active = true;
        Ok(())
    }

    async fn load_batch(
        &self,
        requests: HashMap<SoundId, Locator>,
    ) -> Result<HashMap<SoundId, LoadOutcome>> {
        let mut state = self.state.lock().unwrap();
        let mut ids: Vec<SoundId> = requests.keys().cloned().collect();
        ids.sort();
        state.batch_calls.push(ids);

        if let Some(reason) = &state.batch_failure {
            return Err(SoundboardError::engine(reason.clone()));
        }

        let mut answers = HashMap::new();
        for (id, locator) in requests {
            let key = locator.to_string();
            if state.omitted.contains(&key) {
                continue;
            }
            let outcome = if state.failing.contains(&key) {
                LoadOutcome::Failed(format!("could not decode {key}"))
            } else {
                LoadOutcome::Ready(Self::issue_handle(&mut state))
            };
            answers.insert(id, outcome);
        }
        Ok(answers)
    }

    async fn load_one(&self, locator: &Locator) -> Result<PlayerHandle> {
        let mut state = self.state.lock().unwrap();
        state.single_calls.push(locator.clone());

        if state.failing.contains(&locator.to_string()) {
            return Err(SoundboardError::engine(format!("could not decode {locator}")));
        }
        Ok(Self::issue_handle(&mut state))
    }

    fn start(&self, handle: &PlayerHandle) -> Result<()> {
        self.state.lock().unwrap().playing.insert(handle.raw());
        Ok(())
    }

    fn stop(&self, handle: &PlayerHandle) {
        self.state.lock().unwrap().playing.remove(&handle.raw());
    }

    fn is_playing(&self, handle: &PlayerHandle) -> bool {
        self.state.lock().unwrap().playing.contains(&handle.raw())
    }

    fn release(&self, locator: &Locator) {
        self.state.lock().unwrap().released.push(locator.clone());
    }
}

/// Soundboard with the given manifest registered and events drained
pub fn board_with(files: &[&str]) -> Soundboard {
    let mut board = Soundboard::default();
    board.register_manifest(files);
    board.drain_events();
    board
}

pub fn provisioned_locator(board: &Soundboard, file_name: &str) -> Locator {
    board.sounds().config().provisioned_locator(file_name)
}

pub fn ogg_upload(name: &str) -> UploadedFile {
    UploadedFile::new(name, "audio/ogg", Locator::Blob(format!("upload-{name}")))
}

pub fn id_of(board: &Soundboard, name: &str) -> SoundId {
    board
        .sounds()
        .iter()
        .find(|s| s.name() == name)
        .map(|s| s.id().clone())
        .unwrap_or_else(|| panic!("no sound named {name}"))
}
