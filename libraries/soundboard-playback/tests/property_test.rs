//! Property-based tests for the load state machine
//!
//! Random mixes of batch loads, uploads and engine failures must only ever
//! move sounds along `NotLoaded -> Loading -> Ready | Failed`, and a player
//! handle must exist exactly when a sound is `Ready`.

mod common;

use common::{ogg_upload, ScriptedEngine};
use proptest::prelude::*;
use soundboard_catalog::Soundboard;
use soundboard_core::{LoadPhase, SoundId};
use soundboard_playback::{LoadPipeline, LoadStatus};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum Step {
    Provision(String, bool),
    Upload(String, bool),
    Claim,
    Finish,
    FailNextBatches,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        ("[a-z]{1,6}", any::<bool>()).prop_map(|(n, fail)| Step::Provision(n, fail)),
        ("[a-z]{1,6}", any::<bool>()).prop_map(|(n, fail)| Step::Upload(n, fail)),
        Just(Step::Claim),
        Just(Step::Finish),
        Just(Step::FailNextBatches),
    ]
}

fn allowed(from: LoadPhase, to: LoadPhase) -> bool {
    from == to
        || matches!(
            (from, to),
            (LoadPhase::NotLoaded, LoadPhase::Loading)
                | (LoadPhase::Loading, LoadPhase::Ready)
                | (LoadPhase::Loading, LoadPhase::Failed)
        )
}

fn phases(board: &Soundboard) -> HashMap<SoundId, LoadPhase> {
    board
        .sounds()
        .iter()
        .map(|s| (s.id().clone(), s.phase()))
        .collect()
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime")
}

proptest! {
    #[test]
    fn load_states_follow_the_state_machine(steps in prop::collection::vec(step(), 1..30)) {
        let rt = runtime();
        let engine = Arc::new(ScriptedEngine::active());
        let pipeline = LoadPipeline::new(engine.clone());
        let mut board = Soundboard::default();
        let mut in_flight = Vec::new();

        for step in steps {
            let before = phases(&board);

            match step {
                Step::Provision(name, fail) => {
                    let file = format!("{name}.ogg");
                    if fail {
                        engine.fail_locator(&board.sounds().config().provisioned_locator(&file));
                    }
                    board.register_provisioned(&file).unwrap();
                }
                Step::Upload(name, fail) => {
                    let upload = ogg_upload(&format!("{name}.ogg"));
                    if fail {
                        engine.fail_locator(&upload.locator);
                    }
                    let intake = pipeline.register_uploads(&mut board, vec![upload]);
                    for request in intake.accepted {
                        let outcome = rt.block_on(pipeline.execute_upload(request));
                        pipeline.apply_upload(&mut board, outcome);
                    }
                }
                Step::Claim => {
                    if let Some(batch) = pipeline.claim_pending(&mut board) {
                        in_flight.push(batch);
                    }
                }
                Step::Finish => {
                    if !in_flight.is_empty() {
                        let batch = in_flight.remove(0);
                        let outcome = rt.block_on(pipeline.execute(batch));
                        pipeline.apply(&mut board, outcome);
                    }
                }
                Step::FailNextBatches => engine.fail_batches("engine down"),
            }

            for sound in board.sounds().iter() {
                if let Some(&from) = before.get(sound.id()) {
                    prop_assert!(
                        allowed(from, sound.phase()),
                        "illegal transition {} -> {}",
                        from,
                        sound.phase()
                    );
                }
                prop_assert_eq!(sound.player_handle().is_some(), sound.phase() == LoadPhase::Ready);
                prop_assert_eq!(
                    sound.load_state().failure_reason().is_some(),
                    sound.phase() == LoadPhase::Failed
                );
            }

            let status = LoadStatus::from_sounds(board.sounds().iter());
            prop_assert_eq!(
                status.not_loaded + status.loading + status.ready + status.failed,
                status.total
            );
        }
    }
}
