//! Integration tests for the load pipeline
//!
//! Batch loading of provisioned sounds, individual upload loads, and the two
//! running side by side.

mod common;

use common::{board_with, id_of, ogg_upload, provisioned_locator, ScriptedEngine};
use soundboard_catalog::CatalogEvent;
use soundboard_core::{LoadPhase, Locator, SoundboardError, UploadedFile};
use soundboard_playback::{LoadPipeline, NO_BUFFER_REASON};
use std::sync::Arc;

fn pipeline(engine: &Arc<ScriptedEngine>) -> LoadPipeline {
    LoadPipeline::new(engine.clone())
}

// ===== Provisioned batch =====

#[tokio::test]
async fn batch_loads_every_provisioned_sound() {
    let engine = Arc::new(ScriptedEngine::active());
    let mut board = board_with(&["--Air-Horn.ogg", "boo_sound.ogg"]);

    let report = pipeline(&engine).load_pending(&mut board).await;

    assert_eq!(report.ready.len(), 2);
    assert!(report.failed.is_empty());
    assert_eq!(report.status.ready, 2);
    assert_eq!(
        report.status.message().as_deref(),
        Some("All 2 sounds loaded & ready!")
    );
    assert!(board.sounds().iter().all(|s| s.is_ready()));
    assert_eq!(engine.batch_calls().len(), 1);
    assert_eq!(engine.batch_calls()[0].len(), 2);
}

#[tokio::test]
async fn one_failure_does_not_fail_the_batch() {
    let engine = Arc::new(ScriptedEngine::active());
    let mut board = board_with(&["good.ogg", "broken.ogg", "fine.ogg"]);
    engine.fail_locator(&provisioned_locator(&board, "broken.ogg"));

    let report = pipeline(&engine).load_pending(&mut board).await;

    assert_eq!(report.ready.len(), 2);
    assert_eq!(report.failed, vec![id_of(&board, "Broken")]);

    let broken = board.sound(&id_of(&board, "Broken")).unwrap();
    assert_eq!(broken.phase(), LoadPhase::Failed);
    assert!(broken.player_handle().is_none());
    assert!(broken
        .load_state()
        .failure_reason()
        .unwrap()
        .contains("could not decode"));

    assert_eq!(
        report.status.message().as_deref(),
        Some("Some sounds failed. 2/3 ready.")
    );
}

#[tokio::test]
async fn wholesale_batch_error_fails_every_sound() {
    let engine = Arc::new(ScriptedEngine::active());
    engine.fail_batches("decoder crashed");
    let mut board = board_with(&["a.ogg", "b.ogg"]);

    let report = pipeline(&engine).load_pending(&mut board).await;

    assert!(report.ready.is_empty());
    assert_eq!(report.failed.len(), 2);
    for sound in board.sounds().iter() {
        assert_eq!(sound.phase(), LoadPhase::Failed);
        assert!(sound
            .load_state()
            .failure_reason()
            .unwrap()
            .contains("decoder crashed"));
    }
}

#[tokio::test]
async fn unanswered_sound_fails_with_no_buffer() {
    let engine = Arc::new(ScriptedEngine::active());
    let mut board = board_with(&["a.ogg", "ghost.ogg"]);
    engine.omit_locator(&provisioned_locator(&board, "ghost.ogg"));

    pipeline(&engine).load_pending(&mut board).await;

    let ghost = board.sound(&id_of(&board, "Ghost")).unwrap();
    assert_eq!(ghost.load_state().failure_reason(), Some(NO_BUFFER_REASON));
    assert!(board.sound(&id_of(&board, "A")).unwrap().is_ready());
}

#[tokio::test]
async fn failed_sounds_are_not_retried() {
    let engine = Arc::new(ScriptedEngine::active());
    let mut board = board_with(&["a.ogg", "b.ogg"]);
    engine.fail_locator(&provisioned_locator(&board, "b.ogg"));
    let pipeline = pipeline(&engine);

    pipeline.load_pending(&mut board).await;
    let second = pipeline.load_pending(&mut board).await;

    assert!(second.ready.is_empty() && second.failed.is_empty());
    assert_eq!(second.status.failed, 1);
    assert_eq!(engine.batch_calls().len(), 1);
}

#[tokio::test]
async fn claim_skips_sounds_already_loading() {
    let engine = Arc::new(ScriptedEngine::active());
    let mut board = board_with(&["a.ogg"]);
    let pipeline = pipeline(&engine);

    let batch = pipeline.claim_pending(&mut board).expect("one sound to claim");
    assert_eq!(batch.len(), 1);
    assert_eq!(batch.ids().next(), Some(&id_of(&board, "A")));

    // The claimed sound is Loading now and must not be picked up again
    assert!(pipeline.claim_pending(&mut board).is_none());

    // A blank entry never reaches the catalog, so it can't sit NotLoaded forever
    assert!(matches!(
        board.register_provisioned("   "),
        Err(SoundboardError::EmptyName)
    ));
    board.register_provisioned("b.ogg").unwrap();
    let second = pipeline.claim_pending(&mut board).expect("new sound to claim");
    assert_eq!(second.ids().next(), Some(&id_of(&board, "B")));

    let outcome = pipeline.execute(batch).await;
    let report = pipeline.apply(&mut board, outcome);
    assert_eq!(report.ready.len(), 1);
    assert_eq!(report.status.loading, 1);
    assert_eq!(report.status.not_loaded, 0);

    let outcome = pipeline.execute(second).await;
    let report = pipeline.apply(&mut board, outcome);
    assert_eq!(report.status.ready, 2);
}

#[tokio::test]
async fn empty_catalog_claims_nothing() {
    let engine = Arc::new(ScriptedEngine::active());
    let mut board = board_with(&[]);

    let report = pipeline(&engine).load_pending(&mut board).await;

    assert_eq!(report.status.total, 0);
    assert_eq!(report.status.message().as_deref(), Some("No sounds loaded."));
    assert!(engine.batch_calls().is_empty());
}

#[tokio::test]
async fn apply_publishes_status_event() {
    let engine = Arc::new(ScriptedEngine::active());
    let mut board = board_with(&["a.ogg"]);

    let report = pipeline(&engine).load_pending(&mut board).await;

    let events = board.drain_events();
    assert_eq!(
        events.last(),
        Some(&CatalogEvent::StatusChanged {
            status: report.status
        })
    );
}

// ===== Uploads =====

#[tokio::test]
async fn uploads_load_individually() {
    let engine = Arc::new(ScriptedEngine::active());
    let mut board = board_with(&[]);

    let report = pipeline(&engine)
        .load_uploads(&mut board, vec![ogg_upload("one.ogg"), ogg_upload("two.ogg")])
        .await;

    assert!(report.rejected.is_empty());
    assert_eq!(report.loads.ready.len(), 2);
    assert_eq!(engine.single_calls().len(), 2);
    assert!(engine.batch_calls().is_empty());
    assert!(engine.released().is_empty());
}

#[tokio::test]
async fn rejected_uploads_are_reported_per_file() {
    let engine = Arc::new(ScriptedEngine::active());
    let mut board = board_with(&["a.ogg"]);
    let files = vec![
        UploadedFile::new("clip.wav", "audio/wav", Locator::Blob("w".into())),
        ogg_upload("ok.ogg"),
        UploadedFile::new("song.mp3", "audio/mpeg", Locator::Blob("m".into())),
    ];

    let report = pipeline(&engine).load_uploads(&mut board, files).await;

    let rejected: Vec<&str> = report.rejected.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(rejected, vec!["clip.wav", "song.mp3"]);
    assert!(report
        .rejected
        .iter()
        .all(|(_, err)| matches!(err, SoundboardError::UnsupportedFormat { .. })));
    assert_eq!(board.sounds().len(), 2);
    assert_eq!(engine.single_calls().len(), 1);
}

#[tokio::test]
async fn failed_upload_releases_its_locator() {
    let engine = Arc::new(ScriptedEngine::active());
    let mut board = board_with(&[]);
    let upload = ogg_upload("corrupt.ogg");
    let locator = upload.locator.clone();
    engine.fail_locator(&locator);

    let report = pipeline(&engine).load_uploads(&mut board, vec![upload]).await;

    assert_eq!(report.loads.failed.len(), 1);
    assert_eq!(engine.released(), vec![locator]);
    assert_eq!(
        board.sound(&report.loads.failed[0]).unwrap().phase(),
        LoadPhase::Failed
    );
}

#[tokio::test]
async fn upload_and_batch_in_flight_together() {
    let engine = Arc::new(ScriptedEngine::active());
    let mut board = board_with(&["a.ogg", "b.ogg"]);
    let pipeline = pipeline(&engine);

    // Batch claimed, engine call not finished yet
    let batch = pipeline.claim_pending(&mut board).expect("batch");

    // Meanwhile an upload arrives and finishes first
    let mut intake = pipeline.register_uploads(&mut board, vec![ogg_upload("late.ogg")]);
    let request = intake.accepted.remove(0);
    assert_eq!(request.id(), &id_of(&board, "Late"));
    assert!(pipeline.claim_pending(&mut board).is_none());

    let upload = pipeline.execute_upload(request).await;
    let upload_report = pipeline.apply_upload(&mut board, upload);
    assert_eq!(upload_report.status.loading, 2);
    assert_eq!(upload_report.status.message(), None);

    let outcome = pipeline.execute(batch).await;
    let report = pipeline.apply(&mut board, outcome);
    assert_eq!(report.status.ready, 3);
    assert_eq!(
        report.status.message().as_deref(),
        Some("All 3 sounds loaded & ready!")
    );

    // Each sound was requested exactly once
    assert_eq!(engine.batch_calls()[0].len(), 2);
    assert_eq!(engine.single_calls().len(), 1);
}
