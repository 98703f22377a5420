// Playback controller state-machine tests.
//
// The controller is driven the way the host loop drives it: operations
// mutate state directly, spawned work reports through the event channel,
// and each received event is handed back to `apply`.

mod test_utils;

use std::sync::Arc;
use std::time::Duration;

use heritage_core::SlideImage;
use heritage_deck::{DeckEvent, ImagePatch, PlaybackController, PlaybackState};
use heritage_error::GeminiErrorKind;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;

use test_utils::{MockDriver, MockResponse, deck_json, orchestrator};

/// Pump one event from the channel into the controller.
async fn pump(controller: &mut PlaybackController, rx: &mut UnboundedReceiver<DeckEvent>) {
    let event = timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("timed out waiting for deck event")
        .expect("event channel closed");
    controller.apply(event);
}

/// Controller presenting a freshly generated deck (content call only; the
/// driver errors on image calls so back-fill stays quiet).
async fn presenting(
    topic: &str,
    slide_count: usize,
) -> (PlaybackController, UnboundedReceiver<DeckEvent>) {
    let driver = Arc::new(MockDriver::new_sequence(vec![MockResponse::Text(
        deck_json(topic, slide_count),
    )]));
    let (mut controller, mut rx) = PlaybackController::new(orchestrator(driver));
    controller.submit(topic);
    pump(&mut controller, &mut rx).await;
    assert_eq!(controller.state(), PlaybackState::Presenting);
    (controller, rx)
}

fn patch(presentation_id: &str, slide_id: &str, byte: u8) -> DeckEvent {
    DeckEvent::ImageReady(ImagePatch {
        presentation_id: presentation_id.to_string(),
        slide_id: slide_id.to_string(),
        image: SlideImage::new("image/png", vec![byte]),
    })
}

#[tokio::test]
async fn submit_reaches_presenting_with_decoded_deck() {
    let driver = Arc::new(MockDriver::new_sequence(vec![MockResponse::Text(
        deck_json("剪纸", 8),
    )]));
    let (mut controller, mut rx) = PlaybackController::new(orchestrator(driver.clone()));

    controller.submit("剪纸");
    assert_eq!(controller.state(), PlaybackState::Generating);

    pump(&mut controller, &mut rx).await;

    assert_eq!(controller.state(), PlaybackState::Presenting);
    assert_eq!(controller.current_index(), 0);
    assert_eq!(controller.slide_count(), 8);
    assert_eq!(
        controller.current_slide().unwrap().id(),
        "s1"
    );
}

#[tokio::test]
async fn empty_topic_submit_is_a_no_op() {
    let driver = Arc::new(MockDriver::new_success(deck_json("剪纸", 8)));
    let (mut controller, mut rx) = PlaybackController::new(orchestrator(driver.clone()));

    controller.submit("   ");

    assert_eq!(controller.state(), PlaybackState::Idle);
    assert!(controller.presentation().is_none());
    assert_eq!(driver.call_count(), 0);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn submit_while_generating_is_ignored() {
    let driver = Arc::new(MockDriver::new_sequence(vec![MockResponse::Text(
        deck_json("剪纸", 2),
    )]));
    let (mut controller, mut rx) = PlaybackController::new(orchestrator(driver.clone()));

    controller.submit("剪纸");
    controller.submit("昆曲");
    assert_eq!(controller.topic(), "剪纸");

    pump(&mut controller, &mut rx).await;
    assert_eq!(controller.state(), PlaybackState::Presenting);
    assert_eq!(controller.presentation().unwrap().topic(), "剪纸");
}

#[tokio::test]
async fn navigation_clamps_to_deck_bounds() {
    let (mut controller, _rx) = presenting("剪纸", 8).await;

    // Seven advances reach the last slide; the eighth is a no-op.
    for _ in 0..7 {
        controller.next_slide();
    }
    assert_eq!(controller.current_index(), 7);
    controller.next_slide();
    assert_eq!(controller.current_index(), 7);

    // Walk back to the first slide; retreating further is a no-op.
    for _ in 0..7 {
        controller.previous_slide();
    }
    assert_eq!(controller.current_index(), 0);
    controller.previous_slide();
    assert_eq!(controller.current_index(), 0);
}

#[tokio::test]
async fn jump_ignores_out_of_range_indices() {
    let (mut controller, _rx) = presenting("剪纸", 4).await;

    controller.jump_to(2);
    assert_eq!(controller.current_index(), 2);

    controller.jump_to(99);
    assert_eq!(controller.current_index(), 2);
}

#[tokio::test]
async fn navigation_without_presentation_is_a_no_op() {
    let driver = Arc::new(MockDriver::new_error(GeminiErrorKind::EmptyResponse));
    let (mut controller, _rx) = PlaybackController::new(orchestrator(driver));

    controller.next_slide();
    controller.previous_slide();
    controller.jump_to(0);
    assert_eq!(controller.current_index(), 0);
    assert_eq!(controller.state(), PlaybackState::Idle);
}

#[tokio::test]
async fn image_merges_commute_across_slide_ids() {
    let (mut forward, _rx1) = presenting("剪纸", 3).await;
    let (mut reverse, _rx2) = presenting("剪纸", 3).await;
    let deck_id = forward.presentation().unwrap().id().clone();

    forward.apply(patch(&deck_id, "s1", 1));
    forward.apply(patch(&deck_id, "s2", 2));

    reverse.apply(patch(&deck_id, "s2", 2));
    reverse.apply(patch(&deck_id, "s1", 1));

    assert_eq!(forward.presentation(), reverse.presentation());

    // Re-applying a merge changes nothing further.
    let snapshot = forward.presentation().cloned();
    forward.apply(patch(&deck_id, "s1", 1));
    assert_eq!(forward.presentation(), snapshot.as_ref());
}

#[tokio::test]
async fn racing_refreshes_resolve_last_merge_wins() {
    let (mut controller, _rx) = presenting("剪纸", 3).await;
    let deck_id = controller.presentation().unwrap().id().clone();

    // Two refreshes for s3 whose completions arrive in reverse order: the
    // merge that executes last determines the final reference.
    controller.apply(patch(&deck_id, "s3", 2));
    controller.apply(patch(&deck_id, "s3", 1));

    let slide = controller.presentation().unwrap().slide("s3").unwrap();
    assert_eq!(slide.image().as_ref().unwrap().data(), &vec![1]);
}

#[tokio::test]
async fn failed_refresh_leaves_existing_image_untouched() {
    // Content succeeds; every image call fails.
    let (mut controller, mut rx) = presenting("剪纸", 3).await;
    let deck_id = controller.presentation().unwrap().id().clone();

    controller.apply(patch(&deck_id, "s3", 9));
    controller.refresh_image("s3");

    // The failed task sends nothing.
    assert!(
        timeout(Duration::from_millis(100), rx.recv())
            .await
            .is_err()
    );
    let slide = controller.presentation().unwrap().slide("s3").unwrap();
    assert_eq!(slide.image().as_ref().unwrap().data(), &vec![9]);
}

#[tokio::test]
async fn successful_refresh_replaces_the_image() {
    let driver = Arc::new(
        MockDriver::new_sequence(vec![MockResponse::Text(deck_json("剪纸", 3))]).with_image(
            MockResponse::Image {
                mime: "image/jpeg".to_string(),
                data: vec![42],
            },
        ),
    );
    let (mut controller, mut rx) = PlaybackController::new(orchestrator(driver));
    controller.submit("剪纸");
    pump(&mut controller, &mut rx).await;

    // Drain the three back-fill patches, then refresh one slide.
    for _ in 0..3 {
        pump(&mut controller, &mut rx).await;
    }
    controller.refresh_image("s2");
    pump(&mut controller, &mut rx).await;

    let slide = controller.presentation().unwrap().slide("s2").unwrap();
    assert_eq!(slide.image().as_ref().unwrap().mime(), "image/jpeg");
}

#[tokio::test]
async fn refresh_of_unknown_slide_is_ignored() {
    let (controller, mut rx) = presenting("剪纸", 2).await;

    controller.refresh_image("s99");
    assert!(
        timeout(Duration::from_millis(100), rx.recv())
            .await
            .is_err()
    );
}

#[tokio::test]
async fn generation_failure_enters_error_state() {
    let driver = Arc::new(MockDriver::new_error(GeminiErrorKind::HttpError {
        status_code: 500,
        message: "boom".to_string(),
    }));
    let (mut controller, mut rx) = PlaybackController::new(orchestrator(driver));

    controller.submit("剪纸");
    pump(&mut controller, &mut rx).await;

    assert_eq!(controller.state(), PlaybackState::Error);
    assert!(controller.error().is_some());
    assert!(controller.presentation().is_none());
}

#[tokio::test]
async fn error_state_allows_resubmission() {
    let driver = Arc::new(MockDriver::new_sequence(vec![
        MockResponse::Error(GeminiErrorKind::EmptyResponse),
        MockResponse::Text(deck_json("剪纸", 2)),
    ]));
    let (mut controller, mut rx) = PlaybackController::new(orchestrator(driver));

    controller.submit("剪纸");
    pump(&mut controller, &mut rx).await;
    assert_eq!(controller.state(), PlaybackState::Error);

    controller.submit("剪纸");
    pump(&mut controller, &mut rx).await;
    assert_eq!(controller.state(), PlaybackState::Presenting);
    assert!(controller.error().is_none());
}

#[tokio::test]
async fn reset_discards_deck_and_drops_stale_patches() {
    let (mut controller, _rx) = presenting("剪纸", 3).await;
    let stale_id = controller.presentation().unwrap().id().clone();

    controller.reset();
    assert_eq!(controller.state(), PlaybackState::Idle);
    assert!(controller.presentation().is_none());
    assert_eq!(controller.topic(), "");

    // A completion aimed at the discarded deck has no observable effect.
    controller.apply(patch(&stale_id, "s1", 1));
    assert!(controller.presentation().is_none());
    assert_eq!(controller.state(), PlaybackState::Idle);
}

#[tokio::test]
async fn stale_patch_never_reaches_a_replacement_deck() {
    let driver = Arc::new(
        MockDriver::new_sequence(vec![
            MockResponse::Text(deck_json("剪纸", 2)),
            MockResponse::Text(deck_json("昆曲", 2)),
        ]),
    );
    let (mut controller, mut rx) = PlaybackController::new(orchestrator(driver));

    controller.submit("剪纸");
    pump(&mut controller, &mut rx).await;
    let first_id = controller.presentation().unwrap().id().clone();

    controller.reset();
    controller.submit("昆曲");
    pump(&mut controller, &mut rx).await;

    // The old deck's patch targets the same slide id but a different deck.
    controller.apply(patch(&first_id, "s1", 7));
    let slide = controller.presentation().unwrap().slide("s1").unwrap();
    assert!(slide.image().is_none());
}

#[tokio::test]
async fn generation_resolving_after_reset_is_dropped() {
    let driver = Arc::new(MockDriver::new_sequence(vec![MockResponse::Text(
        deck_json("剪纸", 2),
    )]));
    let (mut controller, mut rx) = PlaybackController::new(orchestrator(driver));

    controller.submit("剪纸");
    controller.reset();

    // The content call still completes; its result is stale.
    pump(&mut controller, &mut rx).await;
    assert_eq!(controller.state(), PlaybackState::Idle);
    assert!(controller.presentation().is_none());
}

#[tokio::test]
async fn export_is_a_declared_stub() {
    let (mut controller, _rx) = presenting("剪纸", 2).await;

    controller.export();
    assert!(!controller.status_message().is_empty());
    assert_eq!(controller.state(), PlaybackState::Presenting);
}

#[tokio::test]
async fn fullscreen_toggles_and_resets() {
    let (mut controller, _rx) = presenting("剪纸", 2).await;

    controller.toggle_fullscreen();
    assert!(controller.fullscreen());
    controller.toggle_fullscreen();
    assert!(!controller.fullscreen());

    controller.toggle_fullscreen();
    controller.reset();
    assert!(!controller.fullscreen());
}
