// Orchestrator tests over a scripted mock driver.
//
// These validate the content call's decode-or-fail contract, the fixed
// theme, injected ids, the best-effort image call, and the back-fill
// protocol, all without real API calls.

mod test_utils;

use std::sync::Arc;

use heritage_core::{SlideLayout, Theme};
use heritage_error::{GeminiErrorKind, GenerationErrorKind, HeritageErrorKind};
use tokio::sync::mpsc;

use test_utils::{MockDriver, MockResponse, deck_json, orchestrator};

fn generation_kind(err: &heritage_error::HeritageError) -> &GenerationErrorKind {
    match err.kind() {
        HeritageErrorKind::Generation(e) => &e.kind,
        other => panic!("expected generation error, got {:?}", other),
    }
}

#[tokio::test]
async fn content_call_decodes_slides_in_order() -> anyhow::Result<()> {
    let driver = Arc::new(MockDriver::new_success(deck_json("剪纸", 8)));
    let orchestrator = orchestrator(driver.clone());

    let presentation = orchestrator.generate_content("剪纸").await?;

    assert_eq!(presentation.slide_count(), 8);
    let ids: Vec<&str> = presentation
        .slides()
        .iter()
        .map(|s| s.id().as_str())
        .collect();
    assert_eq!(ids, vec!["s1", "s2", "s3", "s4", "s5", "s6", "s7", "s8"]);
    assert_eq!(*presentation.slides()[0].layout(), SlideLayout::Split);
    assert_eq!(*presentation.slides()[2].layout(), SlideLayout::FullImage);

    // Exactly one round trip for content.
    assert_eq!(driver.call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn content_call_fixes_theme_and_mints_fresh_ids() -> anyhow::Result<()> {
    // The mock deck suggests "modern"; assembly ignores it.
    let driver = Arc::new(MockDriver::new_success(deck_json("昆曲", 3)));
    let orchestrator = orchestrator(driver);

    let first = orchestrator.generate_content("昆曲").await?;
    let second = orchestrator.generate_content("昆曲").await?;

    assert_eq!(*first.theme(), Theme::Classical);
    assert_eq!(first.id(), "deck-1");
    assert_eq!(second.id(), "deck-2");
    Ok(())
}

#[tokio::test]
async fn fenced_responses_still_decode() -> anyhow::Result<()> {
    let fenced = format!("Here you go:\n```json\n{}\n```", deck_json("皮影戏", 2));
    let driver = Arc::new(MockDriver::new_success(fenced));

    let presentation = orchestrator(driver).generate_content("皮影戏").await?;
    assert_eq!(presentation.slide_count(), 2);
    Ok(())
}

#[tokio::test]
async fn undecodable_response_is_fatal() {
    let driver = Arc::new(MockDriver::new_success("I'd rather chat about the weather."));
    let err = orchestrator(driver)
        .generate_content("剪纸")
        .await
        .unwrap_err();
    assert!(matches!(
        generation_kind(&err),
        GenerationErrorKind::InvalidShape(_)
    ));
}

#[tokio::test]
async fn empty_deck_is_fatal() {
    let driver = Arc::new(MockDriver::new_success(
        r#"{"topic":"剪纸","theme":"classical","slides":[]}"#,
    ));
    let err = orchestrator(driver)
        .generate_content("剪纸")
        .await
        .unwrap_err();
    assert!(matches!(generation_kind(&err), GenerationErrorKind::EmptyDeck));
}

#[tokio::test]
async fn duplicate_slide_ids_are_fatal() {
    let body = r#"{"topic":"剪纸","theme":"classical","slides":[
        {"id":"s1","title":"a","content":["x"],"layout":"split"},
        {"id":"s1","title":"b","content":["y"],"layout":"centered"}
    ]}"#;
    let driver = Arc::new(MockDriver::new_success(body));
    let err = orchestrator(driver)
        .generate_content("剪纸")
        .await
        .unwrap_err();
    match generation_kind(&err) {
        GenerationErrorKind::DuplicateSlideId(id) => assert_eq!(id, "s1"),
        other => panic!("expected duplicate slide id, got {:?}", other),
    }
}

#[tokio::test]
async fn transport_failure_is_a_generation_error() {
    let driver = Arc::new(MockDriver::new_error(GeminiErrorKind::HttpError {
        status_code: 503,
        message: "overloaded".to_string(),
    }));
    let err = orchestrator(driver)
        .generate_content("剪纸")
        .await
        .unwrap_err();
    assert!(matches!(
        generation_kind(&err),
        GenerationErrorKind::Backend(_)
    ));
}

#[tokio::test]
async fn image_call_returns_reference_on_success() {
    let driver = Arc::new(MockDriver::new_image("image/png", vec![1, 2, 3]));
    let orchestrator = orchestrator(driver.clone());

    let image = orchestrator.generate_image("窗花", "剪纸").await.unwrap();
    assert_eq!(image.mime(), "image/png");
    assert_eq!(image.len(), 3);

    // The image request carries the fixed aspect ratio.
    let requests = driver.requests();
    let params = requests[0].image_output.as_ref().unwrap();
    assert_eq!(params.aspect_ratio, "16:9");
}

#[tokio::test]
async fn image_call_swallows_driver_errors() {
    let driver = Arc::new(MockDriver::new_error(GeminiErrorKind::HttpError {
        status_code: 429,
        message: "rate limited".to_string(),
    }));
    assert!(
        orchestrator(driver)
            .generate_image("窗花", "剪纸")
            .await
            .is_none()
    );
}

#[tokio::test]
async fn image_call_without_image_part_is_absent() {
    // A text-only response has no usable image payload.
    let driver = Arc::new(
        MockDriver::new_sequence(vec![])
            .with_image(MockResponse::Text("no image for you".to_string())),
    );
    assert!(
        orchestrator(driver)
            .generate_image("窗花", "剪纸")
            .await
            .is_none()
    );
}

#[tokio::test]
async fn backfill_patches_every_slide_independently() -> anyhow::Result<()> {
    let driver = Arc::new(
        MockDriver::new_sequence(vec![MockResponse::Text(deck_json("剪纸", 3))]).with_image(
            MockResponse::Image {
                mime: "image/png".to_string(),
                data: vec![7],
            },
        ),
    );
    let orchestrator = orchestrator(driver);
    let presentation = orchestrator.generate_content("剪纸").await?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    orchestrator.spawn_backfill(&presentation, &tx);
    drop(tx);

    let mut patched = Vec::new();
    while let Some(event) = rx.recv().await {
        match event {
            heritage_deck::DeckEvent::ImageReady(patch) => {
                assert_eq!(&patch.presentation_id, presentation.id());
                patched.push(patch.slide_id);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    patched.sort();
    assert_eq!(patched, vec!["s1", "s2", "s3"]);
    Ok(())
}
