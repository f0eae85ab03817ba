use crate::e2e::helpers;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use helpers::upstream::{break_speech_server, FAILING_INPUT, FAKE_MP3};
use helpers::{InlineAudioContext, TestContext, MAX_MODEL_TOKENS};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_translate_and_narrate_text(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/translate", &json!({ "text": "Hello" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    // Control tokens from the model are stripped
    assert_eq!(response.field("/status"), Some("translated"));
    assert_eq!(response.field("/translation"), Some("مرحبا"));

    assert_eq!(response.field("/audio/kind"), Some("audio"));
    assert_eq!(response.field("/audio/mime_type"), Some("audio/mpeg"));
    let audio = STANDARD
        .decode(response.field("/audio/data_base64").unwrap())
        .unwrap();
    assert_eq!(audio, FAKE_MP3);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_remove_audio_file_after_responding(ctx: &TestContext) {
    for text in ["Hello", "Good morning"] {
        ctx.client
            .post("/api/translate", &json!({ "text": text }))
            .await
            .unwrap()
            .assert_status(StatusCode::OK);
    }

    assert!(
        ctx.audio_files().is_empty(),
        "audio files left behind: {:?}",
        ctx.audio_files()
    );
}

#[test_context(InlineAudioContext)]
#[tokio::test]
async fn it_should_deliver_inline_audio(ctx: &InlineAudioContext) {
    let response = ctx
        .client
        .post("/api/translate", &json!({ "text": "Good morning" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.field("/translation"), Some("صباح الخير"));
    assert_eq!(response.field("/audio/kind"), Some("audio"));
    assert_eq!(response.field("/audio/mime_type"), Some("audio/mpeg"));

    // Nothing touches the disk in inline mode
    assert!(ctx.audio_files().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_render_translator_failure_as_data(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/translate",
            &json!({ "text": format!("Please {} now", FAILING_INPUT) }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.field("/status"), Some("failed"));
    assert_eq!(
        response.field("/translation"),
        Some("Translation Error MarianMT returned 503: Model is overloaded")
    );
    assert_eq!(response.field("/audio/kind"), Some("none"));
    assert_eq!(response.field("/audio/notice"), Some("No audio generated"));

    // Speech is never attempted after a failed translation
    let speech_requests = ctx.speech_server.received_requests().await.unwrap();
    assert!(speech_requests.is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_keep_translation_when_speech_fails(ctx: &TestContext) {
    break_speech_server(&ctx.speech_server).await;

    let response = ctx
        .client
        .post("/api/translate", &json!({ "text": "Hello" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.field("/status"), Some("translated"));
    assert_eq!(response.field("/translation"), Some("مرحبا"));
    assert_eq!(response.field("/audio/kind"), Some("none"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_truncate_input_to_model_window(ctx: &TestContext) {
    // 400 words, far fewer than the window, but dozens of pieces each
    let text = "antidisestablishmentarianism internationalization ".repeat(200);

    let response = ctx
        .client
        .post("/api/translate", &json!({ "text": text }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.field("/status"), Some("translated"));

    let model_requests = ctx.translation_server.received_requests().await.unwrap();
    assert_eq!(model_requests.len(), 1);

    let body: serde_json::Value = serde_json::from_slice(&model_requests[0].body).unwrap();
    let sent = body["inputs"].as_str().unwrap();
    assert!(text.starts_with(sent));

    // One piece per letter; one position stays reserved for the end marker
    let pieces = sent.chars().filter(|c| !c.is_whitespace()).count();
    assert_eq!(pieces, MAX_MODEL_TOKENS - 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_blank_text(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/translate", &json!({ "text": "   " }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Please enter text to translate");

    let model_requests = ctx.translation_server.received_requests().await.unwrap();
    assert!(model_requests.is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_text_over_limit(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/translate", &json!({ "text": "a".repeat(10_001) }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::PAYLOAD_TOO_LARGE)
        .assert_error_message("10,000 characters");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_request_id(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/translate", &json!({ "text": "Hello" }))
        .await
        .unwrap();

    response.assert_header_exists("x-request-id");
}
