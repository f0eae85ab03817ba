use crate::e2e::helpers;

use helpers::upstream::{break_speech_server, FAILING_INPUT};
use helpers::TestContext;
use hyper::StatusCode;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_the_form(ctx: &TestContext) {
    let response = ctx.client.get("/").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert!(response
        .header("content-type")
        .is_some_and(|v| v.starts_with("text/html")));

    let html = response.text();
    assert!(html.contains(r#"name="english_text""#));
    assert!(!html.contains("<audio"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_render_translation_with_player(ctx: &TestContext) {
    let response = ctx
        .client
        .post_form("/", &[("english_text", "Hello")])
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let html = response.text();
    assert!(html.contains("مرحبا"));
    assert!(!html.contains("&lt;pad&gt;"));
    assert!(html.contains(r#"<audio controls src="data:audio/mpeg;base64,"#));
    assert!(ctx.audio_files().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_warn_on_blank_submission(ctx: &TestContext) {
    let response = ctx
        .client
        .post_form("/", &[("english_text", "  ")])
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert!(response.text().contains("Please enter text to translate"));

    let model_requests = ctx.translation_server.received_requests().await.unwrap();
    assert!(model_requests.is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_show_translator_failure_in_result_area(ctx: &TestContext) {
    let response = ctx
        .client
        .post_form("/", &[("english_text", FAILING_INPUT)])
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let html = response.text();
    assert!(html.contains("Translation Error MarianMT returned 503"));
    assert!(html.contains("No audio generated"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_show_notice_when_speech_fails(ctx: &TestContext) {
    break_speech_server(&ctx.speech_server).await;

    let response = ctx
        .client
        .post_form("/", &[("english_text", "Good morning")])
        .await
        .unwrap();

    let html = response.text();
    assert!(html.contains("صباح الخير"));
    assert!(html.contains("No audio generated"));
    assert!(!html.contains("<audio"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_translate_uploaded_document(ctx: &TestContext) {
    let response = ctx
        .client
        .post_file("/document", "file", "greeting.txt", b"Hello")
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let html = response.text();
    assert!(html.contains(">Hello</textarea>"));
    assert!(html.contains("مرحبا"));
}
