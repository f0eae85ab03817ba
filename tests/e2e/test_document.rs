use crate::e2e::helpers;

use docx_rs::{Docx, Paragraph, Run};
use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use test_context::test_context;

const DOCUMENT_ROUTE: &str = "/api/translate/document";

fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let mut docx = Docx::new();
    for text in paragraphs {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
    }

    let mut buffer = std::io::Cursor::new(Vec::new());
    docx.build().pack(&mut buffer).unwrap();
    buffer.into_inner()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_translate_plain_text_upload(ctx: &TestContext) {
    let response = ctx
        .client
        .post_file(DOCUMENT_ROUTE, "file", "greeting.txt", b"Hello\n")
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.field("/source_text"), Some("Hello"));
    assert_eq!(response.field("/status"), Some("translated"));
    assert_eq!(response.field("/translation"), Some("مرحبا"));
    assert_eq!(response.field("/audio/kind"), Some("audio"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_join_document_paragraphs(ctx: &TestContext) {
    let response = ctx
        .client
        .post_file(
            DOCUMENT_ROUTE,
            "file",
            "Minutes.DOCX",
            &docx_bytes(&["First paragraph.", "", "Second paragraph."]),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.field("/source_text"),
        Some("First paragraph.\n\nSecond paragraph.")
    );
    assert_eq!(response.field("/status"), Some("translated"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_extract_rtf_upload(ctx: &TestContext) {
    let rtf = br"{\rtf1\ansi{\fonttbl{\f0 Arial;}}\f0 Good morning\par}";
    let response = ctx
        .client
        .post_file(DOCUMENT_ROUTE, "file", "note.rtf", rtf)
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.field("/source_text"), Some("Good morning"));
    assert_eq!(response.field("/translation"), Some("صباح الخير"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_unsupported_format_without_translating(ctx: &TestContext) {
    let response = ctx
        .client
        .post_file(DOCUMENT_ROUTE, "file", "archive.xyz", b"whatever")
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.field("/status"), Some("failed"));
    assert_eq!(
        response.field("/translation"),
        Some("Error extracting text: unsupported file format 'xyz'")
    );
    assert!(response.field("/source_text").is_none());
    assert_eq!(response.field("/audio/kind"), Some("none"));

    let model_requests = ctx.translation_server.received_requests().await.unwrap();
    assert!(model_requests.is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_corrupt_document(ctx: &TestContext) {
    let response = ctx
        .client
        .post_file(DOCUMENT_ROUTE, "file", "broken.pdf", b"not really a pdf")
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.field("/status"), Some("failed"));
    assert!(response
        .field("/translation")
        .unwrap()
        .starts_with("Error extracting text:"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_upload_without_file_field(ctx: &TestContext) {
    let response = ctx
        .client
        .post_file(DOCUMENT_ROUTE, "attachment", "greeting.txt", b"Hello")
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Missing 'file' field");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_empty_upload(ctx: &TestContext) {
    let response = ctx
        .client
        .post_file(DOCUMENT_ROUTE, "file", "empty.txt", b"")
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Uploaded file is empty");
}
