use serde_json::{json, Value};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Any input containing this phrase makes the fake model fail
pub const FAILING_INPUT: &str = "overload the model";

/// Bytes served by the fake speech endpoint for every batch
pub const FAKE_MP3: &[u8] = b"ID3\x04\x00fake-mp3-frame";

/// Stands in for a Hugging Face inference endpoint serving opus-mt-en-ar.
///
/// Answers with the control tokens a raw MarianMT decode leaves behind so the
/// cleanup step is exercised end to end.
pub struct FakeMarianModel;

impl Respond for FakeMarianModel {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        let input = body["inputs"].as_str().unwrap_or_default();

        if input.contains(FAILING_INPUT) {
            return ResponseTemplate::new(503).set_body_json(json!({
                "error": "Model is overloaded"
            }));
        }

        ResponseTemplate::new(200).set_body_json(json!([
            { "translation_text": format!("<pad> {}</s>", arabic_for(input)) }
        ]))
    }
}

pub fn arabic_for(english: &str) -> &'static str {
    match english.trim() {
        "Hello" => "مرحبا",
        "Good morning" => "صباح الخير",
        _ => "نص مترجم",
    }
}

pub async fn start_translation_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/models/.+"))
        .respond_with(FakeMarianModel)
        .mount(&server)
        .await;
    server
}

pub async fn start_speech_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(FAKE_MP3.to_vec()))
        .mount(&server)
        .await;
    server
}

/// Make every later speech request fail, overriding the default mock
pub async fn break_speech_server(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .respond_with(ResponseTemplate::new(429))
        .with_priority(1)
        .mount(server)
        .await;
}
