use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;
use translate_narrate::controllers::{
    health::ReadinessInfo, page::PageController, translate::TranslateController,
};
use translate_narrate::domain::{
    extraction::ExtractionService,
    pipeline::{PipelineService, PipelineServiceApi},
    speech::SpeechService,
    translation::{TokenWindow, TranslationService},
};
use translate_narrate::infrastructure::config::{AudioDelivery, DEFAULT_MARIAN_MODEL};
use translate_narrate::infrastructure::http::build_router;
use translate_narrate::infrastructure::loaders::FormatDispatchingLoader;
use translate_narrate::infrastructure::repositories::{
    GoogleTtsRepository, MarianTranslationRepository,
};
use translate_narrate::infrastructure::tokenizer::{load_tokenizer, TokenizerSource};
use wiremock::MockServer;

pub mod api_client;
pub mod upstream;

use api_client::TestClient;

/// Window size of the served model
pub const MAX_MODEL_TOKENS: usize = 512;

/// Character-level stand-in for the model tokenizer: one piece per letter
fn tokenizer_fixture() -> TokenizerSource {
    TokenizerSource::File(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/char_tokenizer.json"),
    )
}

/// One running server wired to fake upstream model and speech endpoints
pub struct TestApp {
    pub client: TestClient,
    pub translation_server: MockServer,
    pub speech_server: MockServer,
    pub audio_dir: TempDir,
}

impl TestApp {
    pub async fn spawn(delivery: AudioDelivery) -> Self {
        let translation_server = upstream::start_translation_server().await;
        let speech_server = upstream::start_speech_server().await;
        let audio_dir = tempfile::tempdir().expect("Failed to create audio dir");

        let app = create_app(
            &translation_server.uri(),
            &speech_server.uri(),
            delivery,
            audio_dir.path(),
        );

        // Start server
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to get local addr");
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            client: TestClient::new(&base_url),
            translation_server,
            speech_server,
            audio_dir,
        }
    }

    /// Files currently left behind in the audio directory
    pub fn audio_files(&self) -> Vec<std::path::PathBuf> {
        std::fs::read_dir(self.audio_dir.path())
            .map(|entries| entries.filter_map(|e| e.ok()).map(|e| e.path()).collect())
            .unwrap_or_default()
    }
}

/// Server delivering audio as per-request files
pub struct TestContext {
    pub app: TestApp,
}

impl std::ops::Deref for TestContext {
    type Target = TestApp;

    fn deref(&self) -> &TestApp {
        &self.app
    }
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            Self {
                app: TestApp::spawn(AudioDelivery::File).await,
            }
        }
    }
}

/// Server delivering audio inline as data URIs
pub struct InlineAudioContext {
    pub app: TestApp,
}

impl std::ops::Deref for InlineAudioContext {
    type Target = TestApp;

    fn deref(&self) -> &TestApp {
        &self.app
    }
}

impl AsyncTestContext for InlineAudioContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            Self {
                app: TestApp::spawn(AudioDelivery::Inline).await,
            }
        }
    }
}

fn create_app(
    translation_url: &str,
    speech_url: &str,
    delivery: AudioDelivery,
    audio_dir: &Path,
) -> axum::Router {
    // Instantiate repositories
    let translation_repo = Arc::new(MarianTranslationRepository::new(
        translation_url,
        DEFAULT_MARIAN_MODEL.to_string(),
        None,
    ));
    let tts_repo = Arc::new(GoogleTtsRepository::new(speech_url));

    // Instantiate services
    let tokenizer = load_tokenizer(&tokenizer_fixture()).expect("tokenizer fixture loads");
    let translation_service = Arc::new(TranslationService::new(
        translation_repo,
        TokenWindow::new(tokenizer, MAX_MODEL_TOKENS),
    ));
    let speech_service = Arc::new(SpeechService::new(
        tts_repo,
        delivery,
        audio_dir.to_path_buf(),
    ));
    let extraction_service = Arc::new(ExtractionService::new(Arc::new(FormatDispatchingLoader)));

    let readiness = Arc::new(ReadinessInfo {
        translation_provider: translation_service.provider_name(),
        tts_provider: speech_service.provider_name(),
        audio_delivery: delivery.as_str(),
    });

    let pipeline_service: Arc<dyn PipelineServiceApi> = Arc::new(PipelineService::new(
        extraction_service,
        translation_service,
        speech_service,
    ));

    // Instantiate controllers
    let translate_controller = Arc::new(TranslateController::new(pipeline_service.clone()));
    let page_controller = Arc::new(PageController::new(pipeline_service));

    build_router(readiness, translate_controller, page_controller)
}
