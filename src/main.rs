use async_openai::{config::OpenAIConfig, Client as OpenAiClient};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use translate_narrate::controllers::{
    health::ReadinessInfo, page::PageController, translate::TranslateController,
};
use translate_narrate::domain::{
    extraction::ExtractionService,
    pipeline::{PipelineService, PipelineServiceApi},
    speech::SpeechService,
    translation::{TokenWindow, TranslationService},
};
use translate_narrate::infrastructure::config::{
    Config, LogFormat, TranslationProvider, TtsProvider,
};
use translate_narrate::infrastructure::http::start_http_server;
use translate_narrate::infrastructure::loaders::FormatDispatchingLoader;
use translate_narrate::infrastructure::repositories::{
    GoogleTtsRepository, MarianTranslationRepository, OpenAiTranslationRepository,
    OpenAiTtsRepository, PollyTtsRepository, TranslationRepository, TtsRepository,
};
use translate_narrate::infrastructure::tokenizer::load_tokenizer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Translate & Narrate on {}:{}",
        config.host,
        config.port
    );

    // Reserved for the retrieval-augmented mode; never required
    tracing::info!(
        google_api_key_present = config.google_api_key.is_some(),
        "Optional credentials check"
    );

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories and loaders
    tracing::info!("Instantiating repositories...");
    let translation_repo = build_translation_repository(&config)?;
    let tts_repo = build_tts_repository(&config).await?;
    let loader = Arc::new(FormatDispatchingLoader);

    let tokenizer_source = config.tokenizer_source();
    tracing::info!("Loading translation tokenizer...");
    let tokenizer =
        tokio::task::spawn_blocking(move || load_tokenizer(&tokenizer_source)).await??;

    // 2. Instantiate services (inject repositories)
    tracing::info!("Instantiating services...");
    let translation_service = Arc::new(TranslationService::new(
        translation_repo,
        TokenWindow::new(tokenizer, config.translation_max_tokens),
    ));

    if config.translation_warmup {
        translation_service.warm_up().await?;
    }

    let speech_service = Arc::new(SpeechService::new(
        tts_repo,
        config.audio_delivery,
        config.audio_dir.clone(),
    ));
    let extraction_service = Arc::new(ExtractionService::new(loader));

    let readiness = Arc::new(ReadinessInfo {
        translation_provider: translation_service.provider_name(),
        tts_provider: speech_service.provider_name(),
        audio_delivery: config.audio_delivery.as_str(),
    });

    let pipeline_service: Arc<dyn PipelineServiceApi> = Arc::new(PipelineService::new(
        extraction_service,
        translation_service,
        speech_service,
    ));

    // 3. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let translate_controller = Arc::new(TranslateController::new(pipeline_service.clone()));
    let page_controller = Arc::new(PageController::new(pipeline_service));

    // Start HTTP server with all routes
    start_http_server(config, readiness, translate_controller, page_controller).await?;

    Ok(())
}

fn build_translation_repository(
    config: &Config,
) -> Result<Arc<dyn TranslationRepository>, Box<dyn std::error::Error>> {
    tracing::info!(
        provider = config.translation_provider.as_str(),
        "Selecting translation backend"
    );

    let repo: Arc<dyn TranslationRepository> = match config.translation_provider {
        TranslationProvider::Marian => {
            if config.hf_api_token.is_none() {
                if config.is_development() {
                    tracing::debug!("HF_API_TOKEN not set; inference requests will be anonymous");
                } else {
                    tracing::warn!("HF_API_TOKEN not set in production; anonymous inference is heavily rate limited");
                }
            }
            Arc::new(MarianTranslationRepository::new(
                &config.hf_inference_url,
                config.marian_model.clone(),
                config.hf_api_token.clone(),
            ))
        }
        TranslationProvider::OpenAi => Arc::new(OpenAiTranslationRepository::new(
            openai_client(config)?,
            config.openai_translation_model.clone(),
        )),
    };

    Ok(repo)
}

async fn build_tts_repository(
    config: &Config,
) -> Result<Arc<dyn TtsRepository>, Box<dyn std::error::Error>> {
    tracing::info!(
        provider = config.tts_provider.as_str(),
        "Selecting speech backend"
    );

    let repo: Arc<dyn TtsRepository> = match config.tts_provider {
        TtsProvider::Google => Arc::new(GoogleTtsRepository::new(&config.google_tts_url)),
        TtsProvider::Polly => {
            tracing::info!("Initializing AWS Polly client with region: {}", config.aws_region);

            let has_access_key = std::env::var("AWS_ACCESS_KEY_ID").is_ok();
            let has_secret_key = std::env::var("AWS_SECRET_ACCESS_KEY").is_ok();
            if !has_access_key || !has_secret_key {
                tracing::warn!("AWS credentials not found in environment variables. Will attempt to use other credential providers (instance metadata, etc.)");
            }

            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()))
                .load()
                .await;
            tracing::info!(region = ?aws_config.region(), "AWS configuration loaded");

            let polly_client = Arc::new(aws_sdk_polly::Client::new(&aws_config));
            Arc::new(PollyTtsRepository::new(polly_client, config.polly_voice.clone()))
        }
        TtsProvider::OpenAi => Arc::new(OpenAiTtsRepository::new(
            openai_client(config)?,
            config.openai_tts_model.clone(),
            config.openai_tts_voice.clone(),
        )),
    };

    Ok(repo)
}

fn openai_client(
    config: &Config,
) -> Result<Arc<OpenAiClient<OpenAIConfig>>, Box<dyn std::error::Error>> {
    let api_key = config
        .openai_api_key
        .clone()
        .ok_or("OPENAI_API_KEY is required for the openai provider")?;

    Ok(Arc::new(OpenAiClient::with_config(
        OpenAIConfig::new().with_api_key(api_key),
    )))
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "translate_narrate=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
