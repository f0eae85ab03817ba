use super::error::TranslationError;
use super::language::{build_detector, detect_non_english, LanguageCode};
use super::window::TokenWindow;
use crate::infrastructure::repositories::TranslationRepository;
use async_trait::async_trait;
use lingua::{Language, LanguageDetector};
use std::sync::Arc;

/// Text used to exercise the model once at startup
const WARMUP_PROBE: &str = "Hello";

pub struct TranslationService {
    translation_repo: Arc<dyn TranslationRepository>,
    window: TokenWindow,
    language_detector: LanguageDetector,
}

/// Source text as it will be sent to the model
#[derive(Debug)]
struct PreparedInput<'a> {
    text: &'a str,
    detected_language: Option<Language>,
}

impl TranslationService {
    pub fn new(translation_repo: Arc<dyn TranslationRepository>, window: TokenWindow) -> Self {
        Self {
            translation_repo,
            window,
            language_detector: build_detector(),
        }
    }

    /// Run one probe translation through the backend. Any failure is returned
    /// as [`TranslationError::Warmup`].
    pub async fn warm_up(&self) -> Result<(), TranslationError> {
        let start_time = std::time::Instant::now();
        tracing::info!(
            provider = self.translation_repo.name(),
            "Warming up translation model"
        );

        self.translation_repo
            .translate(WARMUP_PROBE)
            .await
            .map_err(TranslationError::Warmup)?;

        tracing::info!(
            provider = self.translation_repo.name(),
            latency_ms = start_time.elapsed().as_millis(),
            "Translation model ready"
        );
        Ok(())
    }

    pub fn provider_name(&self) -> &'static str {
        self.translation_repo.name()
    }
}

#[async_trait]
pub trait TranslationServiceApi: Send + Sync {
    /// Translate English text into Arabic.
    ///
    /// Blank input returns an empty string without touching the model.
    /// Input longer than the model window is truncated (with a warning).
    /// The returned text is the raw decoded output and may still carry
    /// control markers; see [`super::strip_control_tokens`].
    async fn translate(&self, text: &str) -> Result<String, TranslationError>;
}

#[async_trait]
impl TranslationServiceApi for TranslationService {
    async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let input = self.prepare(text)?;
        if let Some(language) = input.detected_language {
            tracing::warn!(
                expected_language = %LanguageCode::SOURCE,
                detected_language = ?language,
                text_length = input.text.len(),
                "Source text does not look like English, translating anyway"
            );
        }

        let start_time = std::time::Instant::now();
        let translated = self
            .translation_repo
            .translate(input.text)
            .await
            .map_err(TranslationError::Model)?;

        tracing::info!(
            provider = self.translation_repo.name(),
            input_length = input.text.len(),
            output_length = translated.len(),
            latency_ms = start_time.elapsed().as_millis(),
            "Translation completed"
        );

        Ok(translated)
    }
}

impl TranslationService {
    /// Fit the text to the model window, then check its language
    fn prepare<'a>(&self, text: &'a str) -> Result<PreparedInput<'a>, TranslationError> {
        let fitted = self.window.fit(text).map_err(TranslationError::Tokenizer)?;
        if fitted.truncated {
            tracing::warn!(
                token_count = fitted.token_count,
                kept_tokens = self.window.budget(),
                "Source text exceeds the model input window, truncating"
            );
        }

        Ok(PreparedInput {
            text: fitted.text,
            detected_language: detect_non_english(&self.language_detector, fitted.text),
        })
    }
}
