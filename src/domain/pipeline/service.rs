use super::error::PipelineError;
use super::result::{DocumentPipelineResult, PipelineResult};
use crate::domain::extraction::ExtractionServiceApi;
use crate::domain::speech::SpeechServiceApi;
use crate::domain::translation::{strip_control_tokens, TranslationServiceApi};
use async_trait::async_trait;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::path::Path;
use std::sync::Arc;

pub struct PipelineService {
    extraction_service: Arc<dyn ExtractionServiceApi>,
    translation_service: Arc<dyn TranslationServiceApi>,
    speech_service: Arc<dyn SpeechServiceApi>,
}

impl PipelineService {
    pub fn new(
        extraction_service: Arc<dyn ExtractionServiceApi>,
        translation_service: Arc<dyn TranslationServiceApi>,
        speech_service: Arc<dyn SpeechServiceApi>,
    ) -> Self {
        Self {
            extraction_service,
            translation_service,
            speech_service,
        }
    }
}

#[async_trait]
pub trait PipelineServiceApi: Send + Sync {
    /// Translate English text to Arabic and narrate it.
    ///
    /// Never fails. A failing stage yields a [`PipelineResult`] carrying the
    /// error message and no audio; a failing synthesizer only drops the audio.
    async fn process(&self, source_text: &str) -> PipelineResult;

    /// Extract a document's text and run it through [`Self::process`].
    /// Nothing is translated when extraction fails.
    async fn process_document(&self, path: &Path) -> DocumentPipelineResult;
}

#[async_trait]
impl PipelineServiceApi for PipelineService {
    async fn process(&self, source_text: &str) -> PipelineResult {
        let outcome = AssertUnwindSafe(self.translate_and_narrate(source_text))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(PipelineError::Panicked(panic_message(payload))));

        match outcome {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    text_length = source_text.len(),
                    "Processing error"
                );
                PipelineResult::failed(e.to_string())
            }
        }
    }

    async fn process_document(&self, path: &Path) -> DocumentPipelineResult {
        match self.extraction_service.extract(path).await {
            Ok(source_text) => {
                let result = self.process(&source_text).await;
                DocumentPipelineResult {
                    source_text: Some(source_text),
                    result,
                }
            }
            Err(e) => {
                let e = PipelineError::from(e);
                tracing::error!(
                    error = %e,
                    path = %path.display(),
                    "Document extraction failed"
                );
                DocumentPipelineResult {
                    source_text: None,
                    result: PipelineResult::failed(e.to_string()),
                }
            }
        }
    }
}

impl PipelineService {
    async fn translate_and_narrate(&self, source_text: &str) -> Result<PipelineResult, PipelineError> {
        // 1. Translate
        let raw_translation = self.translation_service.translate(source_text).await?;

        // 2. Normalize
        let translation = strip_control_tokens(&raw_translation);

        // 3. Narrate (degrades to no audio on its own)
        let audio = self.speech_service.synthesize(&translation).await;

        tracing::info!(
            source_length = source_text.len(),
            translation_length = translation.len(),
            has_audio = !audio.is_absent(),
            "Pipeline completed"
        );

        Ok(PipelineResult::translated(translation, audio))
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unexpected panic".to_string()
    }
}
