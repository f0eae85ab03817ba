use crate::domain::extraction::ExtractionError;
use crate::domain::translation::TranslationError;

/// Anything that stops a pipeline run before it produces text.
/// Only ever observed inside the orchestrator; callers get a [`super::PipelineResult`].
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Translation(#[from] TranslationError),
    #[error("Processing error: {0}")]
    Panicked(String),
}
