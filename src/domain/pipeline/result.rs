use crate::domain::speech::AudioArtifact;
use serde::Serialize;

/// Text half of a pipeline result: a translation or a readable failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum TranslationOutcome {
    Translated(String),
    Failed(String),
}

impl TranslationOutcome {
    /// The string to show in the translation output area
    pub fn text(&self) -> &str {
        match self {
            TranslationOutcome::Translated(text) | TranslationOutcome::Failed(text) => text,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, TranslationOutcome::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineResult {
    pub outcome: TranslationOutcome,
    pub audio: AudioArtifact,
}

impl PipelineResult {
    pub fn translated(text: String, audio: AudioArtifact) -> Self {
        Self {
            outcome: TranslationOutcome::Translated(text),
            audio,
        }
    }

    pub fn failed(message: String) -> Self {
        Self {
            outcome: TranslationOutcome::Failed(message),
            audio: AudioArtifact::Absent,
        }
    }
}

/// Result of processing an uploaded document.
/// `source_text` is `None` when extraction failed and nothing was translated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentPipelineResult {
    pub source_text: Option<String>,
    pub result: PipelineResult,
}
