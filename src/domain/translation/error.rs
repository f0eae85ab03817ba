/// Failure of the translation stage.
///
/// Rendered as `Translation Error <details>` in the output area.
#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("Translation Error {0}")]
    Model(String),
    #[error("Translation Error {0}")]
    Tokenizer(String),
    #[error("Translation Error model warm-up failed: {0}")]
    Warmup(String),
}
