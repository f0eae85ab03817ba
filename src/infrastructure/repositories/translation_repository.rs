use async_trait::async_trait;

/// Repository for machine translation from English into Arabic.
/// Abstracts the model backend (hosted MarianMT, OpenAI chat models)
///
/// Implementations run one generation pass per call and return the decoded
/// output untouched; stripping model control markers is left to the caller.
#[async_trait]
pub trait TranslationRepository: Send + Sync {
    /// Short provider name for logs and readiness reports
    fn name(&self) -> &'static str;

    /// Translate a single, already truncated, English input
    ///
    /// # Errors
    /// Returns error if the model is unreachable or produced no output
    async fn translate(&self, text: &str) -> Result<String, String>;
}
