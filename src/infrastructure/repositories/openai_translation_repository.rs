use super::translation_repository::TranslationRepository;
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "You are a professional English to Arabic translator. \
Translate the user's text into Modern Standard Arabic. \
Reply with the translation only, without notes, quotes or transliteration.";

/// OpenAI chat model implementation of the translation repository
pub struct OpenAiTranslationRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiTranslationRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl TranslationRepository for OpenAiTranslationRepository {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn translate(&self, text: &str) -> Result<String, String> {
        tracing::debug!(
            model = %self.model,
            text_length = text.len(),
            "Calling OpenAI chat completion for translation"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .temperature(0.0)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(SYSTEM_PROMPT)
                    .build()
                    .map_err(|e| format!("Invalid OpenAI request: {}", e))?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(text)
                    .build()
                    .map_err(|e| format!("Invalid OpenAI request: {}", e))?
                    .into(),
            ])
            .build()
            .map_err(|e| format!("Invalid OpenAI request: {}", e))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            tracing::debug!(
                error = %e,
                model = %self.model,
                text_length = text.len(),
                "OpenAI chat completion failed"
            );
            format!("OpenAI translation error: {}", e)
        })?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| "OpenAI returned no translation".to_string())
    }
}
