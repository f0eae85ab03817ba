use super::translation_repository::TranslationRepository;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct TranslationOutput {
    #[serde(alias = "generated_text")]
    translation_text: String,
}

#[derive(Debug, Deserialize)]
struct InferenceError {
    error: String,
}

/// MarianMT (Helsinki-NLP/opus-mt-en-ar) served behind a Hugging Face
/// compatible inference endpoint
pub struct MarianTranslationRepository {
    endpoint: String,
    model: String,
    api_token: Option<String>,
    http_client: reqwest::Client,
}

impl MarianTranslationRepository {
    pub fn new(base_url: &str, model: String, api_token: Option<String>) -> Self {
        Self {
            endpoint: format!("{}/models/{}", base_url.trim_end_matches('/'), model),
            model,
            api_token,
            http_client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TranslationRepository for MarianTranslationRepository {
    fn name(&self) -> &'static str {
        "marian"
    }

    async fn translate(&self, text: &str) -> Result<String, String> {
        tracing::debug!(
            model = %self.model,
            text_length = text.len(),
            text_preview = %text.chars().take(200).collect::<String>(),
            "Calling MarianMT inference endpoint"
        );

        let mut request = self.http_client.post(&self.endpoint).json(&InferenceRequest {
            inputs: text,
            options: InferenceOptions {
                wait_for_model: true,
            },
        });
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            tracing::debug!(error = %e, model = %self.model, "MarianMT request failed");
            format!("MarianMT request failed: {}", e)
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| format!("Failed to read MarianMT response: {}", e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<InferenceError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(format!("MarianMT returned {}: {}", status.as_u16(), message));
        }

        let outputs: Vec<TranslationOutput> = serde_json::from_str(&body)
            .map_err(|e| format!("Failed to parse MarianMT response: {}", e))?;

        outputs
            .into_iter()
            .next()
            .map(|output| output.translation_text)
            .ok_or_else(|| "MarianMT returned no translation".to_string())
    }
}
