use super::batching::split_into_batches;
use super::tts_repository::TtsRepository;
use crate::domain::translation::LanguageCode;
use async_trait::async_trait;

/// The translate_tts endpoint rejects inputs longer than 100 characters
const MAX_BATCH_SIZE: usize = 100;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Google Translate text-to-speech implementation of TTS repository.
/// Needs no credentials.
pub struct GoogleTtsRepository {
    base_url: String,
    http_client: reqwest::Client,
}

impl GoogleTtsRepository {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    fn batch_url(&self, text: &str, language: LanguageCode, index: usize, total: usize) -> String {
        format!(
            "{}/translate_tts?ie=UTF-8&client=tw-ob&tl={}&q={}&total={}&idx={}&textlen={}",
            self.base_url,
            language.as_str(),
            urlencoding::encode(text),
            total,
            index,
            text.chars().count()
        )
    }

    /// Fetch the MP3 for a single text batch
    async fn call_google(
        &self,
        text: &str,
        language: LanguageCode,
        index: usize,
        total: usize,
    ) -> Result<Vec<u8>, String> {
        let response = self
            .http_client
            .get(self.batch_url(text, language, index, total))
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    batch_index = index,
                    text_length = text.len(),
                    "Google TTS request failed"
                );
                format!("Google TTS error: {}", e)
            })?;

        if !response.status().is_success() {
            return Err(format!(
                "Google TTS returned status {}",
                response.status().as_u16()
            ));
        }

        let audio_bytes = response
            .bytes()
            .await
            .map_err(|e| format!("Failed to read Google TTS audio: {}", e))?;

        Ok(audio_bytes.to_vec())
    }
}

#[async_trait]
impl TtsRepository for GoogleTtsRepository {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn synthesize(&self, text: &str, language: LanguageCode) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();

        let batches = split_into_batches(text, MAX_BATCH_SIZE);
        tracing::info!(
            batch_count = batches.len(),
            text_length = text.len(),
            language = %language,
            "Text split into batches"
        );

        // MP3 frames are self-delimiting, so concatenated batches play back as one stream
        let mut merged_audio = Vec::new();
        for (index, batch) in batches.iter().enumerate() {
            let audio_data = self
                .call_google(batch, language, index, batches.len())
                .await?;
            merged_audio.extend(audio_data);
        }

        tracing::info!(
            provider = "google",
            latency_ms = start_time.elapsed().as_millis(),
            batch_count = batches.len(),
            audio_size_bytes = merged_audio.len(),
            "TTS synthesis completed"
        );

        Ok(merged_audio)
    }
}
