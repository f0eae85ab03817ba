use super::artifact::{AudioArtifact, MP3_MIME_TYPE};
use super::error::SynthesisError;
use crate::domain::translation::LanguageCode;
use crate::infrastructure::config::AudioDelivery;
use crate::infrastructure::repositories::TtsRepository;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

pub struct SpeechService {
    tts_repo: Arc<dyn TtsRepository>,
    delivery: AudioDelivery,
    audio_dir: PathBuf,
}

impl SpeechService {
    pub fn new(tts_repo: Arc<dyn TtsRepository>, delivery: AudioDelivery, audio_dir: PathBuf) -> Self {
        Self {
            tts_repo,
            delivery,
            audio_dir,
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.tts_repo.name()
    }
}

#[async_trait]
pub trait SpeechServiceApi: Send + Sync {
    /// Narrate Arabic text.
    ///
    /// Never fails: engine and storage errors are logged and reported as
    /// [`AudioArtifact::Absent`]. A `File` artifact is a fresh, uniquely named
    /// file that the caller must delete once read.
    async fn synthesize(&self, text: &str) -> AudioArtifact;
}

#[async_trait]
impl SpeechServiceApi for SpeechService {
    async fn synthesize(&self, text: &str) -> AudioArtifact {
        if text.trim().is_empty() {
            tracing::debug!("Nothing to narrate, skipping speech synthesis");
            return AudioArtifact::Absent;
        }

        match self.try_synthesize(text).await {
            Ok(artifact) => artifact,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    provider = self.tts_repo.name(),
                    text_length = text.len(),
                    "Speech synthesis failed, continuing without audio"
                );
                AudioArtifact::Absent
            }
        }
    }
}

impl SpeechService {
    async fn try_synthesize(&self, text: &str) -> Result<AudioArtifact, SynthesisError> {
        let audio_data = self
            .tts_repo
            .synthesize(text, LanguageCode::TARGET)
            .await
            .map_err(SynthesisError::Engine)?;

        if audio_data.is_empty() {
            return Err(SynthesisError::EmptyAudio);
        }

        match self.delivery {
            AudioDelivery::Inline => Ok(AudioArtifact::inline(MP3_MIME_TYPE, &audio_data)),
            AudioDelivery::File => {
                let path = self.write_audio_file(&audio_data).await?;
                Ok(AudioArtifact::File { path })
            }
        }
    }

    async fn write_audio_file(&self, audio_data: &[u8]) -> Result<PathBuf, SynthesisError> {
        tokio::fs::create_dir_all(&self.audio_dir).await?;

        let path = self.audio_dir.join(format!("{}.mp3", Uuid::new_v4()));
        tokio::fs::write(&path, audio_data).await?;

        tracing::debug!(
            path = %path.display(),
            audio_size = audio_data.len(),
            "Audio written"
        );
        Ok(path)
    }
}
