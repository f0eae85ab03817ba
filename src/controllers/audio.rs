use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use std::path::Path;

use crate::domain::speech::{AudioArtifact, MP3_MIME_TYPE};

pub const NO_AUDIO_NOTICE: &str = "No audio generated";

/// MIME type assumed for a data URI that does not name one
const DEFAULT_INLINE_MIME_TYPE: &str = "audio/wav";

/// What a front-end shows in the audio slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AudioView {
    None { notice: String },
    Audio { mime_type: String, data_base64: String },
    Error { notice: String },
}

impl AudioView {
    /// `data:` URI suitable for an `<audio src>` attribute
    pub fn data_uri(&self) -> Option<String> {
        match self {
            AudioView::Audio {
                mime_type,
                data_base64,
            } => Some(format!("data:{};base64,{}", mime_type, data_base64)),
            _ => None,
        }
    }
}

/// Turn a pipeline audio artifact into something playable.
///
/// File artifacts are read and then removed from disk. Inline artifacts are
/// decoded to check the payload before being handed on.
pub async fn present_audio(artifact: &AudioArtifact) -> AudioView {
    match artifact {
        AudioArtifact::Absent => AudioView::None {
            notice: NO_AUDIO_NOTICE.to_string(),
        },
        AudioArtifact::File { path } => match read_and_remove(path).await {
            Ok(bytes) => AudioView::Audio {
                mime_type: MP3_MIME_TYPE.to_string(),
                data_base64: STANDARD.encode(bytes),
            },
            Err(e) => audio_error(e),
        },
        AudioArtifact::Inline { data_uri } => match decode_data_uri(data_uri) {
            Ok((mime_type, bytes)) => AudioView::Audio {
                mime_type,
                data_base64: STANDARD.encode(bytes),
            },
            Err(e) => audio_error(e),
        },
    }
}

fn audio_error(details: String) -> AudioView {
    tracing::warn!(error = %details, "Audio artifact could not be presented");
    AudioView::Error {
        notice: format!("Audio error: {}", details),
    }
}

async fn read_and_remove(path: &Path) -> Result<Vec<u8>, String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;

    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::warn!(path = %path.display(), error = %e, "Failed to remove audio file");
    }

    Ok(bytes)
}

/// Split `data:<mime>;base64,<payload>` into its MIME type and decoded bytes
pub fn decode_data_uri(data_uri: &str) -> Result<(String, Vec<u8>), String> {
    let rest = data_uri
        .strip_prefix("data:")
        .ok_or_else(|| "payload is not a data URI".to_string())?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| "data URI has no payload".to_string())?;
    let mime_type = header
        .strip_suffix(";base64")
        .ok_or_else(|| "data URI is not base64 encoded".to_string())?;

    let mime_type = if mime_type.is_empty() {
        DEFAULT_INLINE_MIME_TYPE
    } else {
        mime_type
    };

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| format!("invalid base64 payload: {}", e))?;

    Ok((mime_type.to_string(), bytes))
}
