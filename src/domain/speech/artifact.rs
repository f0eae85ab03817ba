use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use std::path::PathBuf;

pub const MP3_MIME_TYPE: &str = "audio/mpeg";

/// Audio produced for one pipeline run.
///
/// Exactly one of three shapes; consumers must handle all of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AudioArtifact {
    /// No audio could be produced
    Absent,
    /// An MP3 file owned by whoever consumes it
    File { path: PathBuf },
    /// A `data:<mime>;base64,<payload>` URI
    Inline { data_uri: String },
}

impl AudioArtifact {
    pub fn inline(mime_type: &str, bytes: &[u8]) -> Self {
        AudioArtifact::Inline {
            data_uri: format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes)),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, AudioArtifact::Absent)
    }
}
