pub mod artifact;
pub mod error;
pub mod service;

pub use artifact::{AudioArtifact, MP3_MIME_TYPE};
pub use error::SynthesisError;
pub use service::{SpeechService, SpeechServiceApi};
