#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("TTS Error: {0}")]
    Engine(String),
    #[error("TTS Error: engine returned no audio")]
    EmptyAudio,
    #[error("TTS Error: failed to store audio: {0}")]
    Storage(#[from] std::io::Error),
}
