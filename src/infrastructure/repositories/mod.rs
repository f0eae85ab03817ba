pub mod batching;
pub mod google_tts_repository;
pub mod marian_translation_repository;
pub mod openai_translation_repository;
pub mod openai_tts_repository;
pub mod polly_tts_repository;
pub mod translation_repository;
pub mod tts_repository;

pub use google_tts_repository::GoogleTtsRepository;
pub use marian_translation_repository::MarianTranslationRepository;
pub use openai_translation_repository::OpenAiTranslationRepository;
pub use openai_tts_repository::OpenAiTtsRepository;
pub use polly_tts_repository::PollyTtsRepository;
pub use translation_repository::TranslationRepository;
pub use tts_repository::TtsRepository;
