pub mod error;
pub mod language;
pub mod normalize;
pub mod service;
pub mod window;

pub use error::TranslationError;
pub use language::LanguageCode;
pub use normalize::strip_control_tokens;
pub use service::{TranslationService, TranslationServiceApi};
pub use window::TokenWindow;
