use lingua::{Language, LanguageDetector, LanguageDetectorBuilder};
use serde::{Deserialize, Serialize};

/// ISO 639-1 codes for the two ends of the translation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanguageCode {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ar")]
    Arabic,
}

impl LanguageCode {
    /// Language the pipeline translates from
    pub const SOURCE: LanguageCode = LanguageCode::English;
    /// Language the pipeline translates into and narrates
    pub const TARGET: LanguageCode = LanguageCode::Arabic;

    /// Get the ISO 639-1 code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::English => "en",
            LanguageCode::Arabic => "ar",
        }
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Build a detector over the languages a user is most likely to paste by mistake
pub fn build_detector() -> LanguageDetector {
    let languages = vec![
        Language::English,
        Language::Arabic,
        Language::French,
        Language::Spanish,
        Language::German,
    ];

    LanguageDetectorBuilder::from_languages(&languages).build()
}

/// Returns the detected language when the text does not look like English.
/// Undetectable text (numbers, very short strings) counts as English.
pub fn detect_non_english(detector: &LanguageDetector, text: &str) -> Option<Language> {
    match detector.detect_language_of(text) {
        Some(Language::English) | None => None,
        Some(other) => Some(other),
    }
}
