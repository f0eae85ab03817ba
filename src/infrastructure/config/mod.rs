use crate::infrastructure::tokenizer::TokenizerSource;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Default model: MarianMT English -> Arabic
pub const DEFAULT_MARIAN_MODEL: &str = "Helsinki-NLP/opus-mt-en-ar";

/// Hub repository publishing a `tokenizer.json` for opus-mt-en-ar
pub const DEFAULT_TOKENIZER_REPO: &str = "Xenova/opus-mt-en-ar";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Translation
    pub translation_provider: TranslationProvider,
    pub marian_model: String,
    pub hf_inference_url: String,
    pub hf_api_token: Option<String>,
    pub translation_max_tokens: usize,
    pub translation_tokenizer_file: Option<PathBuf>,
    pub translation_tokenizer_repo: String,
    pub translation_warmup: bool,
    // OpenAI (translation and/or speech)
    pub openai_api_key: Option<String>,
    pub openai_translation_model: String,
    pub openai_tts_model: String,
    pub openai_tts_voice: String,
    // Speech
    pub tts_provider: TtsProvider,
    pub google_tts_url: String,
    pub aws_region: String,
    pub polly_voice: String,
    pub audio_delivery: AudioDelivery,
    pub audio_dir: PathBuf,
    // Reserved for the retrieval-augmented mode; not read by the pipeline
    pub google_api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    Marian,
    OpenAi,
}

impl TranslationProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationProvider::Marian => "marian",
            TranslationProvider::OpenAi => "openai",
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    Google,
    Polly,
    OpenAi,
}

impl TtsProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            TtsProvider::Google => "google",
            TtsProvider::Polly => "polly",
            TtsProvider::OpenAi => "openai",
        }
    }
}

/// How synthesized audio is handed to the presentation layer
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AudioDelivery {
    /// One uniquely named MP3 file per request
    File,
    /// A base64 `data:` URI carried in memory
    Inline,
}

impl AudioDelivery {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioDelivery::File => "file",
            AudioDelivery::Inline => "inline",
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();
        dotenvy::from_filename("config.env").ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .as_str()
            {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            translation_provider: match env::var("TRANSLATION_PROVIDER")
                .unwrap_or_else(|_| "marian".to_string())
                .to_lowercase()
                .as_str()
            {
                "marian" => TranslationProvider::Marian,
                "openai" => TranslationProvider::OpenAi,
                other => return Err(format!("Unknown TRANSLATION_PROVIDER: {}", other).into()),
            },
            marian_model: env::var("MARIAN_MODEL")
                .unwrap_or_else(|_| DEFAULT_MARIAN_MODEL.to_string()),
            hf_inference_url: env::var("HF_INFERENCE_URL")
                .unwrap_or_else(|_| "https://api-inference.huggingface.co".to_string()),
            hf_api_token: optional_var("HF_API_TOKEN"),
            translation_max_tokens: env::var("TRANSLATION_MAX_TOKENS")
                .unwrap_or_else(|_| "512".to_string())
                .parse()?,
            translation_tokenizer_file: optional_var("TRANSLATION_TOKENIZER_FILE")
                .map(PathBuf::from),
            translation_tokenizer_repo: env::var("TRANSLATION_TOKENIZER_REPO")
                .unwrap_or_else(|_| DEFAULT_TOKENIZER_REPO.to_string()),
            translation_warmup: parse_flag("TRANSLATION_WARMUP", true),
            openai_api_key: optional_var("OPENAI_API_KEY"),
            openai_translation_model: env::var("OPENAI_TRANSLATION_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            openai_tts_model: env::var("OPENAI_TTS_MODEL").unwrap_or_else(|_| "tts-1".to_string()),
            openai_tts_voice: env::var("OPENAI_TTS_VOICE").unwrap_or_else(|_| "alloy".to_string()),
            tts_provider: match env::var("TTS_PROVIDER")
                .unwrap_or_else(|_| "google".to_string())
                .to_lowercase()
                .as_str()
            {
                "google" => TtsProvider::Google,
                "polly" => TtsProvider::Polly,
                "openai" => TtsProvider::OpenAi,
                other => return Err(format!("Unknown TTS_PROVIDER: {}", other).into()),
            },
            google_tts_url: env::var("GOOGLE_TTS_URL")
                .unwrap_or_else(|_| "https://translate.google.com".to_string()),
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "eu-west-1".to_string()),
            polly_voice: env::var("POLLY_VOICE").unwrap_or_else(|_| "Zeina".to_string()),
            audio_delivery: match env::var("AUDIO_DELIVERY")
                .unwrap_or_else(|_| "file".to_string())
                .to_lowercase()
                .as_str()
            {
                "inline" => AudioDelivery::Inline,
                _ => AudioDelivery::File,
            },
            audio_dir: env::var("AUDIO_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir().join("translate-narrate-audio")),
            google_api_key: optional_var("GOOGLE_API_KEY"),
        };

        if config.translation_max_tokens == 0 {
            return Err("TRANSLATION_MAX_TOKENS must be greater than zero".into());
        }

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// A local `tokenizer.json` wins over the Hub repository
    pub fn tokenizer_source(&self) -> TokenizerSource {
        match &self.translation_tokenizer_file {
            Some(path) => TokenizerSource::File(path.clone()),
            None => TokenizerSource::Hub {
                repo: self.translation_tokenizer_repo.clone(),
                token: self.hf_api_token.clone(),
            },
        }
    }
}

/// Unset and empty values are both treated as absent
fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .map(|s| s.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}
