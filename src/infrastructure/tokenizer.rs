//! Source-side tokenizer of the translation model.

use std::path::PathBuf;
use tokenizers::Tokenizer;

const TOKENIZER_FILE: &str = "tokenizer.json";

/// Where `tokenizer.json` comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizerSource {
    File(PathBuf),
    /// Downloaded once into the local Hugging Face cache
    Hub {
        repo: String,
        token: Option<String>,
    },
}

/// Load the tokenizer. Blocking: the Hub source may hit the network, so call
/// this from `spawn_blocking`.
pub fn load_tokenizer(source: &TokenizerSource) -> Result<Tokenizer, String> {
    let path = match source {
        TokenizerSource::File(path) => path.clone(),
        TokenizerSource::Hub { repo, token } => {
            tracing::debug!(repo = %repo, "Fetching tokenizer from the Hugging Face Hub");

            let api = hf_hub::api::sync::ApiBuilder::new()
                .with_token(token.clone())
                .build()
                .map_err(|e| format!("cannot reach the Hugging Face Hub: {}", e))?;

            api.model(repo.clone()).get(TOKENIZER_FILE).map_err(|e| {
                format!("cannot download {} from '{}': {}", TOKENIZER_FILE, repo, e)
            })?
        }
    };

    let tokenizer = Tokenizer::from_file(&path)
        .map_err(|e| format!("cannot load tokenizer from '{}': {}", path.display(), e))?;

    tracing::info!(
        path = %path.display(),
        vocab_size = tokenizer.get_vocab_size(true),
        "Translation tokenizer loaded"
    );
    Ok(tokenizer)
}
