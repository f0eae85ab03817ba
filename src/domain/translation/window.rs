use tokenizers::Tokenizer;

/// Positions the model appends after the source pieces (`</s>`)
const RESERVED_POSITIONS: usize = 1;

/// Source side of the translation model's input window.
///
/// Length is measured in the model's own subword pieces, so a sentence of
/// long or rare words uses far more of the window than its word count.
pub struct TokenWindow {
    tokenizer: Tokenizer,
    max_tokens: usize,
}

/// Text that fits the window, with the piece count of the original input
#[derive(Debug, PartialEq, Eq)]
pub struct FittedText<'a> {
    pub text: &'a str,
    pub token_count: usize,
    pub truncated: bool,
}

impl TokenWindow {
    pub fn new(mut tokenizer: Tokenizer, max_tokens: usize) -> Self {
        // Counting needs the whole encoding
        tokenizer.with_padding(None);
        let _ = tokenizer.with_truncation(None);

        Self {
            tokenizer,
            max_tokens,
        }
    }

    /// Pieces left for the source text
    pub fn budget(&self) -> usize {
        self.max_tokens.saturating_sub(RESERVED_POSITIONS).max(1)
    }

    pub fn count(&self, text: &str) -> Result<usize, String> {
        self.tokenizer
            .encode(text, false)
            .map(|encoding| encoding.len())
            .map_err(|e| format!("tokenizer failed: {}", e))
    }

    /// Cut the text at the end of the last piece that fits
    pub fn fit<'a>(&self, text: &'a str) -> Result<FittedText<'a>, String> {
        let encoding = self
            .tokenizer
            .encode_char_offsets(text, false)
            .map_err(|e| format!("tokenizer failed: {}", e))?;

        let token_count = encoding.len();
        let budget = self.budget();
        if token_count <= budget {
            return Ok(FittedText {
                text,
                token_count,
                truncated: false,
            });
        }

        let (_, end_char) = encoding.get_offsets()[budget - 1];
        let end_byte = text
            .char_indices()
            .nth(end_char)
            .map_or(text.len(), |(index, _)| index);

        Ok(FittedText {
            text: text[..end_byte].trim_end(),
            token_count,
            truncated: true,
        })
    }
}
