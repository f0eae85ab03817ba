/// Failure to turn an uploaded document into text.
///
/// Every variant renders with the `Error extracting text:` prefix so it can be
/// shown to the user as-is.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Error extracting text: {0}")]
    Loader(String),
    #[error("Error extracting text: no text found in document")]
    Empty,
}
