use super::error::ExtractionError;
use super::SEGMENT_SEPARATOR;
use crate::infrastructure::loaders::DocumentLoader;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct ExtractionService {
    loader: Arc<dyn DocumentLoader>,
}

impl ExtractionService {
    pub fn new(loader: Arc<dyn DocumentLoader>) -> Self {
        Self { loader }
    }
}

#[async_trait]
pub trait ExtractionServiceApi: Send + Sync {
    /// Extract the text of a document already on disk.
    ///
    /// Segments are joined in document order with a blank line between them.
    /// The file is only read; its lifecycle belongs to the caller.
    async fn extract(&self, path: &Path) -> Result<String, ExtractionError>;
}

#[async_trait]
impl ExtractionServiceApi for ExtractionService {
    async fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        let loader = self.loader.clone();
        let owned_path: PathBuf = path.to_path_buf();

        // Parsers are synchronous and can be CPU heavy on large PDFs
        let segments = tokio::task::spawn_blocking(move || loader.load(&owned_path))
            .await
            .map_err(|e| ExtractionError::Loader(format!("loader task failed: {}", e)))?
            .map_err(ExtractionError::Loader)?;

        let text = segments
            .iter()
            .map(|segment| segment.body.trim())
            .filter(|body| !body.is_empty())
            .collect::<Vec<_>>()
            .join(SEGMENT_SEPARATOR);

        if text.is_empty() {
            return Err(ExtractionError::Empty);
        }

        tracing::info!(
            path = %path.display(),
            segment_count = segments.len(),
            text_length = text.len(),
            "Document text extracted"
        );

        Ok(text)
    }
}
