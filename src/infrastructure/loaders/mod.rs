//! Format-specific document loaders.
//!
//! Each loader turns one file into an ordered list of segments (pages,
//! slides, paragraphs). [`FormatDispatchingLoader`] picks the loader from the
//! file extension.

pub mod docx;
pub mod html;
pub mod legacy;
pub mod pdf;
pub mod plain;
pub mod pptx;
pub mod rtf;

use crate::domain::extraction::{DocumentFormat, DocumentSegment};
use std::path::Path;

pub trait DocumentLoader: Send + Sync {
    /// Read the file into segments in document order
    fn load(&self, path: &Path) -> Result<Vec<DocumentSegment>, String>;
}

/// Dispatches to the loader matching the file extension
#[derive(Debug, Default, Clone, Copy)]
pub struct FormatDispatchingLoader;

impl DocumentLoader for FormatDispatchingLoader {
    fn load(&self, path: &Path) -> Result<Vec<DocumentSegment>, String> {
        let format = DocumentFormat::from_path(path).ok_or_else(|| {
            match path.extension().and_then(|e| e.to_str()) {
                Some(ext) => format!("unsupported file format '{}'", ext),
                None => "file has no extension, cannot determine its format".to_string(),
            }
        })?;

        tracing::debug!(path = %path.display(), format = %format, "Loading document");

        match format {
            DocumentFormat::Pdf => pdf::load(path),
            DocumentFormat::Docx => docx::load(path),
            DocumentFormat::Pptx => pptx::load(path),
            DocumentFormat::Txt => plain::load_text(path),
            DocumentFormat::Csv => plain::load_csv(path),
            DocumentFormat::Html => html::load(path),
            DocumentFormat::Rtf => rtf::load(path),
            DocumentFormat::Doc | DocumentFormat::Ppt => legacy::load(path),
        }
    }
}

/// Read a whole file, naming the path in the error
pub(crate) fn read_bytes(path: &Path) -> Result<Vec<u8>, String> {
    std::fs::read(path).map_err(|e| format!("cannot read '{}': {}", path.display(), e))
}
