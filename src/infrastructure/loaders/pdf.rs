use crate::domain::extraction::DocumentSegment;
use lopdf::Document;
use std::path::Path;

/// One segment per page. Pages whose text cannot be decoded are skipped
/// rather than failing the whole document.
pub fn load(path: &Path) -> Result<Vec<DocumentSegment>, String> {
    let document =
        Document::load(path).map_err(|e| format!("cannot parse PDF '{}': {}", path.display(), e))?;

    let pages = document.get_pages();
    let mut segments = Vec::with_capacity(pages.len());

    for page_number in pages.keys() {
        match document.extract_text(&[*page_number]) {
            Ok(text) => segments.push(DocumentSegment::new(text.trim())),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    page = page_number,
                    error = %e,
                    "Skipping PDF page without extractable text"
                );
            }
        }
    }

    Ok(segments)
}
