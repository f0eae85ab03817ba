use super::read_bytes;
use crate::domain::extraction::DocumentSegment;
use html2text::from_read;
use std::path::Path;

/// Wide enough that html2text never wraps sentences mid-line
const RENDER_WIDTH: usize = 10_000;

pub fn load(path: &Path) -> Result<Vec<DocumentSegment>, String> {
    let bytes = read_bytes(path)?;
    let text = from_read(bytes.as_slice(), RENDER_WIDTH);
    Ok(vec![DocumentSegment::new(text.trim())])
}
