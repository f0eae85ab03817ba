use super::read_bytes;
use crate::domain::extraction::DocumentSegment;
use regex::Regex;
use std::path::Path;

/// Plain text: one segment per blank-line separated block
pub fn load_text(path: &Path) -> Result<Vec<DocumentSegment>, String> {
    let text = decode(&read_bytes(path)?);
    let block_separator = Regex::new(r"\n[ \t]*\n").expect("static block pattern");

    Ok(block_separator
        .split(&text)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(DocumentSegment::new)
        .collect())
}

/// CSV is narrated as-is, one segment for the whole table
pub fn load_csv(path: &Path) -> Result<Vec<DocumentSegment>, String> {
    let text = decode(&read_bytes(path)?);
    Ok(vec![DocumentSegment::new(text.trim())])
}

/// Lossy UTF-8 with BOM and CRLF normalised away
fn decode(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).replace("\r\n", "\n")
}
