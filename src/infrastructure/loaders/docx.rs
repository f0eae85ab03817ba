use super::read_bytes;
use crate::domain::extraction::DocumentSegment;
use docx_rs::{read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild};
use std::path::Path;

/// One segment per non-empty paragraph, in document order.
///
/// A .docx file is a ZIP of XML parts; docx-rs gives us the typed tree
/// Document → Paragraph → Run → Text. Tables and drawings are skipped.
pub fn load(path: &Path) -> Result<Vec<DocumentSegment>, String> {
    let bytes = read_bytes(path)?;
    let docx = read_docx(&bytes)
        .map_err(|e| format!("cannot parse Word document '{}': {:?}", path.display(), e))?;

    let segments = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
            _ => None,
        })
        .filter(|text| !text.trim().is_empty())
        .map(DocumentSegment::new)
        .collect();

    Ok(segments)
}

/// Runs in one paragraph are parts of the same sentence; join without separator
fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();

    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                match run_child {
                    RunChild::Text(t) => text.push_str(&t.text),
                    RunChild::Tab(_) => text.push('\t'),
                    _ => {}
                }
            }
        }
    }

    text
}
