use super::{decode_cp1252, decode_utf16le, read_stream, read_u16, read_u32, Container};

pub(super) const DOCUMENT_STREAM: &str = "PowerPoint Document";

const RECORD_HEADER: usize = 8;
const CONTAINER_VERSION: u16 = 0x000F;
const MAX_DEPTH: usize = 32;

const RT_MAIN_MASTER: u16 = 1016;
const RT_SLIDE_LIST_WITH_TEXT: u16 = 4080;
const RT_TEXT_CHARS_ATOM: u16 = 4000;
const RT_TEXT_BYTES_ATOM: u16 = 4008;
const MASTER_LIST_INSTANCE: u16 = 1;

/// Text atoms of the presentation, in stream order.
///
/// Master slides and their placeholder prompts are skipped. The stream is
/// walked as stored, so a file saved incrementally may still carry text from
/// edits that were later superseded.
pub(super) fn extract(container: &mut Container) -> Result<Vec<String>, String> {
    let records = read_stream(container, DOCUMENT_STREAM)?;

    let mut texts = Vec::new();
    collect_text(&records, 0, &mut texts)?;
    Ok(texts)
}

fn collect_text(records: &[u8], depth: usize, texts: &mut Vec<String>) -> Result<(), String> {
    if depth > MAX_DEPTH {
        return Err("presentation records are nested too deeply".into());
    }

    let mut pos = 0;
    while pos + RECORD_HEADER <= records.len() {
        let version_instance = read_u16(records, pos)?;
        let record_type = read_u16(records, pos + 2)?;
        let length = read_u32(records, pos + 4)? as usize;

        let body_start = pos + RECORD_HEADER;
        let body = records
            .get(body_start..body_start.saturating_add(length))
            .ok_or("presentation record runs past the end of the stream")?;

        let version = version_instance & 0x000F;
        let instance = version_instance >> 4;
        match record_type {
            RT_MAIN_MASTER => {}
            RT_SLIDE_LIST_WITH_TEXT if instance == MASTER_LIST_INSTANCE => {}
            RT_TEXT_CHARS_ATOM => push_text(texts, decode_utf16le(body)),
            RT_TEXT_BYTES_ATOM => push_text(texts, decode_cp1252(body)),
            _ if version == CONTAINER_VERSION => collect_text(body, depth + 1, texts)?,
            _ => {}
        }

        pos = body_start + length;
    }

    Ok(())
}

fn push_text(texts: &mut Vec<String>, raw: String) {
    let text = raw.replace(['\r', '\u{0B}'], "\n");
    let text = text.trim();
    if !text.is_empty() {
        texts.push(text.to_string());
    }
}
