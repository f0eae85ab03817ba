//! Word 97 and PowerPoint 97 binary documents.
//!
//! Both are Compound File Binary containers. Only the stream holding the
//! document body is read, so style sheets, font tables and summary
//! properties in the sibling streams never reach the extracted text.

mod powerpoint;
mod word;

use super::read_bytes;
use crate::domain::extraction::DocumentSegment;
use cfb::CompoundFile;
use std::io::{Cursor, Read};
use std::path::Path;

type Container = CompoundFile<Cursor<Vec<u8>>>;

pub fn load(path: &Path) -> Result<Vec<DocumentSegment>, String> {
    let bytes = read_bytes(path)?;
    let mut container = CompoundFile::open(Cursor::new(bytes))
        .map_err(|_| format!("'{}' is not a legacy Office document", path.display()))?;

    let texts = if container.is_stream(word::DOCUMENT_STREAM) {
        vec![word::extract(&mut container)?]
    } else if container.is_stream(powerpoint::DOCUMENT_STREAM) {
        powerpoint::extract(&mut container)?
    } else {
        return Err(format!(
            "'{}' holds neither a Word nor a PowerPoint document",
            path.display()
        ));
    };

    Ok(texts.into_iter().map(DocumentSegment::new).collect())
}

fn read_stream(container: &mut Container, name: &str) -> Result<Vec<u8>, String> {
    let mut stream = container
        .open_stream(name)
        .map_err(|e| format!("cannot open the {} stream: {}", name, e))?;

    let mut data = Vec::new();
    stream
        .read_to_end(&mut data)
        .map_err(|e| format!("cannot read the {} stream: {}", name, e))?;
    Ok(data)
}

fn read_u16(data: &[u8], offset: usize) -> Result<u16, String> {
    data.get(offset..offset + 2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
        .ok_or_else(|| format!("unexpected end of data at offset {:#x}", offset))
}

fn read_u32(data: &[u8], offset: usize) -> Result<u32, String> {
    data.get(offset..offset + 4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .ok_or_else(|| format!("unexpected end of data at offset {:#x}", offset))
}

fn decode_utf16le(bytes: &[u8]) -> String {
    char::decode_utf16(
        bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]])),
    )
    .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
    .collect()
}

/// Windows-1252 differs from Latin-1 only in 0x80..=0x9F
const CP1252_HIGH: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}',
];

fn decode_cp1252(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x80..=0x9F => CP1252_HIGH[usize::from(b - 0x80)],
            _ => char::from(b),
        })
        .collect()
}
