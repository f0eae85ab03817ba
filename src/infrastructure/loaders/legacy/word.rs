use super::{decode_cp1252, decode_utf16le, read_stream, read_u16, read_u32, Container};

pub(super) const DOCUMENT_STREAM: &str = "WordDocument";

// File Information Block, Word 97 and later
const FIB_IDENT: u16 = 0xA5EC;
const FIB_NFIB: usize = 0x02;
const FIB_FLAGS: usize = 0x0A;
const FIB_CCP_TEXT: usize = 0x4C;
const FIB_FC_CLX: usize = 0x1A2;
const FIB_LCB_CLX: usize = 0x1A6;
const WORD97_NFIB: u16 = 0x00C0;
const FLAG_ENCRYPTED: u16 = 0x0100;
const FLAG_TABLE_1: u16 = 0x0200;

// Piece table inside the table stream
const CLXT_PRC: u8 = 0x01;
const CLXT_PCDT: u8 = 0x02;
const PCD_SIZE: usize = 8;
const FC_COMPRESSED: u32 = 0x4000_0000;
const FC_MASK: u32 = 0x3FFF_FFFF;

// Special characters in the text stream
const FIELD_BEGIN: char = '\u{13}';
const FIELD_SEPARATOR: char = '\u{14}';
const FIELD_END: char = '\u{15}';
const CELL_MARK: char = '\u{07}';
const NON_BREAKING_HYPHEN: char = '\u{1E}';
const OPTIONAL_HYPHEN: char = '\u{1F}';

/// A run of characters stored contiguously in the WordDocument stream
struct Piece {
    cp_start: u32,
    cp_end: u32,
    fc: u32,
    compressed: bool,
}

/// Main document text, assembled from the piece table.
///
/// Footnotes, headers, comments and text boxes follow the main text in
/// character positions and are left out.
pub(super) fn extract(container: &mut Container) -> Result<String, String> {
    let document = read_stream(container, DOCUMENT_STREAM)?;

    if read_u16(&document, 0)? != FIB_IDENT {
        return Err("WordDocument stream does not start with a file information block".into());
    }
    if read_u16(&document, FIB_NFIB)? < WORD97_NFIB {
        return Err("Word 95 and older documents are not supported".into());
    }

    let flags = read_u16(&document, FIB_FLAGS)?;
    if flags & FLAG_ENCRYPTED != 0 {
        return Err("document is password protected".into());
    }

    let ccp_text = read_u32(&document, FIB_CCP_TEXT)?;
    let fc_clx = read_u32(&document, FIB_FC_CLX)? as usize;
    let lcb_clx = read_u32(&document, FIB_LCB_CLX)? as usize;

    let table_name = if flags & FLAG_TABLE_1 != 0 {
        "1Table"
    } else {
        "0Table"
    };
    let table = read_stream(container, table_name)?;
    let clx = table
        .get(fc_clx..fc_clx.saturating_add(lcb_clx))
        .ok_or("piece table lies outside the table stream")?;

    let pieces = parse_pieces(clx)?;
    let raw = assemble(&document, &pieces, ccp_text)?;
    Ok(clean_text(&raw))
}

fn parse_pieces(clx: &[u8]) -> Result<Vec<Piece>, String> {
    // Property modifiers come first and carry no text
    let mut pos = 0;
    while clx.get(pos) == Some(&CLXT_PRC) {
        let size = read_u16(clx, pos + 1)? as usize;
        pos += 3 + size;
    }

    if clx.get(pos) != Some(&CLXT_PCDT) {
        return Err("piece table is malformed".into());
    }
    let lcb = read_u32(clx, pos + 1)? as usize;
    let plc = clx
        .get(pos + 5..pos + 5 + lcb)
        .ok_or("piece table is truncated")?;
    if lcb < 4 || (lcb - 4) % (4 + PCD_SIZE) != 0 {
        return Err("piece table is malformed".into());
    }

    let count = (lcb - 4) / (4 + PCD_SIZE);
    let descriptors = (count + 1) * 4;
    (0..count)
        .map(|i| {
            let fc = read_u32(plc, descriptors + i * PCD_SIZE + 2)?;
            Ok(Piece {
                cp_start: read_u32(plc, i * 4)?,
                cp_end: read_u32(plc, (i + 1) * 4)?,
                fc: fc & FC_MASK,
                compressed: fc & FC_COMPRESSED != 0,
            })
        })
        .collect()
}

fn assemble(document: &[u8], pieces: &[Piece], ccp_text: u32) -> Result<String, String> {
    let mut text = String::new();

    for piece in pieces {
        if piece.cp_start >= ccp_text {
            break;
        }
        let chars = piece.cp_end.min(ccp_text).saturating_sub(piece.cp_start) as usize;

        if piece.compressed {
            let start = piece.fc as usize / 2;
            let bytes = document
                .get(start..start + chars)
                .ok_or("text piece lies outside the WordDocument stream")?;
            text.push_str(&decode_cp1252(bytes));
        } else {
            let start = piece.fc as usize;
            let bytes = document
                .get(start..start + chars * 2)
                .ok_or("text piece lies outside the WordDocument stream")?;
            text.push_str(&decode_utf16le(bytes));
        }
    }

    Ok(text)
}

/// Drop field instructions and control marks, keeping field results
fn clean_text(raw: &str) -> String {
    let mut text = String::with_capacity(raw.len());
    // One entry per open field: true while still inside its instruction
    let mut fields: Vec<bool> = Vec::new();

    for c in raw.chars() {
        match c {
            FIELD_BEGIN => fields.push(true),
            FIELD_SEPARATOR => {
                if let Some(in_instruction) = fields.last_mut() {
                    *in_instruction = false;
                }
            }
            FIELD_END => {
                fields.pop();
            }
            _ if fields.iter().any(|in_instruction| *in_instruction) => {}
            '\r' | '\u{0B}' | '\u{0C}' => text.push('\n'),
            CELL_MARK | '\t' => text.push('\t'),
            NON_BREAKING_HYPHEN => text.push('-'),
            OPTIONAL_HYPHEN => {}
            c if c.is_control() => {}
            c => text.push(c),
        }
    }

    text.trim().to_string()
}
