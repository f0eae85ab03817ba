use super::read_bytes;
use crate::domain::extraction::DocumentSegment;
use std::path::Path;

/// Destinations whose content is metadata, not body text
const SKIPPED_DESTINATIONS: &[&str] = &[
    "fonttbl",
    "colortbl",
    "stylesheet",
    "info",
    "pict",
    "header",
    "footer",
    "listtable",
    "listoverridetable",
    "themedata",
    "datastore",
    "latentstyles",
];

pub fn load(path: &Path) -> Result<Vec<DocumentSegment>, String> {
    let bytes = read_bytes(path)?;
    if !bytes.starts_with(b"{\\rtf") {
        return Err(format!("'{}' is not an RTF document", path.display()));
    }

    let text = rtf_to_text(&String::from_utf8_lossy(&bytes));
    Ok(vec![DocumentSegment::new(text.trim())])
}

#[derive(Clone, Copy)]
struct GroupState {
    skip: bool,
    /// Characters to drop after a `\uN` escape
    unicode_skip: usize,
}

/// Strip RTF markup down to its visible text.
///
/// Handles groups, control words and symbols, `\'hh` escapes (read as
/// Latin-1) and `\uN` escapes. Ignorable (`\*`) and metadata destinations are
/// dropped.
pub fn rtf_to_text(rtf: &str) -> String {
    let mut out = String::new();
    let mut stack: Vec<GroupState> = Vec::new();
    let mut state = GroupState {
        skip: false,
        unicode_skip: 1,
    };
    let mut pending_fallback = 0usize;
    let mut chars = rtf.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                stack.push(state);
                pending_fallback = 0;
            }
            '}' => {
                state = stack.pop().unwrap_or(state);
                pending_fallback = 0;
            }
            '\\' => match chars.peek().copied() {
                Some(symbol @ ('\\' | '{' | '}')) => {
                    chars.next();
                    emit(&mut out, &state, &mut pending_fallback, symbol);
                }
                Some('\'') => {
                    chars.next();
                    let hex: String = chars.by_ref().take(2).collect();
                    if let Ok(byte) = u8::from_str_radix(&hex, 16) {
                        emit(&mut out, &state, &mut pending_fallback, char::from(byte));
                    }
                }
                Some('*') => {
                    chars.next();
                    state.skip = true;
                }
                Some('~') => {
                    chars.next();
                    emit(&mut out, &state, &mut pending_fallback, '\u{00A0}');
                }
                Some(ch) if ch.is_ascii_alphabetic() => {
                    let mut word = String::new();
                    while let Some(ch) = chars.peek().copied().filter(char::is_ascii_alphabetic) {
                        word.push(ch);
                        chars.next();
                    }
                    let mut digits = String::new();
                    if chars.peek() == Some(&'-') {
                        digits.push('-');
                        chars.next();
                    }
                    while let Some(ch) = chars.peek().copied().filter(char::is_ascii_digit) {
                        digits.push(ch);
                        chars.next();
                    }
                    // A single space delimits the control word and is not text
                    if chars.peek() == Some(&' ') {
                        chars.next();
                    }
                    let parameter: Option<i32> = digits.parse().ok();
                    apply_control_word(&word, parameter, &mut state, &mut out, &mut pending_fallback);
                }
                Some(_) => {
                    chars.next();
                }
                None => {}
            },
            '\r' | '\n' => {}
            other => emit(&mut out, &state, &mut pending_fallback, other),
        }
    }

    out
}

fn emit(out: &mut String, state: &GroupState, pending_fallback: &mut usize, c: char) {
    if *pending_fallback > 0 {
        *pending_fallback -= 1;
        return;
    }
    if !state.skip {
        out.push(c);
    }
}

fn apply_control_word(
    word: &str,
    parameter: Option<i32>,
    state: &mut GroupState,
    out: &mut String,
    pending_fallback: &mut usize,
) {
    if SKIPPED_DESTINATIONS.contains(&word) {
        state.skip = true;
        return;
    }
    if state.skip {
        return;
    }

    match word {
        "par" | "line" | "sect" | "page" => out.push('\n'),
        "tab" | "cell" => out.push('\t'),
        "row" => out.push('\n'),
        "uc" => state.unicode_skip = parameter.unwrap_or(1).max(0) as usize,
        "u" => {
            if let Some(value) = parameter {
                // Values above 32767 are written as negative 16-bit integers
                let code = (if value < 0 { value + 65536 } else { value }) as u32;
                if let Some(ch) = char::from_u32(code) {
                    out.push(ch);
                }
                *pending_fallback = state.unicode_skip;
            }
        }
        _ => {}
    }
}
