use regex::Regex;
use std::sync::OnceLock;

/// Sentence and clause ends, Latin and Arabic punctuation
fn boundary_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[.!?؟;؛:,،]+\s+").expect("static boundary pattern"))
}

/// Split text into batches of at most `max_chars` characters.
///
/// Batches are packed greedily from whole sentences/clauses. A clause that is
/// itself too long is split between words, and a word that is too long is
/// split between characters. Lengths are counted in `char`s, not bytes, so
/// Arabic text is measured the way providers measure it.
pub fn split_into_batches(text: &str, max_chars: usize) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut pieces = Vec::new();
    let mut last_end = 0;
    for mat in boundary_pattern().find_iter(text) {
        pieces.push(&text[last_end..mat.end()]);
        last_end = mat.end();
    }
    if last_end < text.len() {
        pieces.push(&text[last_end..]);
    }

    let mut batches = Vec::new();
    let mut current_batch = String::new();

    for piece in pieces {
        let piece_len = piece.chars().count();

        // If adding this piece would exceed the limit, save current batch
        if !current_batch.is_empty() && current_batch.chars().count() + piece_len > max_chars {
            flush(&mut batches, &mut current_batch);
        }

        if piece_len > max_chars {
            batches.extend(split_between_words(piece, max_chars));
        } else {
            current_batch.push_str(piece);
        }
    }

    flush(&mut batches, &mut current_batch);
    batches
}

fn flush(batches: &mut Vec<String>, current_batch: &mut String) {
    let trimmed = current_batch.trim();
    if !trimmed.is_empty() {
        batches.push(trimmed.to_string());
    }
    current_batch.clear();
}

fn split_between_words(piece: &str, max_chars: usize) -> Vec<String> {
    let mut batches = Vec::new();
    let mut current_batch = String::new();

    for word in piece.split_whitespace() {
        let word_len = word.chars().count();
        let separator = usize::from(!current_batch.is_empty());

        if current_batch.chars().count() + separator + word_len > max_chars {
            flush(&mut batches, &mut current_batch);
        }

        if word_len > max_chars {
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(max_chars) {
                batches.push(chunk.iter().collect());
            }
            continue;
        }

        if !current_batch.is_empty() {
            current_batch.push(' ');
        }
        current_batch.push_str(word);
    }

    flush(&mut batches, &mut current_batch);
    batches
}
