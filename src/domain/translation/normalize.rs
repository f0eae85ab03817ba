/// Marian control markers that leak into decoded output
pub const CONTROL_TOKENS: &[&str] = &["<pad>", "</s>"];

/// Remove padding and end-of-sequence markers and surrounding whitespace.
///
/// Runs to a fixed point, so the result never contains a marker even when
/// removing one splices two halves of another together.
pub fn strip_control_tokens(text: &str) -> String {
    let mut current = text.to_string();

    loop {
        let stripped = CONTROL_TOKENS
            .iter()
            .fold(current.clone(), |acc, token| acc.replace(token, ""));

        if stripped == current {
            break;
        }
        current = stripped;
    }

    current.trim().to_string()
}
