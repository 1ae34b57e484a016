//! Text tokenizer

/// Split text into ordered lowercase tokens.
///
/// Lowercases, strips everything outside `[a-z0-9+#.\-]` (so `c++`,
/// `c#`, `node.js` and `co-op` survive), splits on whitespace, drops
/// empty tokens. Pure and deterministic.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '+' | '#' | '.' | '-') {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
