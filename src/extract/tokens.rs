// src/extract/tokens.rs
// =============================================================================
// Word tokenization.
//
// A word is a maximal run of alphanumeric characters. Everything else
// (whitespace, punctuation, symbols) separates words, so:
//   "well-known"  -> "well", "known"
//   "don't"       -> "don", "t"
//   "Rust 2024!"  -> "rust", "2024"
// Words are lowercased so counting is case-insensitive. Lowercasing can
// introduce combining marks ("İ" -> "i\u{307}"), which are dropped again.
// =============================================================================

// Splits `text` into lowercase word tokens, lazily
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .map(|token| {
            token
                .to_lowercase()
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
        })
        .filter(|token| !token.is_empty())
}
