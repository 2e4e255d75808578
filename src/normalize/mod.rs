//! Lyric normalization
//!
//! Turns raw lyric text into the ordered token stream the game plays back.
//! Order and repetition are preserved; only punctuation is removed.

/// Character that splits a word into sub-words
const HYPHEN: char = '-';

/// Normalize raw lyric text into ordered, alphanumeric-only tokens.
///
/// Words are split on whitespace, then at every hyphen. Each part keeps only
/// its alphanumeric characters; parts left empty are dropped.
pub fn normalize(raw: &str) -> Vec<String> {
    raw.split_whitespace()
        .flat_map(|word| word.split(HYPHEN))
        .filter_map(strip_to_alphanumeric)
        .collect()
}

fn strip_to_alphanumeric(part: &str) -> Option<String> {
    let token: String = part.chars().filter(|c| c.is_alphanumeric()).collect();
    (!token.is_empty()).then_some(token)
}

/// True if `token` could have been produced by [`normalize`]
pub fn is_valid_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphanumeric)
}
