//! Text normalization — the first stage of the annotation pipeline.
//!
//! Turns raw content into a [`TokenSet`]: the full normalized word list
//! (word-length statistics need real words) plus a stop-word-filtered token
//! list for keyword and emotion matching.

use crate::analysis::lexicon::Lexicon;
use crate::analysis::types::AnalysisError;

/// Normalized view of one piece of content.
///
/// Derived deterministically from the input string and never mutated after
/// creation.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSet {
    /// All normalized words, in order.
    pub words: Vec<String>,
    /// Normalized words with stop words removed, in order.
    pub tokens: Vec<String>,
    /// Count of sentence-terminal punctuation marks, minimum 1.
    pub sentence_count: usize,
    /// Character count of the raw content.
    pub char_count: usize,
}

/// Normalize `content` into a [`TokenSet`].
///
/// Lowercases, strips punctuation outside word boundaries (interior
/// apostrophes and hyphens survive, so "don't" and "well-known" stay whole),
/// and splits on whitespace. Pure function of its input.
pub fn tokenize(content: &str, lexicon: &Lexicon) -> Result<TokenSet, AnalysisError> {
    if content.trim().is_empty() {
        return Err(AnalysisError::EmptyContent);
    }

    let words: Vec<String> = content
        .split_whitespace()
        .filter_map(normalize_word)
        .collect();

    let tokens = words
        .iter()
        .filter(|w| !lexicon.is_stop_word(w))
        .cloned()
        .collect();

    let sentence_count = content
        .chars()
        .filter(|c| matches!(c, '.' | '!' | '?'))
        .count()
        .max(1);

    Ok(TokenSet {
        words,
        tokens,
        sentence_count,
        char_count: content.chars().count(),
    })
}

/// Lowercase a raw whitespace-split chunk and trim non-alphanumeric
/// characters from both ends. Returns `None` for pure punctuation.
fn normalize_word(raw: &str) -> Option<String> {
    let lower = raw.to_lowercase();
    let trimmed = lower.trim_matches(|c: char| !c.is_alphanumeric());
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
