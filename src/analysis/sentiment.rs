//! Sentiment scoring from polarity-word counts.

use crate::analysis::lexicon::Lexicon;
use crate::analysis::tokenize::TokenSet;

/// A negator flips the polarity of the next polarity word occurring within
/// this many following words.
const NEGATION_WINDOW: usize = 2;

/// Score the token set's polarity balance in `[-1.0, 1.0]`.
///
/// score = (positive − negative) / max(1, positive + negative), so text with
/// no polarity words scores exactly 0.0. Scans the full word list (not the
/// stop-filtered tokens) because negators like "not" are also stop words.
/// Each negator flips at most one following polarity word; negators do not
/// stack.
pub fn score(lexicon: &Lexicon, tokens: &TokenSet) -> f64 {
    let mut positive = 0u32;
    let mut negative = 0u32;
    let mut flip_until: Option<usize> = None;

    for (i, word) in tokens.words.iter().enumerate() {
        if lexicon.is_negator(word) {
            flip_until = Some(i + NEGATION_WINDOW);
            continue;
        }

        let mut polarity = lexicon.polarity(word);
        if polarity == 0 {
            continue;
        }
        if let Some(limit) = flip_until {
            if i <= limit {
                polarity = -polarity;
            }
            flip_until = None;
        }
        if polarity > 0 {
            positive += 1;
        } else {
            negative += 1;
        }
    }

    let hits = positive + negative;
    (f64::from(positive) - f64::from(negative)) / f64::from(hits.max(1))
}
