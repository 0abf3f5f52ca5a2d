//! Complexity and novelty scoring.
//!
//! Complexity is a fixed-weight blend of lexical/structural features.
//! Novelty compares a content [`Fingerprint`] against a caller-supplied
//! history of fingerprints; the pipeline never owns or mutates that history.

use std::collections::BTreeSet;

use crate::analysis::lexicon::Lexicon;
use crate::analysis::tokenize::TokenSet;

/// Average word length that maps to maximum word complexity.
const WORD_LENGTH_SCALE: f64 = 10.0;
/// Words-per-sentence count that maps to maximum structural complexity.
const SENTENCE_LENGTH_SCALE: f64 = 20.0;

/// Complexity blend weights. Must sum to 1.
const WEIGHT_WORD_LENGTH: f64 = 0.3;
const WEIGHT_SENTENCE_LENGTH: f64 = 0.4;
const WEIGHT_VOCABULARY: f64 = 0.3;

/// Score lexical/structural complexity in `[0.0, 1.0]`.
///
/// Blends average word length, words per sentence, and vocabulary diversity
/// (unique words / total words), each normalized against a fixed empirical
/// bound rather than anything computed at runtime. A word-free token set
/// (pure punctuation) scores 0.0.
pub fn complexity(tokens: &TokenSet) -> f64 {
    if tokens.words.is_empty() {
        return 0.0;
    }
    let word_count = tokens.words.len() as f64;

    let avg_word_len =
        tokens.words.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / word_count;
    let words_per_sentence = word_count / tokens.sentence_count as f64;
    let unique = tokens.words.iter().collect::<BTreeSet<_>>().len() as f64;

    let word_factor = (avg_word_len / WORD_LENGTH_SCALE).min(1.0);
    let sentence_factor = (words_per_sentence / SENTENCE_LENGTH_SCALE).min(1.0);
    let vocabulary_factor = unique / word_count;

    let blended = WEIGHT_WORD_LENGTH * word_factor
        + WEIGHT_SENTENCE_LENGTH * sentence_factor
        + WEIGHT_VOCABULARY * vocabulary_factor;

    blended.clamp(0.0, 1.0)
}

/// A compact, order-free representation of one piece of content, used to
/// detect repetition. Built from the stop-word-filtered token set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint(BTreeSet<String>);

impl Fingerprint {
    /// Fingerprint an already-tokenized piece of content.
    pub fn from_token_set(tokens: &TokenSet) -> Self {
        Self(tokens.tokens.iter().cloned().collect())
    }

    /// Fingerprint raw content directly — the form the persistence layer
    /// uses to rebuild history from stored rows. Tolerates empty content
    /// (yields an empty fingerprint) since stored rows were validated on
    /// the way in.
    pub fn from_content(lexicon: &Lexicon, content: &str) -> Self {
        let tokens = content
            .split_whitespace()
            .map(|w| w.to_lowercase())
            .filter_map(|w| {
                let t = w.trim_matches(|c: char| !c.is_alphanumeric()).to_string();
                (!t.is_empty() && !lexicon.is_stop_word(&t)).then_some(t)
            })
            .collect();
        Self(tokens)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Jaccard similarity in `[0.0, 1.0]`. Two empty fingerprints are
    /// identical (1.0); an empty/non-empty pair shares nothing (0.0).
    pub fn similarity(&self, other: &Fingerprint) -> f64 {
        if self.0.is_empty() && other.0.is_empty() {
            return 1.0;
        }
        let intersection = self.0.intersection(&other.0).count() as f64;
        let union = self.0.union(&other.0).count() as f64;
        if union == 0.0 {
            0.0
        } else {
            intersection / union
        }
    }
}

/// Score novelty in `[0.0, 1.0]` as 1 − max similarity to any historical
/// fingerprint. Empty history means maximally novel (1.0).
pub fn novelty(current: &Fingerprint, history: &[Fingerprint]) -> f64 {
    let max_similarity = history
        .iter()
        .map(|h| current.similarity(h))
        .fold(0.0f64, f64::max);
    (1.0 - max_similarity).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tokenize::tokenize;

    fn token_set(content: &str) -> TokenSet {
        tokenize(content, &Lexicon::builtin()).unwrap()
    }

    #[test]
    fn complexity_is_bounded() {
        for content in [
            "a",
            "Short one.",
            "An exceptionally protracted, multitudinously polysyllabic formulation \
             demonstrating extraordinarily sophisticated terminological flourishes.",
        ] {
            let c = complexity(&token_set(content));
            assert!((0.0..=1.0).contains(&c), "complexity {c} out of range");
        }
    }

    #[test]
    fn repetitive_text_scores_below_varied_text() {
        let repetitive = complexity(&token_set("word word word word word word"));
        let varied = complexity(&token_set("every single term differs here completely"));
        assert!(varied > repetitive);
    }

    #[test]
    fn punctuation_only_content_scores_zero() {
        assert_eq!(complexity(&token_set("?!")), 0.0);
    }

    #[test]
    fn fingerprint_of_identical_content_is_identical() {
        let lexicon = Lexicon::builtin();
        let a = Fingerprint::from_content(&lexicon, "Rust is a systems language");
        let b = Fingerprint::from_content(&lexicon, "Rust is a systems language");
        assert_eq!(a, b);
        assert_eq!(a.similarity(&b), 1.0);
    }

    #[test]
    fn similarity_is_symmetric() {
        let lexicon = Lexicon::builtin();
        let a = Fingerprint::from_content(&lexicon, "red green blue");
        let b = Fingerprint::from_content(&lexicon, "green blue yellow purple");
        assert_eq!(a.similarity(&b), b.similarity(&a));
        // |{green, blue}| / |{red, green, blue, yellow, purple}|
        assert!((a.similarity(&b) - 2.0 / 5.0).abs() < 1e-12);
    }

    #[test]
    fn empty_history_is_maximally_novel() {
        let lexicon = Lexicon::builtin();
        let fp = Fingerprint::from_content(&lexicon, "anything at all");
        assert_eq!(novelty(&fp, &[]), 1.0);
    }

    #[test]
    fn exact_repeat_has_zero_novelty() {
        let lexicon = Lexicon::builtin();
        let first = Fingerprint::from_content(&lexicon, "launch checklist review");
        let second = Fingerprint::from_content(&lexicon, "launch checklist review");
        assert_eq!(novelty(&second, &[first]), 0.0);
    }

    #[test]
    fn novelty_uses_the_closest_history_entry() {
        let lexicon = Lexicon::builtin();
        let current = Fingerprint::from_content(&lexicon, "alpha beta gamma");
        let near = Fingerprint::from_content(&lexicon, "alpha beta delta");
        let far = Fingerprint::from_content(&lexicon, "omega psi chi");
        let n = novelty(&current, &[far.clone(), near.clone()]);
        // Closest is `near`: jaccard 2/4 → novelty 0.5.
        assert!((n - 0.5).abs() < 1e-12);
        // Order of history entries must not matter.
        assert_eq!(n, novelty(&current, &[near, far]));
    }

    #[test]
    fn two_empty_fingerprints_are_identical() {
        let lexicon = Lexicon::builtin();
        let a = Fingerprint::from_content(&lexicon, "");
        let b = Fingerprint::from_content(&lexicon, "the and of");
        assert!(a.is_empty() && b.is_empty());
        assert_eq!(a.similarity(&b), 1.0);
        assert_eq!(novelty(&a, &[b]), 0.0);
    }
}
