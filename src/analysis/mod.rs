//! Rule-based text annotation pipeline.
//!
//! Converts raw free text into an [`Annotation`]: emotion label, sentiment,
//! complexity, novelty, keyword set, and an aggregate importance score.
//! [`analyze`] is the single entry point; it sequences the stages below and
//! is deterministic, side-effect-free, and total apart from rejecting empty
//! content.
//!
//! - [`lexicon`] — immutable keyword/weight tables, built once at startup
//! - [`tokenize`] — normalization into a [`TokenSet`](tokenize::TokenSet)
//! - [`emotion`] — weighted keyword-overlap classification
//! - [`sentiment`] — polarity balance with negation handling
//! - [`score`] — complexity features and fingerprint-based novelty
//! - [`importance`] — fixed-weight aggregation of everything above

pub mod emotion;
pub mod importance;
pub mod lexicon;
pub mod score;
pub mod sentiment;
pub mod tokenize;
pub mod types;

pub use lexicon::Lexicon;
pub use score::Fingerprint;
pub use types::{AnalysisError, Annotation, Category, Emotion, ThoughtInput};

/// Maximum number of keywords retained per annotation.
pub const MAX_KEYWORDS: usize = 10;
/// Minimum character length for a token to qualify as a keyword.
pub const MIN_KEYWORD_LEN: usize = 3;

/// Run the full annotation pipeline over one input.
///
/// `history` is the caller's rolling collection of previously-seen content
/// fingerprints; it is read for novelty scoring and never mutated — the
/// caller decides whether and when to add the new fingerprint.
///
/// Identical `(input, history)` pairs always produce bit-identical
/// annotations. The only failure mode is empty or whitespace-only content;
/// every other degenerate input resolves to neutral defaults (no emotion,
/// sentiment 0.0, novelty 1.0 against empty history).
pub fn analyze(
    lexicon: &Lexicon,
    input: &ThoughtInput<'_>,
    history: &[Fingerprint],
) -> Result<Annotation, AnalysisError> {
    let tokens = tokenize::tokenize(input.content, lexicon)?;

    let emotion = emotion::classify(lexicon, &tokens);
    let sentiment = sentiment::score(lexicon, &tokens);
    let complexity = score::complexity(&tokens);

    let fingerprint = Fingerprint::from_token_set(&tokens);
    let novelty = score::novelty(&fingerprint, history);

    let importance = importance::aggregate(
        input.category,
        sentiment,
        complexity,
        novelty,
        input.importance,
    );

    Ok(Annotation {
        emotion,
        sentiment,
        complexity,
        novelty,
        importance,
        keywords: extract_keywords(&tokens),
    })
}

/// Keywords: stop-filtered alphabetic tokens of at least [`MIN_KEYWORD_LEN`]
/// chars, deduplicated, first-occurrence order, capped at [`MAX_KEYWORDS`].
fn extract_keywords(tokens: &tokenize::TokenSet) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut keywords = Vec::new();

    for token in &tokens.tokens {
        if token.chars().count() < MIN_KEYWORD_LEN
            || !token.chars().all(|c| c.is_alphabetic())
        {
            continue;
        }
        if seen.insert(token.clone()) {
            keywords.push(token.clone());
            if keywords.len() == MAX_KEYWORDS {
                break;
            }
        }
    }

    keywords
}
