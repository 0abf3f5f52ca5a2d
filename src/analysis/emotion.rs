//! Emotion classification by weighted keyword overlap.

use crate::analysis::lexicon::Lexicon;
use crate::analysis::tokenize::TokenSet;
use crate::analysis::types::Emotion;

/// Score the token set against every emotion table and return the single
/// best label.
///
/// Each token contributes its keyword weight to every table that contains
/// it; repeated tokens count each time they occur. The strictly highest
/// total wins. Ties go to the label declared earlier in the lexicon's table
/// order, and a zero maximum means no label at all.
pub fn classify(lexicon: &Lexicon, tokens: &TokenSet) -> Option<Emotion> {
    let mut best: Option<(Emotion, f64)> = None;

    for (emotion, table) in lexicon.emotion_tables() {
        let score: f64 = tokens
            .tokens
            .iter()
            .filter_map(|t| table.get(t.as_str()))
            .sum();

        if score <= 0.0 {
            continue;
        }
        match best {
            // Strictly greater replaces; equal keeps the earlier entry.
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((*emotion, score)),
        }
    }

    best.map(|(emotion, _)| emotion)
}
