//! End-to-end properties of the annotation pipeline.

use cogito::analysis::{
    analyze, AnalysisError, Category, Emotion, Fingerprint, Lexicon, ThoughtInput,
};

fn input(content: &str) -> ThoughtInput<'_> {
    ThoughtInput::new(content, Category::Reflection)
}

#[test]
fn analyze_is_deterministic_byte_for_byte() {
    let lexicon = Lexicon::builtin();
    let history = vec![
        Fingerprint::from_content(&lexicon, "previous entry about build systems"),
        Fingerprint::from_content(&lexicon, "another one about caching layers"),
    ];
    let content = "Refactored the cache layer — frustrated with the build, but it's progress.";

    let first = analyze(&lexicon, &input(content), &history).unwrap();
    let second = analyze(&lexicon, &input(content), &history).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.sentiment.to_bits(), second.sentiment.to_bits());
    assert_eq!(first.complexity.to_bits(), second.complexity.to_bits());
    assert_eq!(first.novelty.to_bits(), second.novelty.to_bits());
    assert_eq!(first.importance.to_bits(), second.importance.to_bits());
    assert_eq!(first.keywords, second.keywords);
}

#[test]
fn all_outputs_respect_their_bounds() {
    let lexicon = Lexicon::builtin();
    let samples = [
        "x",
        "One.",
        "I absolutely love this amazing, wonderful, perfect day!",
        "hate hate hate, broken broken broken, everything failed",
        "The sentence. Another sentence. A third sentence with more words in it.",
        "don't don't don't not never no",
    ];
    for content in samples {
        let a = analyze(&lexicon, &input(content), &[]).unwrap();
        assert!((-1.0..=1.0).contains(&a.sentiment), "sentiment for {content:?}");
        assert!((0.0..=1.0).contains(&a.complexity), "complexity for {content:?}");
        assert!((0.0..=1.0).contains(&a.novelty), "novelty for {content:?}");
        assert!((0.0..=1.0).contains(&a.importance), "importance for {content:?}");
    }
}

#[test]
fn empty_input_is_the_only_failure() {
    let lexicon = Lexicon::builtin();
    assert_eq!(
        analyze(&lexicon, &input(""), &[]),
        Err(AnalysisError::EmptyContent)
    );
    assert_eq!(
        analyze(&lexicon, &input("   \t  "), &[]),
        Err(AnalysisError::EmptyContent)
    );
    // Degenerate but valid inputs never fail.
    assert!(analyze(&lexicon, &input("?"), &[]).is_ok());
    assert!(analyze(&lexicon, &input("a"), &[]).is_ok());
}

#[test]
fn novelty_saturates_with_empty_history() {
    let lexicon = Lexicon::builtin();
    for content in ["one word", "a much longer entry with several words", "zzz"] {
        let a = analyze(&lexicon, &input(content), &[]).unwrap();
        assert_eq!(a.novelty, 1.0, "for {content:?}");
    }
}

#[test]
fn novelty_strictly_drops_on_repeat() {
    let lexicon = Lexicon::builtin();
    let content = "planning the next sprint milestones";

    let first = analyze(&lexicon, &input(content), &[]).unwrap();
    let history = vec![Fingerprint::from_content(&lexicon, content)];
    let second = analyze(&lexicon, &input(content), &history).unwrap();

    assert!(second.novelty < first.novelty);
}

#[test]
fn explicit_importance_override_always_wins() {
    let lexicon = Lexicon::builtin();
    for value in [0.0, 0.25, 0.5, 1.0] {
        let input = ThoughtInput {
            content: "An absolutely amazing, incredibly important decision!",
            category: Category::Decision,
            importance: Some(value),
        };
        let a = analyze(&lexicon, &input, &[]).unwrap();
        assert_eq!(a.importance, value);
    }
}

#[test]
fn keyword_rich_positive_text_labels_excited() {
    let lexicon = Lexicon::builtin();
    let a = analyze(
        &lexicon,
        &input("This is amazing, I'm so excited!"),
        &[],
    )
    .unwrap();
    assert_eq!(a.emotion, Some(Emotion::Excited));
    assert!(a.sentiment > 0.0);
}

#[test]
fn flat_factual_text_gets_neutral_defaults() {
    let lexicon = Lexicon::builtin();
    let a = analyze(&lexicon, &input("The meeting is at 3pm."), &[]).unwrap();
    assert_eq!(a.emotion, None);
    assert_eq!(a.sentiment, 0.0);
    assert!(a.importance > 0.0); // category weight + novelty still count
}

#[test]
fn emotion_tie_break_is_stable_across_runs() {
    let lexicon = Lexicon::builtin();
    // "glad" (happy) and "upset" (sad) carry equal weight; the happy table
    // is declared first and must win every time.
    for _ in 0..20 {
        let a = analyze(&lexicon, &input("glad but upset"), &[]).unwrap();
        assert_eq!(a.emotion, Some(Emotion::Happy));
    }
}

#[test]
fn crafted_lexicon_controls_classification() {
    let lexicon = Lexicon::from_tables(
        &[
            (Emotion::Calm, &["breeze"]),
            (Emotion::Anxious, &["storm"]),
        ],
        &["breeze"],
        &["storm"],
        &["not"],
        &["the"],
    );
    let input = ThoughtInput::new("the storm beats the breeze, storm again", Category::Reflection);
    let a = analyze(&lexicon, &input, &[]).unwrap();
    assert_eq!(a.emotion, Some(Emotion::Anxious));
    assert!(a.sentiment < 0.0);
}

#[test]
fn history_is_not_mutated_by_analysis() {
    let lexicon = Lexicon::builtin();
    let history = vec![
        Fingerprint::from_content(&lexicon, "alpha beta"),
        Fingerprint::from_content(&lexicon, "gamma delta"),
    ];
    let before = history.clone();
    let _ = analyze(&lexicon, &input("alpha gamma epsilon"), &history).unwrap();
    assert_eq!(history, before);
}
