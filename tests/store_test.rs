//! Write/read lifecycle over the thought store.

mod helpers;

use cogito::analysis::{Category, Emotion, Lexicon};
use cogito::config::AnalysisConfig;
use cogito::thought::store::{
    create_thought, delete_thought, get_thought, update_thought,
};
use cogito::thought::types::{NewThought, ThoughtUpdate};

use helpers::{insert_thought, test_db};

#[test]
fn created_thought_round_trips() {
    let mut conn = test_db();
    let stored = insert_thought(
        &mut conn,
        "Decided to adopt the new build pipeline.",
        Category::Decision,
    );

    let fetched = get_thought(&conn, &stored.id).unwrap().unwrap();
    assert_eq!(fetched.id, stored.id);
    assert_eq!(fetched.category, Category::Decision);
    assert_eq!(fetched.content, stored.content);
    assert_eq!(fetched.sentiment.to_bits(), stored.sentiment.to_bits());
    assert_eq!(fetched.novelty.to_bits(), stored.novelty.to_bits());
    assert_eq!(fetched.importance.to_bits(), stored.importance.to_bits());
    assert_eq!(fetched.keywords, stored.keywords);
    assert_eq!(fetched.created_at, stored.created_at);
}

#[test]
fn annotations_reflect_the_pipeline() {
    let mut conn = test_db();
    let thought = insert_thought(
        &mut conn,
        "I'm so happy and grateful — this wonderful launch succeeded!",
        Category::Reflection,
    );

    assert_eq!(thought.emotion, Some(Emotion::Happy));
    assert!(thought.sentiment > 0.0);
    assert_eq!(thought.novelty, 1.0);
    assert!(thought.keywords.contains(&"launch".to_string()));
}

#[test]
fn novelty_decreases_as_history_accumulates() {
    let mut conn = test_db();
    let first = insert_thought(&mut conn, "standup notes for monday", Category::Observation);
    let second = insert_thought(&mut conn, "standup notes for monday", Category::Observation);
    let third = insert_thought(&mut conn, "standup notes for tuesday", Category::Observation);

    assert_eq!(first.novelty, 1.0);
    assert_eq!(second.novelty, 0.0);
    assert!(third.novelty > 0.0 && third.novelty < 1.0);
}

#[test]
fn caller_importance_and_emotion_survive_storage() {
    let mut conn = test_db();
    let lexicon = Lexicon::builtin();
    let thought = create_thought(
        &mut conn,
        &lexicon,
        &AnalysisConfig::default(),
        &NewThought {
            category: Category::Error,
            content: "Deploy failed with a broken migration.".to_string(),
            emotion: Some(Emotion::Frustrated),
            importance: Some(0.97),
            ..Default::default()
        },
    )
    .unwrap();

    let fetched = get_thought(&conn, &thought.id).unwrap().unwrap();
    assert_eq!(fetched.emotion, Some(Emotion::Frustrated));
    assert_eq!(fetched.importance, 0.97);
}

#[test]
fn update_without_content_change_preserves_scores() {
    let mut conn = test_db();
    let lexicon = Lexicon::builtin();
    let original = insert_thought(&mut conn, "A quiet note about nothing much.", Category::Reflection);

    let updated = update_thought(
        &mut conn,
        &lexicon,
        &AnalysisConfig::default(),
        &original.id,
        &ThoughtUpdate {
            tags: Some(vec!["Later".to_string()]),
            ..Default::default()
        },
    )
    .unwrap()
    .unwrap();

    assert_eq!(updated.tags, vec!["later"]);
    assert_eq!(updated.sentiment.to_bits(), original.sentiment.to_bits());
    assert_eq!(updated.novelty.to_bits(), original.novelty.to_bits());
    assert!(updated.updated_at >= original.updated_at);
}

#[test]
fn update_with_content_change_reannotates() {
    let mut conn = test_db();
    let lexicon = Lexicon::builtin();
    let original = insert_thought(
        &mut conn,
        "Confused and unsure about the approach.",
        Category::Reflection,
    );
    assert_eq!(original.emotion, Some(Emotion::Confused));

    let updated = update_thought(
        &mut conn,
        &lexicon,
        &AnalysisConfig::default(),
        &original.id,
        &ThoughtUpdate {
            content: Some("Now confident and certain about the approach.".to_string()),
            ..Default::default()
        },
    )
    .unwrap()
    .unwrap();

    assert_eq!(updated.emotion, Some(Emotion::Confident));
    assert_ne!(updated.keywords, original.keywords);
}

#[test]
fn delete_then_get_returns_none() {
    let mut conn = test_db();
    let thought = insert_thought(&mut conn, "to be removed", Category::Tick);

    assert!(delete_thought(&mut conn, &thought.id).unwrap());
    assert!(get_thought(&conn, &thought.id).unwrap().is_none());
    assert!(!delete_thought(&mut conn, &thought.id).unwrap());
}

#[test]
fn audit_trail_covers_the_lifecycle() {
    let mut conn = test_db();
    let lexicon = Lexicon::builtin();
    let thought = insert_thought(&mut conn, "audited lifecycle entry", Category::Reflection);

    update_thought(
        &mut conn,
        &lexicon,
        &AnalysisConfig::default(),
        &thought.id,
        &ThoughtUpdate {
            importance: Some(0.8),
            ..Default::default()
        },
    )
    .unwrap()
    .unwrap();
    delete_thought(&mut conn, &thought.id).unwrap();

    let operations: Vec<String> = conn
        .prepare("SELECT operation FROM thought_log WHERE thought_id = ?1 ORDER BY id")
        .unwrap()
        .query_map([&thought.id], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    assert_eq!(operations, vec!["create", "update", "delete"]);
}
