//! Bulk re-annotation behavior.

mod helpers;

use cogito::analysis::{lexicon::LEXICON_VERSION, Category, Lexicon};
use cogito::config::AnalysisConfig;
use cogito::db::migrations;
use cogito::thought::recompute::recompute_annotations;
use cogito::thought::store::get_thought;

use helpers::{insert_thought, test_db};

#[test]
fn recompute_is_a_fixpoint_for_a_fresh_store() {
    let mut conn = test_db();
    let lexicon = Lexicon::builtin();
    let ids: Vec<String> = [
        "excited about the amazing prototype",
        "confused by the unclear failure mode",
        "excited about the amazing prototype",
    ]
    .iter()
    .map(|content| insert_thought(&mut conn, content, Category::Reflection).id)
    .collect();

    let before: Vec<_> = ids
        .iter()
        .map(|id| get_thought(&conn, id).unwrap().unwrap())
        .collect();

    let outcome =
        recompute_annotations(&mut conn, &lexicon, &AnalysisConfig::default(), None, || {})
            .unwrap();
    assert_eq!(outcome.scanned, 3);
    assert_eq!(outcome.updated, 0);

    for (id, old) in ids.iter().zip(&before) {
        let new = get_thought(&conn, id).unwrap().unwrap();
        assert_eq!(new.emotion, old.emotion);
        assert_eq!(new.sentiment.to_bits(), old.sentiment.to_bits());
        assert_eq!(new.novelty.to_bits(), old.novelty.to_bits());
        assert_eq!(new.importance.to_bits(), old.importance.to_bits());
        assert_eq!(new.keywords, old.keywords);
    }
}

#[test]
fn recompute_overwrites_drifted_annotations() {
    let mut conn = test_db();
    let lexicon = Lexicon::builtin();
    let id = insert_thought(
        &mut conn,
        "thrilled with this brilliant outcome",
        Category::Reflection,
    )
    .id;

    // Simulate annotations written by an older lexicon.
    conn.execute(
        "UPDATE thoughts SET emotion = 'sad', sentiment = -1.0, keywords = '[]' WHERE id = ?1",
        [&id],
    )
    .unwrap();

    let outcome =
        recompute_annotations(&mut conn, &lexicon, &AnalysisConfig::default(), None, || {})
            .unwrap();
    assert_eq!(outcome.updated, 1);

    let refreshed = get_thought(&conn, &id).unwrap().unwrap();
    assert_ne!(refreshed.emotion.map(|e| e.as_str()), Some("sad"));
    assert!(!refreshed.keywords.is_empty());
}

#[test]
fn recompute_progress_fires_once_per_row() {
    let mut conn = test_db();
    let lexicon = Lexicon::builtin();
    for i in 0..4 {
        insert_thought(&mut conn, &format!("entry number {i}"), Category::Tick);
    }

    let mut ticks = 0u32;
    recompute_annotations(&mut conn, &lexicon, &AnalysisConfig::default(), None, || {
        ticks += 1;
    })
    .unwrap();
    assert_eq!(ticks, 4);

    let mut limited = 0u32;
    recompute_annotations(
        &mut conn,
        &lexicon,
        &AnalysisConfig::default(),
        Some(2),
        || {
            limited += 1;
        },
    )
    .unwrap();
    assert_eq!(limited, 2);
}

#[test]
fn recompute_stamps_the_lexicon_version() {
    let mut conn = test_db();
    let lexicon = Lexicon::builtin();
    insert_thought(&mut conn, "single entry", Category::Reflection);

    migrations::set_lexicon_version(&conn, "builtin-0").unwrap();
    recompute_annotations(&mut conn, &lexicon, &AnalysisConfig::default(), None, || {})
        .unwrap();

    assert_eq!(
        migrations::get_lexicon_version(&conn).unwrap().as_deref(),
        Some(LEXICON_VERSION)
    );
}
