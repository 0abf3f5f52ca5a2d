//! Bulk re-annotation — refresh stored scores after the lexicon or
//! weighting tables change.
//!
//! Walks the store oldest-first, rebuilding each thought's annotation
//! against the window of thoughts that preceded it, and overwrites prior
//! values. Content, tags, category, and timestamps are left untouched.

use std::collections::VecDeque;

use anyhow::Result;
use rusqlite::{params, Connection};

use crate::analysis::{self, lexicon::LEXICON_VERSION, Fingerprint, Lexicon, ThoughtInput};
use crate::config::AnalysisConfig;
use crate::db::migrations;
use crate::thought::store::write_audit_log;

/// Result of a recompute pass.
#[derive(Debug)]
pub struct RecomputeOutcome {
    /// Rows re-annotated.
    pub scanned: u64,
    /// Rows whose stored annotation actually changed.
    pub updated: u64,
}

struct StoredRow {
    id: String,
    category: String,
    content: String,
    emotion: Option<String>,
    sentiment: f64,
    complexity: f64,
    novelty: f64,
    importance: f64,
    keywords: String,
}

/// Re-annotate stored thoughts with the current lexicon.
///
/// With `limit = Some(n)` only the most recent `n` thoughts are rewritten,
/// but the fingerprint window still rolls through everything before them so
/// novelty scores stay consistent. `on_progress` fires once per re-annotated
/// row. Records the current lexicon version in `schema_meta` when done.
pub fn recompute_annotations(
    conn: &mut Connection,
    lexicon: &Lexicon,
    settings: &AnalysisConfig,
    limit: Option<usize>,
    mut on_progress: impl FnMut(),
) -> Result<RecomputeOutcome> {
    let rows: Vec<StoredRow> = {
        let mut stmt = conn.prepare(
            "SELECT id, category, content, emotion, sentiment, complexity, novelty, \
             importance, keywords FROM thoughts ORDER BY created_at ASC, rowid ASC",
        )?;
        let mapped = stmt.query_map([], |row| {
            Ok(StoredRow {
                id: row.get(0)?,
                category: row.get(1)?,
                content: row.get(2)?,
                emotion: row.get(3)?,
                sentiment: row.get(4)?,
                complexity: row.get(5)?,
                novelty: row.get(6)?,
                importance: row.get(7)?,
                keywords: row.get(8)?,
            })
        })?;
        mapped.collect::<Result<Vec<_>, _>>()?
    };

    let first_in_scope = match limit {
        Some(n) => rows.len().saturating_sub(n),
        None => 0,
    };

    let mut window: VecDeque<Fingerprint> = VecDeque::with_capacity(settings.history_window);
    let mut scanned = 0u64;
    let mut updated = 0u64;

    let tx = conn.transaction()?;
    for (index, row) in rows.iter().enumerate() {
        let fingerprint = Fingerprint::from_content(lexicon, &row.content);

        if index >= first_in_scope {
            let history: Vec<Fingerprint> = window.iter().cloned().collect();
            let input = ThoughtInput {
                content: &row.content,
                category: row
                    .category
                    .parse()
                    .map_err(|e| anyhow::anyhow!("corrupt category on {}: {e}", row.id))?,
                importance: None,
            };
            let annotation = analysis::analyze(lexicon, &input, &history)?;

            let emotion = if settings.enable_emotions {
                annotation.emotion.map(|e| e.as_str().to_string())
            } else {
                row.emotion.clone()
            };
            let keywords = serde_json::to_string(&annotation.keywords)?;

            let changed = emotion != row.emotion
                || annotation.sentiment.to_bits() != row.sentiment.to_bits()
                || annotation.complexity.to_bits() != row.complexity.to_bits()
                || annotation.novelty.to_bits() != row.novelty.to_bits()
                || annotation.importance.to_bits() != row.importance.to_bits()
                || keywords != row.keywords;

            if changed {
                tx.execute(
                    "UPDATE thoughts SET emotion = ?1, sentiment = ?2, complexity = ?3, \
                     novelty = ?4, importance = ?5, keywords = ?6 WHERE id = ?7",
                    params![
                        emotion,
                        annotation.sentiment,
                        annotation.complexity,
                        annotation.novelty,
                        annotation.importance,
                        keywords,
                        row.id,
                    ],
                )?;
                write_audit_log(
                    &tx,
                    "recompute",
                    &row.id,
                    Some(&serde_json::json!({ "lexicon": LEXICON_VERSION })),
                )?;
                updated += 1;
            }

            scanned += 1;
            on_progress();
        }

        // Roll the novelty window forward regardless of scope.
        if settings.history_window > 0 {
            if window.len() == settings.history_window {
                window.pop_back();
            }
            window.push_front(fingerprint);
        }
    }

    migrations::set_lexicon_version(&tx, LEXICON_VERSION)?;
    tx.commit()?;

    tracing::info!(scanned, updated, "recompute finished");
    Ok(RecomputeOutcome { scanned, updated })
}
