//! Write path — annotation, storage, FTS sync, and audit logging.
//!
//! [`create_thought`] is the main entry point. It runs the full pipeline
//! inside a transaction: fetch the novelty history window, annotate the
//! content, insert into the thoughts table, sync the FTS5 index, and write
//! an audit log entry. Updates re-annotate whenever content changes.

use anyhow::{bail, Result};
use rusqlite::{params, Connection, OptionalExtension, Transaction};

use crate::analysis::{self, Fingerprint, Lexicon, ThoughtInput};
use crate::config::AnalysisConfig;
use crate::thought::types::{normalize_tags, NewThought, Thought, ThoughtUpdate, MAX_CONTENT_LEN};
use crate::thought::{thought_from_row, THOUGHT_COLUMNS};

/// Full write path: history window → annotate → insert → FTS sync → audit log.
///
/// Caller-supplied emotion and importance always win over computed values.
/// All database operations run inside a transaction for atomicity.
pub fn create_thought(
    conn: &mut Connection,
    lexicon: &Lexicon,
    settings: &AnalysisConfig,
    new: &NewThought,
) -> Result<Thought> {
    validate_content_len(&new.content)?;

    // 1. History window for novelty, most recent first
    let history = recent_fingerprints(conn, lexicon, settings.history_window, None)?;

    // 2. Annotate
    let input = ThoughtInput {
        content: &new.content,
        category: new.category,
        importance: new.importance,
    };
    let annotation = analysis::analyze(lexicon, &input, &history)?;

    let emotion = if settings.enable_emotions {
        new.emotion.or(annotation.emotion)
    } else {
        None
    };
    let importance = if settings.enable_importance_scoring {
        annotation.importance
    } else {
        new.importance
            .filter(|v| (0.0..=1.0).contains(v))
            .unwrap_or(settings.default_importance)
    };
    let tags = normalize_tags(&new.tags);

    // 3. Insert + FTS sync + audit, atomically
    let id = uuid::Uuid::now_v7().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    let thought = Thought {
        id: id.clone(),
        category: new.category,
        content: new.content.clone(),
        tags,
        emotion,
        sentiment: annotation.sentiment,
        complexity: annotation.complexity,
        novelty: annotation.novelty,
        importance,
        keywords: annotation.keywords,
        created_at: now.clone(),
        updated_at: now,
    };

    let tx = conn.transaction()?;
    let rowid = insert_thought(&tx, &thought)?;
    fts_insert(&tx, rowid, &thought.content, &thought.id)?;
    write_audit_log(&tx, "create", &id, None)?;
    tx.commit()?;

    tracing::debug!(id = %thought.id, category = %thought.category, "thought stored");
    Ok(thought)
}

/// Fetch a single thought by ID.
pub fn get_thought(conn: &Connection, id: &str) -> Result<Option<Thought>> {
    let thought = conn
        .query_row(
            &format!("SELECT {THOUGHT_COLUMNS} FROM thoughts WHERE id = ?1"),
            params![id],
            thought_from_row,
        )
        .optional()?;
    Ok(thought)
}

/// Apply a partial update. Content changes trigger full re-annotation
/// against a history window that excludes the updated row itself.
///
/// Returns `Ok(None)` if no thought with the given ID exists.
pub fn update_thought(
    conn: &mut Connection,
    lexicon: &Lexicon,
    settings: &AnalysisConfig,
    id: &str,
    update: &ThoughtUpdate,
) -> Result<Option<Thought>> {
    let Some(existing) = get_thought(conn, id)? else {
        return Ok(None);
    };

    let mut thought = existing.clone();
    if let Some(category) = update.category {
        thought.category = category;
    }
    if let Some(ref tags) = update.tags {
        thought.tags = normalize_tags(tags);
    }

    let content_changed = update
        .content
        .as_ref()
        .is_some_and(|c| *c != existing.content);

    if let Some(ref content) = update.content {
        validate_content_len(content)?;
        thought.content = content.clone();
    }

    if content_changed {
        // Re-derive every annotation field from the new content.
        let history =
            recent_fingerprints(conn, lexicon, settings.history_window, Some(id))?;
        let input = ThoughtInput {
            content: &thought.content,
            category: thought.category,
            importance: update.importance,
        };
        let annotation = analysis::analyze(lexicon, &input, &history)?;

        thought.emotion = if settings.enable_emotions {
            update.emotion.or(annotation.emotion)
        } else {
            update.emotion
        };
        thought.sentiment = annotation.sentiment;
        thought.complexity = annotation.complexity;
        thought.novelty = annotation.novelty;
        thought.importance = if settings.enable_importance_scoring {
            annotation.importance
        } else {
            update
                .importance
                .filter(|v| (0.0..=1.0).contains(v))
                .unwrap_or(existing.importance)
        };
        thought.keywords = annotation.keywords;
    } else {
        if let Some(emotion) = update.emotion {
            thought.emotion = Some(emotion);
        }
        if let Some(importance) = update.importance {
            if !(0.0..=1.0).contains(&importance) {
                bail!("importance must be in [0.0, 1.0], got {importance}");
            }
            thought.importance = importance;
        }
    }

    thought.updated_at = chrono::Utc::now().to_rfc3339();

    let tx = conn.transaction()?;
    let rowid: i64 = tx.query_row(
        "SELECT rowid FROM thoughts WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )?;

    tx.execute(
        "UPDATE thoughts SET category = ?1, content = ?2, tags = ?3, emotion = ?4, \
         sentiment = ?5, complexity = ?6, novelty = ?7, importance = ?8, keywords = ?9, \
         updated_at = ?10 WHERE id = ?11",
        params![
            thought.category.as_str(),
            thought.content,
            serde_json::to_string(&thought.tags)?,
            thought.emotion.map(|e| e.as_str()),
            thought.sentiment,
            thought.complexity,
            thought.novelty,
            thought.importance,
            serde_json::to_string(&thought.keywords)?,
            thought.updated_at,
            id,
        ],
    )?;

    if content_changed {
        fts_delete(&tx, rowid, &existing.content, id)?;
        fts_insert(&tx, rowid, &thought.content, id)?;
    }

    write_audit_log(
        &tx,
        "update",
        id,
        Some(&serde_json::json!({ "reanalyzed": content_changed })),
    )?;
    tx.commit()?;

    Ok(Some(thought))
}

/// Delete a thought. Returns `false` if the ID was not found.
pub fn delete_thought(conn: &mut Connection, id: &str) -> Result<bool> {
    let tx = conn.transaction()?;

    let row: Option<(i64, String)> = tx
        .query_row(
            "SELECT rowid, content FROM thoughts WHERE id = ?1",
            params![id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    let Some((rowid, content)) = row else {
        return Ok(false);
    };

    fts_delete(&tx, rowid, &content, id)?;
    tx.execute("DELETE FROM thoughts WHERE id = ?1", params![id])?;
    write_audit_log(&tx, "delete", id, None)?;
    tx.commit()?;

    Ok(true)
}

/// Build the novelty history window: fingerprints of the most recent
/// thoughts, optionally excluding one ID (used when re-annotating that row).
pub fn recent_fingerprints(
    conn: &Connection,
    lexicon: &Lexicon,
    limit: usize,
    exclude: Option<&str>,
) -> Result<Vec<Fingerprint>> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let mut stmt = conn.prepare(
        "SELECT content FROM thoughts WHERE (?1 IS NULL OR id != ?1) \
         ORDER BY created_at DESC, rowid DESC LIMIT ?2",
    )?;
    let contents: Vec<String> = stmt
        .query_map(params![exclude, limit as i64], |row| row.get(0))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(contents
        .iter()
        .map(|c| Fingerprint::from_content(lexicon, c))
        .collect())
}

/// Write an entry to the thought_log audit table.
pub(crate) fn write_audit_log(
    conn: &Connection,
    operation: &str,
    thought_id: &str,
    details: Option<&serde_json::Value>,
) -> Result<()> {
    let now = chrono::Utc::now().to_rfc3339();
    let details_json = details.map(|d| d.to_string());
    conn.execute(
        "INSERT INTO thought_log (operation, thought_id, details, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![operation, thought_id, details_json, now],
    )?;
    Ok(())
}

fn validate_content_len(content: &str) -> Result<()> {
    let len = content.chars().count();
    if len > MAX_CONTENT_LEN {
        bail!("content exceeds {MAX_CONTENT_LEN} characters (got {len})");
    }
    Ok(())
}

/// Insert a new thought row. Returns the SQLite rowid for FTS5 sync.
fn insert_thought(conn: &Transaction, thought: &Thought) -> Result<i64> {
    conn.execute(
        "INSERT INTO thoughts (id, category, content, tags, emotion, sentiment, complexity, \
         novelty, importance, keywords, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            thought.id,
            thought.category.as_str(),
            thought.content,
            serde_json::to_string(&thought.tags)?,
            thought.emotion.map(|e| e.as_str()),
            thought.sentiment,
            thought.complexity,
            thought.novelty,
            thought.importance,
            serde_json::to_string(&thought.keywords)?,
            thought.created_at,
            thought.updated_at,
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

/// Sync the FTS5 index after inserting into the thoughts table.
///
/// Must use the same rowid as the corresponding `thoughts` row.
fn fts_insert(conn: &Transaction, rowid: i64, content: &str, id: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO thoughts_fts (rowid, content, id) VALUES (?1, ?2, ?3)",
        params![rowid, content, id],
    )?;
    Ok(())
}

/// Remove a row from the external-content FTS5 index. FTS5 requires the
/// old column values to be replayed alongside the 'delete' command.
fn fts_delete(conn: &Transaction, rowid: i64, old_content: &str, id: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO thoughts_fts (thoughts_fts, rowid, content, id) VALUES ('delete', ?1, ?2, ?3)",
        params![rowid, old_content, id],
    )?;
    Ok(())
}
