pub mod recompute;
pub mod search;
pub mod stats;
pub mod store;
pub mod types;

use rusqlite::Row;

use self::types::Thought;

/// Column list matching [`thought_from_row`]'s positional reads.
pub(crate) const THOUGHT_COLUMNS: &str =
    "id, category, content, tags, emotion, sentiment, complexity, novelty, \
     importance, keywords, created_at, updated_at";

/// Map a row selected with [`THOUGHT_COLUMNS`] to a [`Thought`].
pub(crate) fn thought_from_row(row: &Row<'_>) -> rusqlite::Result<Thought> {
    let category: String = row.get(1)?;
    let tags: String = row.get(3)?;
    let emotion: Option<String> = row.get(4)?;
    let keywords: String = row.get(9)?;

    Ok(Thought {
        id: row.get(0)?,
        category: category.parse().map_err(|_| rusqlite::Error::InvalidQuery)?,
        content: row.get(2)?,
        tags: serde_json::from_str(&tags).unwrap_or_default(),
        emotion: emotion.and_then(|e| e.parse().ok()),
        sentiment: row.get(5)?,
        complexity: row.get(6)?,
        novelty: row.get(7)?,
        importance: row.get(8)?,
        keywords: serde_json::from_str(&keywords).unwrap_or_default(),
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}
