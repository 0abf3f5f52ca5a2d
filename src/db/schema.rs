//! SQL DDL for all Cogito tables.
//!
//! Defines the `thoughts`, `thoughts_fts` (FTS5), `thought_log`, and
//! `schema_meta` tables. All DDL uses `IF NOT EXISTS` for idempotent
//! initialization.

use rusqlite::Connection;

/// All schema DDL statements for Cogito's core tables.
const SCHEMA_SQL: &str = r#"
-- Core thought storage. Annotation columns are flattened for filtering.
CREATE TABLE IF NOT EXISTS thoughts (
    id TEXT PRIMARY KEY,
    category TEXT NOT NULL CHECK(category IN (
        'user-input','ai-response','conversation','reflection','perception',
        'decision','observation','idea','question','tick','error')),
    content TEXT NOT NULL,
    tags TEXT NOT NULL DEFAULT '[]',
    emotion TEXT,
    sentiment REAL NOT NULL DEFAULT 0.0 CHECK(sentiment >= -1.0 AND sentiment <= 1.0),
    complexity REAL NOT NULL DEFAULT 0.0 CHECK(complexity >= 0.0 AND complexity <= 1.0),
    novelty REAL NOT NULL DEFAULT 1.0 CHECK(novelty >= 0.0 AND novelty <= 1.0),
    importance REAL NOT NULL DEFAULT 0.5 CHECK(importance >= 0.0 AND importance <= 1.0),
    keywords TEXT NOT NULL DEFAULT '[]',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_thoughts_category ON thoughts(category);
CREATE INDEX IF NOT EXISTS idx_thoughts_emotion ON thoughts(emotion);
CREATE INDEX IF NOT EXISTS idx_thoughts_importance ON thoughts(importance);
CREATE INDEX IF NOT EXISTS idx_thoughts_created ON thoughts(created_at);

-- Full-text search over content
CREATE VIRTUAL TABLE IF NOT EXISTS thoughts_fts USING fts5(
    content,
    id UNINDEXED,
    content='thoughts',
    content_rowid='rowid'
);

-- Audit log
CREATE TABLE IF NOT EXISTS thought_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    operation TEXT NOT NULL CHECK(operation IN ('create','update','delete','recompute')),
    thought_id TEXT NOT NULL,
    details TEXT,
    created_at TEXT NOT NULL
);

-- Schema metadata
CREATE TABLE IF NOT EXISTS schema_meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// Initialize all schema tables. Idempotent (uses IF NOT EXISTS).
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    // Set initial schema version if not already present
    conn.execute(
        "INSERT OR IGNORE INTO schema_meta (key, value) VALUES ('schema_version', '1')",
        [],
    )?;

    Ok(())
}
