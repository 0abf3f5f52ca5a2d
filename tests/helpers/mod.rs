#![allow(dead_code)]

use rusqlite::Connection;

use cogito::analysis::{Category, Lexicon};
use cogito::config::AnalysisConfig;
use cogito::db;
use cogito::thought::store::create_thought;
use cogito::thought::types::{NewThought, Thought};

/// Open a fresh in-memory database with schema and migrations applied.
pub fn test_db() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.pragma_update(None, "foreign_keys", "ON").unwrap();
    db::schema::init_schema(&conn).unwrap();
    db::migrations::run_migrations(&conn).unwrap();
    conn
}

/// Insert a thought with default analysis settings. Returns the full record.
pub fn insert_thought(conn: &mut Connection, content: &str, category: Category) -> Thought {
    let lexicon = Lexicon::builtin();
    create_thought(
        conn,
        &lexicon,
        &AnalysisConfig::default(),
        &NewThought {
            category,
            content: content.to_string(),
            ..Default::default()
        },
    )
    .unwrap()
}

/// Insert a thought with explicit tags.
pub fn insert_tagged(
    conn: &mut Connection,
    content: &str,
    category: Category,
    tags: &[&str],
) -> Thought {
    let lexicon = Lexicon::builtin();
    create_thought(
        conn,
        &lexicon,
        &AnalysisConfig::default(),
        &NewThought {
            category,
            content: content.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        },
    )
    .unwrap()
}
