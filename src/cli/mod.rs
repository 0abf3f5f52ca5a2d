pub mod chat;
pub mod doctor;
pub mod export;
pub mod inspect;
pub mod list;
pub mod log;
pub mod recompute;
pub mod reset;
pub mod search;
pub mod stats;

use anyhow::Result;
use rusqlite::Connection;

use crate::config::CogitoConfig;

/// Open the configured database, creating it on first use.
pub(crate) fn open_db(config: &CogitoConfig) -> Result<Connection> {
    crate::db::open_database(config.resolved_db_path())
}

/// Single-line preview of content for terminal listings.
pub(crate) fn preview(content: &str, max_chars: usize) -> String {
    let flat = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        flat
    } else {
        let cut: String = flat.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}
