use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

use crate::analysis::Category;

/// Aggregate statistics over the thought store.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_thoughts: u64,
    pub by_category: HashMap<String, u64>,
    pub by_emotion: HashMap<String, u64>,
    pub tag_counts: HashMap<String, u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importance_avg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importance_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importance_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oldest_thought: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newest_thought: Option<String>,
    pub db_size_bytes: u64,
}

/// Compute thought store statistics.
///
/// `db_path` is used for file size calculation; pass None for in-memory
/// databases.
pub fn thought_stats(conn: &Connection, db_path: Option<&Path>) -> Result<StatsResponse> {
    let total: i64 = conn.query_row("SELECT COUNT(*) FROM thoughts", [], |row| row.get(0))?;
    let by_category = count_by_category(conn)?;
    let by_emotion = count_by_emotion(conn)?;
    let tag_counts = count_tags(conn)?;
    let (importance_avg, importance_min, importance_max) = importance_range(conn)?;
    let (oldest, newest) = thought_time_range(conn)?;

    let db_size_bytes = db_path
        .and_then(|p| std::fs::metadata(p).ok())
        .map(|m| m.len())
        .unwrap_or(0);

    Ok(StatsResponse {
        total_thoughts: total as u64,
        by_category,
        by_emotion,
        tag_counts,
        importance_avg,
        importance_min,
        importance_max,
        oldest_thought: oldest,
        newest_thought: newest,
        db_size_bytes,
    })
}

/// Count by category, with every known category present in the map.
fn count_by_category(conn: &Connection) -> Result<HashMap<String, u64>> {
    let mut map = HashMap::new();
    for category in Category::all() {
        map.insert(category.as_str().to_string(), 0);
    }

    let mut stmt = conn.prepare("SELECT category, COUNT(*) FROM thoughts GROUP BY category")?;
    let rows: Vec<(String, i64)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    for (category, count) in rows {
        map.insert(category, count as u64);
    }
    Ok(map)
}

/// Count by emotion label, skipping unlabeled rows.
fn count_by_emotion(conn: &Connection) -> Result<HashMap<String, u64>> {
    let mut stmt = conn.prepare(
        "SELECT emotion, COUNT(*) FROM thoughts WHERE emotion IS NOT NULL GROUP BY emotion",
    )?;
    let rows: Vec<(String, i64)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows.into_iter().map(|(e, c)| (e, c as u64)).collect())
}

/// Tag frequencies across all thoughts, via json_each over the tags column.
fn count_tags(conn: &Connection) -> Result<HashMap<String, u64>> {
    let mut stmt = conn.prepare(
        "SELECT je.value, COUNT(*) FROM thoughts, json_each(thoughts.tags) je GROUP BY je.value",
    )?;
    let rows: Vec<(String, i64)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows.into_iter().map(|(t, c)| (t, c as u64)).collect())
}

/// Average, minimum, and maximum importance.
fn importance_range(conn: &Connection) -> Result<(Option<f64>, Option<f64>, Option<f64>)> {
    let row: (Option<f64>, Option<f64>, Option<f64>) = conn.query_row(
        "SELECT AVG(importance), MIN(importance), MAX(importance) FROM thoughts",
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;
    Ok(row)
}

/// Oldest and newest thought timestamps.
fn thought_time_range(conn: &Connection) -> Result<(Option<String>, Option<String>)> {
    let row: (Option<String>, Option<String>) = conn.query_row(
        "SELECT MIN(created_at), MAX(created_at) FROM thoughts",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    Ok(row)
}
