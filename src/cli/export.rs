//! CLI `export` command — dump thoughts as JSON or CSV.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use rusqlite::Connection;
use serde::Serialize;

use crate::config::CogitoConfig;
use crate::thought::search::{
    list_thoughts, PageRequest, SortKey, SortOrder, ThoughtFilter, MAX_PAGE_SIZE,
};
use crate::thought::types::Thought;

/// JSON export wrapper with provenance metadata.
#[derive(Debug, Serialize)]
struct ExportData {
    export_metadata: ExportMetadata,
    thoughts: Vec<Thought>,
}

#[derive(Debug, Serialize)]
struct ExportMetadata {
    format: &'static str,
    exported_at: String,
    total_thoughts: usize,
    source: &'static str,
}

/// Export all thoughts matching `filter` to stdout or a file.
pub fn export(
    config: &CogitoConfig,
    format: &str,
    output: Option<PathBuf>,
    filter: ThoughtFilter,
) -> Result<()> {
    let conn = super::open_db(config)?;
    let thoughts = fetch_all(&conn, &filter)?;

    if thoughts.is_empty() {
        eprintln!("No thoughts found matching the criteria.");
        return Ok(());
    }

    let rendered = match format {
        "json" => render_json(&thoughts)?,
        "csv" => render_csv(&thoughts)?,
        other => bail!("unsupported export format: {other}. Use 'json' or 'csv'"),
    };

    let count = thoughts.len();
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(&path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Exported {count} thoughts to {}.", path.display());
        }
        None => {
            std::io::stdout().write_all(rendered.as_bytes())?;
            eprintln!("Exported {count} thoughts.");
        }
    }

    Ok(())
}

/// Drain every matching page, oldest first.
fn fetch_all(conn: &Connection, filter: &ThoughtFilter) -> Result<Vec<Thought>> {
    let order = SortOrder {
        key: SortKey::CreatedAt,
        descending: false,
    };

    let mut thoughts = Vec::new();
    let mut page = 1;
    loop {
        let response = list_thoughts(
            conn,
            filter,
            order,
            PageRequest {
                page,
                size: MAX_PAGE_SIZE,
            },
        )?;
        let done = page as u64 >= response.total_pages;
        thoughts.extend(response.thoughts);
        if done {
            break;
        }
        page += 1;
    }
    Ok(thoughts)
}

fn render_json(thoughts: &[Thought]) -> Result<String> {
    let data = ExportData {
        export_metadata: ExportMetadata {
            format: "json",
            exported_at: chrono::Utc::now().to_rfc3339(),
            total_thoughts: thoughts.len(),
            source: "cogito",
        },
        thoughts: thoughts.to_vec(),
    };
    let mut json = serde_json::to_string_pretty(&data)?;
    json.push('\n');
    Ok(json)
}

fn render_csv(thoughts: &[Thought]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "id",
        "category",
        "content",
        "tags",
        "emotion",
        "sentiment",
        "complexity",
        "novelty",
        "importance",
        "keywords",
        "created_at",
        "updated_at",
    ])?;

    for thought in thoughts {
        let tags = thought.tags.join(",");
        let keywords = thought.keywords.join(",");
        let sentiment = thought.sentiment.to_string();
        let complexity = thought.complexity.to_string();
        let novelty = thought.novelty.to_string();
        let importance = thought.importance.to_string();
        writer.write_record([
            thought.id.as_str(),
            thought.category.as_str(),
            thought.content.as_str(),
            tags.as_str(),
            thought.emotion.map(|e| e.as_str()).unwrap_or(""),
            sentiment.as_str(),
            complexity.as_str(),
            novelty.as_str(),
            importance.as_str(),
            keywords.as_str(),
            thought.created_at.as_str(),
            thought.updated_at.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("csv writer flush failed: {e}"))?;
    String::from_utf8(bytes).context("csv output was not valid UTF-8")
}
