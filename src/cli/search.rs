//! CLI `search` command — free-text search over stored content.

use anyhow::Result;

use crate::config::CogitoConfig;
use crate::thought::search::{list_thoughts, PageRequest, SortOrder, ThoughtFilter};

pub fn search(config: &CogitoConfig, query: &str, limit: usize) -> Result<()> {
    let conn = super::open_db(config)?;

    let filter = ThoughtFilter {
        search: Some(query.to_string()),
        ..Default::default()
    };
    let response = list_thoughts(
        &conn,
        &filter,
        SortOrder::default(),
        PageRequest { page: 1, size: limit },
    )?;

    if response.thoughts.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    println!("Found {} result(s)\n", response.total);

    for (i, thought) in response.thoughts.iter().enumerate() {
        println!(
            "  {}. [{}] {} (importance: {:.2})",
            i + 1,
            thought.category,
            thought.id,
            thought.importance,
        );
        println!("     {}", super::preview(&thought.content, 120));
        println!();
    }

    Ok(())
}
