//! CLI `list` command — filtered listing of stored thoughts.

use anyhow::Result;

use crate::config::CogitoConfig;
use crate::thought::search::{
    list_thoughts, PageRequest, SortKey, SortOrder, ThoughtFilter,
};

pub fn list(
    config: &CogitoConfig,
    filter: ThoughtFilter,
    order_by: SortKey,
    ascending: bool,
    page: usize,
    size: usize,
) -> Result<()> {
    let conn = super::open_db(config)?;

    let order = SortOrder {
        key: order_by,
        descending: !ascending,
    };
    let response = list_thoughts(&conn, &filter, order, PageRequest { page, size })?;

    if response.thoughts.is_empty() {
        println!("No thoughts found.");
        return Ok(());
    }

    println!(
        "Page {}/{} ({} total)\n",
        response.page, response.total_pages, response.total
    );

    for thought in &response.thoughts {
        println!(
            "  [{}] {} (importance: {:.2}{})",
            thought.category,
            thought.id,
            thought.importance,
            thought
                .emotion
                .map(|e| format!(", emotion: {e}"))
                .unwrap_or_default(),
        );
        println!("     {}", super::preview(&thought.content, 120));
        println!();
    }

    Ok(())
}
