//! CLI `inspect` command — full record, fresh analysis, and audit trail
//! for a single thought.

use anyhow::{bail, Result};
use rusqlite::params;

use crate::analysis::{self, Lexicon, ThoughtInput};
use crate::config::CogitoConfig;
use crate::thought::store::{get_thought, recent_fingerprints};

pub fn inspect(config: &CogitoConfig, id: &str) -> Result<()> {
    let conn = super::open_db(config)?;
    let lexicon = Lexicon::builtin();

    let Some(thought) = get_thought(&conn, id)? else {
        bail!("thought not found: {id}");
    };

    println!("Thought {}", thought.id);
    println!("  category:   {}", thought.category);
    println!("  created:    {}", thought.created_at);
    println!("  updated:    {}", thought.updated_at);
    if !thought.tags.is_empty() {
        println!("  tags:       {}", thought.tags.join(", "));
    }
    println!();
    println!("{}", thought.content);
    println!();
    println!("Stored annotation:");
    println!(
        "  emotion:    {}",
        thought.emotion.map(|e| e.as_str()).unwrap_or("(none)")
    );
    println!("  sentiment:  {:+.3}", thought.sentiment);
    println!("  complexity: {:.3}", thought.complexity);
    println!("  novelty:    {:.3}", thought.novelty);
    println!("  importance: {:.3}", thought.importance);
    if !thought.keywords.is_empty() {
        println!("  keywords:   {}", thought.keywords.join(", "));
    }

    // Fresh analysis against the current history window, for comparison
    // with what was stored at write time.
    let history = recent_fingerprints(&conn, &lexicon, config.analysis.history_window, Some(id))?;
    let input = ThoughtInput::new(&thought.content, thought.category);
    let fresh = analysis::analyze(&lexicon, &input, &history)?;
    println!();
    println!("Fresh analysis (current lexicon and history):");
    println!(
        "  emotion:    {}",
        fresh.emotion.map(|e| e.as_str()).unwrap_or("(none)")
    );
    println!("  sentiment:  {:+.3}", fresh.sentiment);
    println!("  complexity: {:.3}", fresh.complexity);
    println!("  novelty:    {:.3}", fresh.novelty);
    println!("  importance: {:.3}", fresh.importance);

    // Audit trail
    let mut stmt = conn.prepare(
        "SELECT operation, details, created_at FROM thought_log \
         WHERE thought_id = ?1 ORDER BY created_at",
    )?;
    let entries: Vec<(String, Option<String>, String)> = stmt
        .query_map(params![id], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    if !entries.is_empty() {
        println!();
        println!("History:");
        for (operation, details, created_at) in entries {
            match details {
                Some(details) => println!("  {created_at}  {operation}  {details}"),
                None => println!("  {created_at}  {operation}"),
            }
        }
    }

    Ok(())
}
